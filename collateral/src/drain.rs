//! Reject-unlock draining.
//!
//! A unified amount is taken from the per-token balances in registry index
//! order. Each token gives up `min(remaining, balance)` until the request is
//! covered or every token is exhausted. Whatever cannot be covered is
//! dropped. Planning is kept free of storage so the ordering rules can be
//! tested on plain numbers.

use cosmwasm_std::Uint256;

/// Unified amount taken from one token
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Take {
    pub index: u32,
    pub amount: Uint256,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrainPlan {
    /// Non-zero takes, in index order
    pub takes: Vec<Take>,
    /// Sum of all takes
    pub covered: Uint256,
    /// Part of the request no token could cover
    pub uncovered: Uint256,
}

/// Plan how `request` is drained from `balances` (indexed by token).
pub fn plan_drain(balances: &[Uint256], request: Uint256) -> DrainPlan {
    let mut remaining = request;
    let mut takes = Vec::new();

    for (index, available) in balances.iter().enumerate() {
        if remaining.is_zero() {
            break;
        }
        let take = remaining.min(*available);
        if take.is_zero() {
            continue;
        }
        takes.push(Take {
            index: index as u32,
            amount: take,
        });
        // take <= remaining
        remaining -= take;
    }

    DrainPlan {
        takes,
        covered: request - remaining,
        uncovered: remaining,
    }
}
