//! Collateral ledger and counter storage helpers.
//!
//! Every mutation of a token balance goes through `credit`/`debit` so that
//! the total balance of an `(account, chain)` pair always equals the sum of
//! its per-token balances.

use cosmwasm_std::{Addr, StdResult, Storage, Uint256};

use crate::error::ContractError;
use crate::state::{Counters, COUNTERS, TOKEN_BALANCES, TOTAL_BALANCES};

pub fn total_balance(
    storage: &dyn Storage,
    account: &Addr,
    chain: u64,
) -> StdResult<Uint256> {
    Ok(TOTAL_BALANCES
        .may_load(storage, (account, chain))?
        .unwrap_or_default())
}

pub fn token_balance(
    storage: &dyn Storage,
    account: &Addr,
    chain: u64,
    index: u32,
) -> StdResult<Uint256> {
    Ok(TOKEN_BALANCES
        .may_load(storage, (account, chain, index))?
        .unwrap_or_default())
}

/// Add `amount` to one token and to the total.
pub fn credit(
    storage: &mut dyn Storage,
    account: &Addr,
    chain: u64,
    index: u32,
    amount: Uint256,
) -> Result<(), ContractError> {
    let token = token_balance(storage, account, chain, index)?.checked_add(amount)?;
    let total = total_balance(storage, account, chain)?.checked_add(amount)?;
    TOKEN_BALANCES.save(storage, (account, chain, index), &token)?;
    TOTAL_BALANCES.save(storage, (account, chain), &total)?;
    Ok(())
}

/// Remove `amount` from one token and from the total.
pub fn debit(
    storage: &mut dyn Storage,
    account: &Addr,
    chain: u64,
    index: u32,
    amount: Uint256,
) -> Result<(), ContractError> {
    let available = token_balance(storage, account, chain, index)?;
    let token = available
        .checked_sub(amount)
        .map_err(|_| ContractError::InsufficientBalance {
            available,
            requested: amount,
        })?;
    let total = total_balance(storage, account, chain)?.checked_sub(amount)?;
    TOKEN_BALANCES.save(storage, (account, chain, index), &token)?;
    TOTAL_BALANCES.save(storage, (account, chain), &total)?;
    Ok(())
}

pub fn load_counters(
    storage: &dyn Storage,
    account: &Addr,
    chain: u64,
) -> StdResult<Counters> {
    Ok(COUNTERS.may_load(storage, (account, chain))?.unwrap_or_default())
}

pub fn save_counters(
    storage: &mut dyn Storage,
    account: &Addr,
    chain: u64,
    counters: &Counters,
) -> Result<(), ContractError> {
    COUNTERS.save(storage, (account, chain), counters)?;
    Ok(())
}
