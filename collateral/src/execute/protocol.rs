//! Protocol gated counter operations.
//!
//! The caller is the protocol. Each operation first asks the access
//! whitelist whether the account approved that protocol.
//! - `CommitLock` / `CancelLock` move the lock counter
//! - `ApproveUnlock` / `RejectUnlock` move the unlock counter; a rejection
//!   also pays collateral out to a recipient

use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, DepsMut, MessageInfo, Response, Uint256, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::collaborators::AccessWhitelist;
use crate::drain::plan_drain;
use crate::error::ContractError;
use crate::ledger::{debit, load_counters, save_counters, token_balance};
use crate::normalize::to_native;
use crate::state::{Config, BALANCE_TOKENS};

fn ensure_lock_access(
    whitelist: &dyn AccessWhitelist,
    account: &Addr,
    protocol: &Addr,
) -> Result<(), ContractError> {
    if !whitelist.is_approved(account, protocol)? {
        return Err(ContractError::UnauthorizedLockAccess {
            account: account.to_string(),
            protocol: protocol.to_string(),
        });
    }
    Ok(())
}

fn ensure_unlock_access(
    whitelist: &dyn AccessWhitelist,
    account: &Addr,
    protocol: &Addr,
) -> Result<(), ContractError> {
    if !whitelist.is_approved(account, protocol)? {
        return Err(ContractError::UnauthorizedUnlockAccess {
            account: account.to_string(),
            protocol: protocol.to_string(),
        });
    }
    Ok(())
}

// ============================================================================
// Lock
// ============================================================================

/// Lock `amount` if the resulting lock counter equals `lock_counter` and
/// stays covered by the unlock counter.
pub fn execute_commit_lock(
    deps: DepsMut,
    whitelist: &dyn AccessWhitelist,
    info: MessageInfo,
    account: String,
    amount: Uint256,
    lock_chain: u64,
    lock_counter: Uint256,
) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&account)?;
    ensure_lock_access(whitelist, &account, &info.sender)?;

    let mut counters = load_counters(deps.storage, &account, lock_chain)?;
    let locked = counters.lock_counter.checked_add(amount)?;
    if locked != lock_counter || counters.unlock_counter < lock_counter {
        return Err(ContractError::LockRefusal);
    }
    counters.lock_counter = locked;
    save_counters(deps.storage, &account, lock_chain, &counters)?;

    Ok(Response::new()
        .add_attribute("action", "commit_lock")
        .add_attribute("account", &account)
        .add_attribute("protocol", info.sender)
        .add_attribute("amount", amount.to_string())
        .add_attribute("lock_chain", lock_chain.to_string())
        .add_attribute("lock_counter", locked.to_string()))
}

pub fn execute_cancel_lock(
    deps: DepsMut,
    whitelist: &dyn AccessWhitelist,
    info: MessageInfo,
    account: String,
    amount: Uint256,
    lock_chain: u64,
) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&account)?;
    ensure_lock_access(whitelist, &account, &info.sender)?;

    let mut counters = load_counters(deps.storage, &account, lock_chain)?;
    let locked = counters.lock_counter;
    counters.lock_counter = locked
        .checked_sub(amount)
        .map_err(|_| ContractError::LockCancelExceeded {
            locked,
            requested: amount,
        })?;
    save_counters(deps.storage, &account, lock_chain, &counters)?;

    Ok(Response::new()
        .add_attribute("action", "cancel_lock")
        .add_attribute("account", &account)
        .add_attribute("protocol", info.sender)
        .add_attribute("amount", amount.to_string())
        .add_attribute("lock_chain", lock_chain.to_string())
        .add_attribute("lock_counter", counters.lock_counter.to_string()))
}

// ============================================================================
// Unlock
// ============================================================================

pub fn execute_approve_unlock(
    deps: DepsMut,
    whitelist: &dyn AccessWhitelist,
    info: MessageInfo,
    account: String,
    amount: Uint256,
    lock_chain: u64,
) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&account)?;
    ensure_unlock_access(whitelist, &account, &info.sender)?;

    let mut counters = load_counters(deps.storage, &account, lock_chain)?;
    counters.unlock_counter = counters.unlock_counter.checked_add(amount)?;
    save_counters(deps.storage, &account, lock_chain, &counters)?;

    Ok(Response::new()
        .add_attribute("action", "approve_unlock")
        .add_attribute("account", &account)
        .add_attribute("protocol", info.sender)
        .add_attribute("amount", amount.to_string())
        .add_attribute("lock_chain", lock_chain.to_string())
        .add_attribute("unlock_counter", counters.unlock_counter.to_string()))
}

/// Reject an unlock: drain up to `amount` of collateral to `recipient` in
/// registry order. The unlock counter grows by the full `amount` even when
/// the balances cannot cover it.
#[allow(clippy::too_many_arguments)]
pub fn execute_reject_unlock(
    deps: DepsMut,
    config: &Config,
    whitelist: &dyn AccessWhitelist,
    info: MessageInfo,
    account: String,
    amount: Uint256,
    lock_chain: u64,
    recipient: String,
) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&account)?;
    let recipient = deps.api.addr_validate(&recipient)?;
    ensure_unlock_access(whitelist, &account, &info.sender)?;

    let tokens = BALANCE_TOKENS.load(deps.storage)?;
    let balances = (0..tokens.len() as u32)
        .map(|index| token_balance(deps.storage, &account, lock_chain, index))
        .collect::<Result<Vec<_>, _>>()?;
    let plan = plan_drain(&balances, amount);

    let mut messages: Vec<CosmosMsg> = Vec::with_capacity(plan.takes.len());
    for take in &plan.takes {
        let token = tokens
            .get(take.index as usize)
            .ok_or_else(|| ContractError::UnknownToken {
                token: format!("index {}", take.index),
            })?;

        // Debit the whole unified take; the sub-unit remainder is not paid out
        debit(deps.storage, &account, lock_chain, take.index, take.amount)?;

        let native = to_native(take.amount, config.decimals, token.decimals)?;
        if native.is_zero() {
            continue;
        }
        messages.push(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.address.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: recipient.to_string(),
                amount: native,
            })?,
            funds: vec![],
        }));
    }

    let mut counters = load_counters(deps.storage, &account, lock_chain)?;
    counters.unlock_counter = counters.unlock_counter.checked_add(amount)?;
    save_counters(deps.storage, &account, lock_chain, &counters)?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "reject_unlock")
        .add_attribute("account", &account)
        .add_attribute("protocol", info.sender)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount.to_string())
        .add_attribute("paid", plan.covered.to_string())
        .add_attribute("uncovered", plan.uncovered.to_string())
        .add_attribute("lock_chain", lock_chain.to_string())
        .add_attribute("unlock_counter", counters.unlock_counter.to_string()))
}
