//! Withdraw report handlers.
//!
//! Withdraw reports flow in both directions:
//! 1. `Withdraw` consumes a report proven on the lock chain and pays out collateral
//! 2. `SkipWithdraw` advances past reports the account chooses to ignore
//! 3. `ReportWithdraw` issues a report for the counterpart chain to consume
//!
//! Inbound reports must carry the current `unlock_withdraw_nonce`, so they are
//! consumed strictly in order.

use cosmwasm_std::{
    to_json_binary, Binary, CosmosMsg, DepsMut, MessageInfo, Response, Uint256, Uint64, WasmMsg,
};
use cw20::Cw20ExecuteMsg;

use crate::collaborators::ProofVerifier;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, encode_account, WithdrawReport, WITHDRAW_REPORT_SIGNATURE};
use crate::ledger::{debit, load_counters, save_counters};
use crate::normalize::to_native;
use crate::registry::token_by_address;
use crate::replay;
use crate::state::Config;

fn next_nonce(nonce: u64) -> Result<u64, ContractError> {
    Ok(Uint64::new(nonce).checked_add(Uint64::new(1))?.u64())
}

// ============================================================================
// Withdraw
// ============================================================================

/// Withdraw `amount` (unified) of `token` against a withdraw report proven
/// on `lock_chain`.
#[allow(clippy::too_many_arguments)]
pub fn execute_withdraw(
    deps: DepsMut,
    config: &Config,
    verifier: &dyn ProofVerifier,
    info: MessageInfo,
    token: String,
    amount: Uint256,
    lock_chain: u64,
    lock_counter: Uint256,
    proof: Binary,
) -> Result<Response, ContractError> {
    let token = deps.api.addr_validate(&token)?;
    let (index, balance_token) = token_by_address(deps.storage, &token)?;
    let account = info.sender;

    let mut counters = load_counters(deps.storage, &account, lock_chain)?;

    // Everything locked on the lock chain must be covered by unlocks here
    if lock_counter > counters.unlock_counter {
        return Err(ContractError::WithdrawRefusal);
    }

    let report = WithdrawReport {
        variant: config.variant,
        lock_chain,
        unlock_chain: config.chain_id,
        account: encode_account(deps.api, &account)?,
        lock_counter,
        amount,
        nonce: counters.unlock_withdraw_nonce,
    };
    let report_hash = report.hash();
    let event_hash = report.event_hash();

    replay::ensure_fresh(deps.storage, &event_hash)?;

    if !verifier.verify_hash_event_proof(
        &WITHDRAW_REPORT_SIGNATURE,
        &report_hash,
        lock_chain,
        &proof,
    )? {
        return Err(ContractError::WithdrawRefusal);
    }

    debit(deps.storage, &account, lock_chain, index, amount)?;
    counters.unlock_withdraw_nonce = next_nonce(counters.unlock_withdraw_nonce)?;
    save_counters(deps.storage, &account, lock_chain, &counters)?;
    replay::store(deps.storage, &event_hash)?;

    let native = to_native(amount, config.decimals, balance_token.decimals)?;

    let mut response = Response::new()
        .add_attribute("action", "withdraw")
        .add_attribute("account", &account)
        .add_attribute("token", &token)
        .add_attribute("amount", amount.to_string())
        .add_attribute("lock_chain", lock_chain.to_string())
        .add_attribute("nonce", report.nonce.to_string())
        .add_attribute("report_hash", bytes32_to_hex(&report_hash));

    if !native.is_zero() {
        response = response.add_message(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: token.to_string(),
            msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                recipient: account.to_string(),
                amount: native,
            })?,
            funds: vec![],
        }));
    }

    Ok(response)
}

// ============================================================================
// SkipWithdraw
// ============================================================================

/// Skip the caller's inbound nonces `from_nonce..=to_nonce`.
pub fn execute_skip_withdraw(
    deps: DepsMut,
    info: MessageInfo,
    lock_chain: u64,
    from_nonce: u64,
    to_nonce: u64,
) -> Result<Response, ContractError> {
    let mut counters = load_counters(deps.storage, &info.sender, lock_chain)?;
    let invalid = ContractError::InvalidWithdrawSkip {
        nonce: counters.unlock_withdraw_nonce,
        from_nonce,
        to_nonce,
    };

    if from_nonce != counters.unlock_withdraw_nonce || to_nonce < from_nonce {
        return Err(invalid);
    }
    counters.unlock_withdraw_nonce = to_nonce.checked_add(1).ok_or(invalid)?;
    save_counters(deps.storage, &info.sender, lock_chain, &counters)?;

    Ok(Response::new()
        .add_attribute("action", "skip_withdraw")
        .add_attribute("account", info.sender)
        .add_attribute("lock_chain", lock_chain.to_string())
        .add_attribute("from_nonce", from_nonce.to_string())
        .add_attribute("to_nonce", to_nonce.to_string()))
}

// ============================================================================
// ReportWithdraw
// ============================================================================

/// Issue a withdraw report of `amount` (unified) towards `unlock_chain`.
///
/// The caller attests its own withdrawal, so no proof is involved. The lock
/// counter grows by `amount` and the report carries the new total.
pub fn execute_report_withdraw(
    deps: DepsMut,
    config: &Config,
    info: MessageInfo,
    amount: Uint256,
    unlock_chain: u64,
) -> Result<Response, ContractError> {
    let account = info.sender;
    let mut counters = load_counters(deps.storage, &account, unlock_chain)?;

    counters.lock_counter = counters.lock_counter.checked_add(amount)?;
    let nonce = counters.lock_withdraw_nonce;
    counters.lock_withdraw_nonce = next_nonce(nonce)?;
    save_counters(deps.storage, &account, unlock_chain, &counters)?;

    let report = WithdrawReport {
        variant: config.variant,
        lock_chain: config.chain_id,
        unlock_chain,
        account: encode_account(deps.api, &account)?,
        lock_counter: counters.lock_counter,
        amount,
        nonce,
    };
    let report_hash = report.hash();
    replay::store(deps.storage, &report.event_hash())?;

    Ok(Response::new()
        .add_attribute("action", "withdraw_report")
        .add_attribute("account", &account)
        .add_attribute("unlock_chain", unlock_chain.to_string())
        .add_attribute("lock_counter", counters.lock_counter.to_string())
        .add_attribute("amount", amount.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("report_hash", bytes32_to_hex(&report_hash)))
}
