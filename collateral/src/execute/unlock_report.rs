//! Unlock counter report handlers.
//!
//! `ReportUnlockCounterUpdate` publishes this ledger's unlock counter for an
//! account; the lock chain consumes it. `UpdateUnlockCounter` is the inbound
//! direction: a counter proven on the unlock chain replaces the external
//! unlock counter, provided it strictly grows.

use cosmwasm_std::{Binary, DepsMut, Response, Uint256};

use crate::collaborators::ProofVerifier;
use crate::error::ContractError;
use crate::hash::{bytes32_to_hex, encode_account, UnlockReport, UNLOCK_REPORT_SIGNATURE};
use crate::ledger::{load_counters, save_counters};
use crate::replay;
use crate::state::Config;

pub fn execute_report_unlock_counter_update(
    deps: DepsMut,
    config: &Config,
    account: String,
    lock_chain: u64,
) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&account)?;
    let counters = load_counters(deps.storage, &account, lock_chain)?;

    let report = UnlockReport {
        variant: config.variant,
        unlock_chain: config.chain_id,
        lock_chain,
        account: encode_account(deps.api, &account)?,
        unlock_counter: counters.unlock_counter,
    };
    let report_hash = report.hash();
    replay::store(deps.storage, &report.event_hash())?;

    Ok(Response::new()
        .add_attribute("action", "unlock_report")
        .add_attribute("account", &account)
        .add_attribute("lock_chain", lock_chain.to_string())
        .add_attribute("unlock_counter", counters.unlock_counter.to_string())
        .add_attribute("report_hash", bytes32_to_hex(&report_hash)))
}

pub fn execute_update_unlock_counter(
    deps: DepsMut,
    config: &Config,
    verifier: &dyn ProofVerifier,
    account: String,
    unlock_chain: u64,
    unlock_counter: Uint256,
    proof: Binary,
) -> Result<Response, ContractError> {
    let account = deps.api.addr_validate(&account)?;
    let mut counters = load_counters(deps.storage, &account, unlock_chain)?;

    if unlock_counter <= counters.external_unlock_counter {
        return Err(ContractError::InvalidUnlockUpdate);
    }

    let report = UnlockReport {
        variant: config.variant,
        unlock_chain,
        lock_chain: config.chain_id,
        account: encode_account(deps.api, &account)?,
        unlock_counter,
    };
    let report_hash = report.hash();
    let event_hash = report.event_hash();

    replay::ensure_fresh(deps.storage, &event_hash)?;

    if !verifier.verify_hash_event_proof(
        &UNLOCK_REPORT_SIGNATURE,
        &report_hash,
        unlock_chain,
        &proof,
    )? {
        return Err(ContractError::InvalidUnlockUpdate);
    }

    counters.external_unlock_counter = unlock_counter;
    save_counters(deps.storage, &account, unlock_chain, &counters)?;
    replay::store(deps.storage, &event_hash)?;

    Ok(Response::new()
        .add_attribute("action", "update_unlock_counter")
        .add_attribute("account", &account)
        .add_attribute("unlock_chain", unlock_chain.to_string())
        .add_attribute("unlock_counter", unlock_counter.to_string())
        .add_attribute("report_hash", bytes32_to_hex(&report_hash)))
}
