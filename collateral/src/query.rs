//! Query handlers for the collateral ledger contract.

use cosmwasm_std::{Addr, Binary, Deps, StdError, StdResult, Uint256};

use crate::hash::{encode_account, parse_hash, UnlockReport, WithdrawReport};
use crate::ledger::{load_counters, token_balance, total_balance};
use crate::msg::{
    BalanceResponse, BalanceTokenDecimalsResponse, BalanceTokenIndexResponse,
    BalanceTokenResponse, BalanceTokensResponse, ConfigResponse, CounterResponse,
    CountersResponse, HasHashStoreResponse, IsBalanceTokenResponse, NonceResponse,
    ReportHashResponse, TokenRef,
};
use crate::replay;
use crate::state::{BalanceToken, BALANCE_TOKENS, BALANCE_TOKEN_INDEX, CONFIG};

fn registered_index(deps: Deps, token: &str) -> StdResult<(Addr, u32)> {
    let token = deps.api.addr_validate(token)?;
    let index = BALANCE_TOKEN_INDEX
        .may_load(deps.storage, &token)?
        .ok_or_else(|| StdError::not_found(format!("balance token {}", token)))?;
    Ok((token, index))
}

fn registered_token(deps: Deps, index: u32) -> StdResult<BalanceToken> {
    BALANCE_TOKENS
        .load(deps.storage)?
        .into_iter()
        .nth(index as usize)
        .ok_or_else(|| StdError::not_found(format!("balance token index {}", index)))
}

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        decimals: config.decimals,
        variant: config.variant,
        chain_id: config.chain_id,
        proof_verifier: config.proof_verifier,
        access_whitelist: config.access_whitelist,
    })
}

// ============================================================================
// Ledger Queries
// ============================================================================

pub fn query_balance(
    deps: Deps,
    account: String,
    lock_chain: u64,
) -> StdResult<BalanceResponse> {
    let account = deps.api.addr_validate(&account)?;
    Ok(BalanceResponse {
        balance: total_balance(deps.storage, &account, lock_chain)?,
    })
}

pub fn query_balance_by_token(
    deps: Deps,
    account: String,
    lock_chain: u64,
    token: String,
) -> StdResult<BalanceResponse> {
    let account = deps.api.addr_validate(&account)?;
    let (_, index) = registered_index(deps, &token)?;
    Ok(BalanceResponse {
        balance: token_balance(deps.storage, &account, lock_chain, index)?,
    })
}

// ============================================================================
// Counter Queries
// ============================================================================

pub fn query_counters(
    deps: Deps,
    account: String,
    lock_chain: u64,
) -> StdResult<CountersResponse> {
    let account = deps.api.addr_validate(&account)?;
    let counters = load_counters(deps.storage, &account, lock_chain)?;
    Ok(CountersResponse {
        unlock_counter: counters.unlock_counter,
        lock_counter: counters.lock_counter,
        unlock_withdraw_nonce: counters.unlock_withdraw_nonce,
        lock_withdraw_nonce: counters.lock_withdraw_nonce,
        external_unlock_counter: counters.external_unlock_counter,
    })
}

pub fn query_unlock_counter(
    deps: Deps,
    account: String,
    lock_chain: u64,
) -> StdResult<CounterResponse> {
    let counters = query_counters(deps, account, lock_chain)?;
    Ok(CounterResponse {
        counter: counters.unlock_counter,
    })
}

pub fn query_lock_counter(
    deps: Deps,
    account: String,
    lock_chain: u64,
) -> StdResult<CounterResponse> {
    let counters = query_counters(deps, account, lock_chain)?;
    Ok(CounterResponse {
        counter: counters.lock_counter,
    })
}

pub fn query_external_unlock_counter(
    deps: Deps,
    account: String,
    lock_chain: u64,
) -> StdResult<CounterResponse> {
    let counters = query_counters(deps, account, lock_chain)?;
    Ok(CounterResponse {
        counter: counters.external_unlock_counter,
    })
}

pub fn query_unlock_withdraw_nonce(
    deps: Deps,
    account: String,
    lock_chain: u64,
) -> StdResult<NonceResponse> {
    let counters = query_counters(deps, account, lock_chain)?;
    Ok(NonceResponse {
        nonce: counters.unlock_withdraw_nonce,
    })
}

pub fn query_lock_withdraw_nonce(
    deps: Deps,
    account: String,
    lock_chain: u64,
) -> StdResult<NonceResponse> {
    let counters = query_counters(deps, account, lock_chain)?;
    Ok(NonceResponse {
        nonce: counters.lock_withdraw_nonce,
    })
}

// ============================================================================
// Registry Queries
// ============================================================================

pub fn query_is_balance_token(deps: Deps, token: String) -> StdResult<IsBalanceTokenResponse> {
    let is_balance_token = match deps.api.addr_validate(&token) {
        Ok(token) => BALANCE_TOKEN_INDEX.has(deps.storage, &token),
        Err(_) => false,
    };
    Ok(IsBalanceTokenResponse { is_balance_token })
}

pub fn query_balance_token_index(
    deps: Deps,
    token: String,
) -> StdResult<BalanceTokenIndexResponse> {
    let (_, index) = registered_index(deps, &token)?;
    Ok(BalanceTokenIndexResponse { index })
}

pub fn query_balance_token_decimals(
    deps: Deps,
    token: TokenRef,
) -> StdResult<BalanceTokenDecimalsResponse> {
    let index = match token {
        TokenRef::Address(token) => registered_index(deps, &token)?.1,
        TokenRef::Index(index) => index,
    };
    Ok(BalanceTokenDecimalsResponse {
        decimals: registered_token(deps, index)?.decimals,
    })
}

pub fn query_balance_token_by_index(deps: Deps, index: u32) -> StdResult<BalanceTokenResponse> {
    let token = registered_token(deps, index)?;
    Ok(BalanceTokenResponse {
        index,
        address: token.address,
        decimals: token.decimals,
    })
}

pub fn query_balance_tokens(deps: Deps) -> StdResult<BalanceTokensResponse> {
    let config = CONFIG.load(deps.storage)?;
    let tokens = BALANCE_TOKENS
        .load(deps.storage)?
        .into_iter()
        .enumerate()
        .map(|(index, token)| BalanceTokenResponse {
            index: index as u32,
            address: token.address,
            decimals: token.decimals,
        })
        .collect();
    Ok(BalanceTokensResponse {
        decimals: config.decimals,
        tokens,
    })
}

// ============================================================================
// Report Queries
// ============================================================================

pub fn query_has_hash_store(deps: Deps, hash: Binary) -> StdResult<HasHashStoreResponse> {
    let hash = parse_hash(hash.as_slice())?;
    Ok(HasHashStoreResponse {
        stored: replay::is_stored(deps.storage, &hash),
    })
}

#[allow(clippy::too_many_arguments)]
pub fn query_withdraw_report_hash(
    deps: Deps,
    lock_chain: u64,
    unlock_chain: u64,
    account: String,
    lock_counter: Uint256,
    amount: Uint256,
    nonce: u64,
) -> StdResult<ReportHashResponse> {
    let config = CONFIG.load(deps.storage)?;
    let account = deps.api.addr_validate(&account)?;
    let report = WithdrawReport {
        variant: config.variant,
        lock_chain,
        unlock_chain,
        account: encode_account(deps.api, &account)?,
        lock_counter,
        amount,
        nonce,
    };
    Ok(ReportHashResponse {
        report_hash: Binary::from(report.hash().to_vec()),
        event_hash: Binary::from(report.event_hash().to_vec()),
    })
}

pub fn query_unlock_report_hash(
    deps: Deps,
    unlock_chain: u64,
    lock_chain: u64,
    account: String,
    unlock_counter: Uint256,
) -> StdResult<ReportHashResponse> {
    let config = CONFIG.load(deps.storage)?;
    let account = deps.api.addr_validate(&account)?;
    let report = UnlockReport {
        variant: config.variant,
        unlock_chain,
        lock_chain,
        account: encode_account(deps.api, &account)?,
        unlock_counter,
    };
    Ok(ReportHashResponse {
        report_hash: Binary::from(report.hash().to_vec()),
        event_hash: Binary::from(report.event_hash().to_vec()),
    })
}
