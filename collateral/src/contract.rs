//! Collateral Ledger Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::collaborators::{AccessWhitelistContract, ProofVerifierContract};
use crate::error::ContractError;
use crate::execute::{
    execute_approve_unlock, execute_cancel_lock, execute_commit_lock, execute_deposit,
    execute_multicall, execute_receive, execute_reject_unlock,
    execute_report_unlock_counter_update, execute_report_withdraw, execute_skip_withdraw,
    execute_update_unlock_counter, execute_withdraw,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_balance, query_balance_by_token, query_balance_token_by_index,
    query_balance_token_decimals, query_balance_token_index, query_balance_tokens,
    query_config, query_counters, query_external_unlock_counter, query_has_hash_store,
    query_is_balance_token, query_lock_counter, query_lock_withdraw_nonce,
    query_unlock_counter, query_unlock_report_hash, query_unlock_withdraw_nonce,
    query_withdraw_report_hash,
};
use crate::registry::register_balance_tokens;
use crate::state::{Config, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, MAX_LEDGER_DECIMALS};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.decimals > MAX_LEDGER_DECIMALS {
        return Err(ContractError::InvalidLedgerDecimals {
            decimals: msg.decimals,
            max: MAX_LEDGER_DECIMALS,
        });
    }

    let config = Config {
        decimals: msg.decimals,
        variant: msg.variant,
        chain_id: msg.chain_id,
        proof_verifier: deps.api.addr_validate(&msg.proof_verifier)?,
        access_whitelist: deps.api.addr_validate(&msg.access_whitelist)?,
    };
    CONFIG.save(deps.storage, &config)?;

    let tokens =
        register_balance_tokens(deps.storage, deps.api, &msg.balance_tokens, msg.decimals)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("decimals", config.decimals.to_string())
        .add_attribute("chain_id", config.chain_id.to_string())
        .add_attribute("token_count", tokens.len().to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Multicall { calls } => execute_multicall(deps, env, info, calls),
        msg => dispatch(deps, env, info, msg),
    }
}

/// Route a single (non-batch) execute message.
pub(crate) fn dispatch(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let verifier = ProofVerifierContract {
        querier: deps.querier,
        address: &config.proof_verifier,
    };
    let whitelist = AccessWhitelistContract {
        querier: deps.querier,
        address: &config.access_whitelist,
    };

    match msg {
        // Deposits
        ExecuteMsg::Receive(msg) => execute_receive(deps, info, msg),
        ExecuteMsg::Deposit {
            token,
            amount,
            lock_chain,
        } => execute_deposit(deps, env, info, token, amount, lock_chain),

        // Withdrawals
        ExecuteMsg::Withdraw {
            token,
            amount,
            lock_chain,
            lock_counter,
            proof,
        } => execute_withdraw(
            deps,
            &config,
            &verifier,
            info,
            token,
            amount,
            lock_chain,
            lock_counter,
            proof,
        ),
        ExecuteMsg::SkipWithdraw {
            lock_chain,
            from_nonce,
            to_nonce,
        } => execute_skip_withdraw(deps, info, lock_chain, from_nonce, to_nonce),
        ExecuteMsg::ReportWithdraw {
            amount,
            unlock_chain,
        } => execute_report_withdraw(deps, &config, info, amount, unlock_chain),

        // Unlock counter reports
        ExecuteMsg::ReportUnlockCounterUpdate {
            account,
            lock_chain,
        } => execute_report_unlock_counter_update(deps, &config, account, lock_chain),
        ExecuteMsg::UpdateUnlockCounter {
            account,
            unlock_chain,
            unlock_counter,
            proof,
        } => execute_update_unlock_counter(
            deps,
            &config,
            &verifier,
            account,
            unlock_chain,
            unlock_counter,
            proof,
        ),

        // Protocol operations
        ExecuteMsg::CommitLock {
            account,
            amount,
            lock_chain,
            lock_counter,
        } => execute_commit_lock(
            deps,
            &whitelist,
            info,
            account,
            amount,
            lock_chain,
            lock_counter,
        ),
        ExecuteMsg::CancelLock {
            account,
            amount,
            lock_chain,
        } => execute_cancel_lock(deps, &whitelist, info, account, amount, lock_chain),
        ExecuteMsg::ApproveUnlock {
            account,
            amount,
            lock_chain,
        } => execute_approve_unlock(deps, &whitelist, info, account, amount, lock_chain),
        ExecuteMsg::RejectUnlock {
            account,
            amount,
            lock_chain,
            recipient,
        } => execute_reject_unlock(
            deps,
            &config,
            &whitelist,
            info,
            account,
            amount,
            lock_chain,
            recipient,
        ),

        ExecuteMsg::Multicall { .. } => Err(ContractError::InvalidMulticall {
            reason: "nested multicall".to_string(),
        }),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),

        // Ledger
        QueryMsg::Balance {
            account,
            lock_chain,
        } => to_json_binary(&query_balance(deps, account, lock_chain)?),
        QueryMsg::BalanceByToken {
            account,
            lock_chain,
            token,
        } => to_json_binary(&query_balance_by_token(deps, account, lock_chain, token)?),

        // Counters
        QueryMsg::UnlockCounter {
            account,
            lock_chain,
        } => to_json_binary(&query_unlock_counter(deps, account, lock_chain)?),
        QueryMsg::LockCounter {
            account,
            lock_chain,
        } => to_json_binary(&query_lock_counter(deps, account, lock_chain)?),
        QueryMsg::UnlockWithdrawNonce {
            account,
            lock_chain,
        } => to_json_binary(&query_unlock_withdraw_nonce(deps, account, lock_chain)?),
        QueryMsg::LockWithdrawNonce {
            account,
            lock_chain,
        } => to_json_binary(&query_lock_withdraw_nonce(deps, account, lock_chain)?),
        QueryMsg::ExternalUnlockCounter {
            account,
            lock_chain,
        } => to_json_binary(&query_external_unlock_counter(deps, account, lock_chain)?),
        QueryMsg::Counters {
            account,
            lock_chain,
        } => to_json_binary(&query_counters(deps, account, lock_chain)?),

        // Registry
        QueryMsg::IsBalanceToken { token } => {
            to_json_binary(&query_is_balance_token(deps, token)?)
        }
        QueryMsg::BalanceTokenIndex { token } => {
            to_json_binary(&query_balance_token_index(deps, token)?)
        }
        QueryMsg::BalanceTokenDecimals { token } => {
            to_json_binary(&query_balance_token_decimals(deps, token)?)
        }
        QueryMsg::BalanceTokenByIndex { index } => {
            to_json_binary(&query_balance_token_by_index(deps, index)?)
        }
        QueryMsg::BalanceTokens {} => to_json_binary(&query_balance_tokens(deps)?),

        // Reports
        QueryMsg::HasHashStore { hash } => to_json_binary(&query_has_hash_store(deps, hash)?),
        QueryMsg::WithdrawReportHash {
            lock_chain,
            unlock_chain,
            account,
            lock_counter,
            amount,
            nonce,
        } => to_json_binary(&query_withdraw_report_hash(
            deps,
            lock_chain,
            unlock_chain,
            account,
            lock_counter,
            amount,
            nonce,
        )?),
        QueryMsg::UnlockReportHash {
            unlock_chain,
            lock_chain,
            account,
            unlock_counter,
        } => to_json_binary(&query_unlock_report_hash(
            deps,
            unlock_chain,
            lock_chain,
            account,
            unlock_counter,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
