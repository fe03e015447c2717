//! Deposit handlers.
//!
//! Deposits credit the unified amount to the token balance, the total
//! balance and the unlock counter of `(account, lock_chain)`.

use cosmwasm_std::{
    from_json, to_json_binary, Addr, CosmosMsg, DepsMut, Env, MessageInfo, Response, Storage,
    Uint128, Uint256, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};

use crate::error::ContractError;
use crate::ledger::{credit, load_counters, save_counters};
use crate::msg::ReceiveMsg;
use crate::normalize::to_unified;
use crate::registry::token_by_address;
use crate::state::CONFIG;

/// Credit a deposit and return its unified amount.
fn credit_deposit(
    storage: &mut dyn Storage,
    account: &Addr,
    token: &Addr,
    amount: Uint128,
    lock_chain: u64,
) -> Result<Uint256, ContractError> {
    let config = CONFIG.load(storage)?;
    let (index, balance_token) = token_by_address(storage, token)?;
    let unified = to_unified(amount, config.decimals, balance_token.decimals)?;

    credit(storage, account, lock_chain, index, unified)?;

    let mut counters = load_counters(storage, account, lock_chain)?;
    counters.unlock_counter = counters.unlock_counter.checked_add(unified)?;
    save_counters(storage, account, lock_chain, &counters)?;

    Ok(unified)
}

fn deposit_response(account: &Addr, token: &Addr, unified: Uint256, lock_chain: u64) -> Response {
    Response::new()
        .add_attribute("action", "deposit")
        .add_attribute("account", account)
        .add_attribute("token", token)
        .add_attribute("amount", unified.to_string())
        .add_attribute("lock_chain", lock_chain.to_string())
}

/// Deposit via cw20 `Send`. The sending token contract is `info.sender`.
pub fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let token = info.sender;
    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;

    match receive_msg {
        ReceiveMsg::Deposit {
            lock_chain,
            account,
        } => {
            let account = match account {
                Some(account) => deps.api.addr_validate(&account)?,
                None => deps.api.addr_validate(&cw20_msg.sender)?,
            };

            // Unregistered tokens must fail even for empty sends
            token_by_address(deps.storage, &token)?;
            if cw20_msg.amount.is_zero() {
                return Ok(Response::new().add_attribute("action", "deposit"));
            }

            let unified =
                credit_deposit(deps.storage, &account, &token, cw20_msg.amount, lock_chain)?;
            Ok(deposit_response(&account, &token, unified, lock_chain))
        }
    }
}

/// Deposit by pulling tokens from an allowance granted to this contract.
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    token: String,
    amount: Uint128,
    lock_chain: u64,
) -> Result<Response, ContractError> {
    let token = deps.api.addr_validate(&token)?;
    token_by_address(deps.storage, &token)?;

    if amount.is_zero() {
        return Ok(Response::new().add_attribute("action", "deposit"));
    }

    let unified = credit_deposit(deps.storage, &info.sender, &token, amount, lock_chain)?;

    let pull_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount,
        })?,
        funds: vec![],
    });

    Ok(deposit_response(&info.sender, &token, unified, lock_chain).add_message(pull_msg))
}
