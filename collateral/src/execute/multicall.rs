//! Batched execution.
//!
//! Calls run in order against the same storage. The first error aborts the
//! batch and the transaction reverts every change made by earlier calls.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::contract::dispatch;
use crate::error::ContractError;
use crate::msg::ExecuteMsg;

pub fn execute_multicall(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    calls: Vec<ExecuteMsg>,
) -> Result<Response, ContractError> {
    let mut response = Response::new()
        .add_attribute("action", "multicall")
        .add_attribute("calls", calls.len().to_string());

    for call in calls {
        match call {
            ExecuteMsg::Multicall { .. } => {
                return Err(ContractError::InvalidMulticall {
                    reason: "nested multicall".to_string(),
                })
            }
            // The sender of a receive hook is the token, never the batch caller
            ExecuteMsg::Receive(_) => {
                return Err(ContractError::InvalidMulticall {
                    reason: "receive hook cannot be batched".to_string(),
                })
            }
            call => {
                let res = dispatch(deps.branch(), env.clone(), info.clone(), call)?;
                response = response
                    .add_submessages(res.messages)
                    .add_attributes(res.attributes)
                    .add_events(res.events);
            }
        }
    }

    Ok(response)
}
