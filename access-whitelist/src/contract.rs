use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    Allowance, AllowanceResponse, ExecuteMsg, InstantiateMsg, IsApprovedResponse, MigrateMsg,
    OwnershipResponse, ProtocolAllowanceResponse, QueryMsg,
};
use crate::state::{
    ALLOWANCES, CONTRACT_NAME, CONTRACT_VERSION, OWNER, PENDING_OWNER, PROTOCOL_ALLOWANCES,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    OWNER.save(deps.storage, &owner)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::ApproveProtocol { protocol, approved } => {
            execute_approve_protocol(deps, info, protocol, approved)
        }
        ExecuteMsg::Approve {
            protocol,
            allowance,
        } => execute_approve(deps, info, protocol, allowance),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::AcceptOwnership {} => execute_accept_ownership(deps, info),
    }
}

fn execute_approve_protocol(
    deps: DepsMut,
    info: MessageInfo,
    protocol: String,
    approved: bool,
) -> Result<Response, ContractError> {
    let owner = OWNER.load(deps.storage)?;
    if info.sender != owner {
        return Err(ContractError::Unauthorized);
    }

    let protocol = deps.api.addr_validate(&protocol)?;
    let current = PROTOCOL_ALLOWANCES
        .may_load(deps.storage, &protocol)?
        .unwrap_or(false);
    if current == approved {
        return Err(ContractError::SameProtocolAllowance {
            protocol: protocol.to_string(),
        });
    }
    PROTOCOL_ALLOWANCES.save(deps.storage, &protocol, &approved)?;

    Ok(Response::new()
        .add_attribute("action", "approve_protocol")
        .add_attribute("protocol", protocol)
        .add_attribute("approved", approved.to_string()))
}

fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    protocol: String,
    allowance: Allowance,
) -> Result<Response, ContractError> {
    if allowance == Allowance::Revoked {
        return Err(ContractError::RevokeNotAllowed);
    }

    let protocol = deps.api.addr_validate(&protocol)?;
    let current = ALLOWANCES
        .may_load(deps.storage, (&info.sender, &protocol))?
        .unwrap_or_default();
    if current == allowance {
        return Err(ContractError::SameAllowance {
            protocol: protocol.to_string(),
        });
    }

    // A first grant needs the owner's approval; weak <-> strong does not
    if current == Allowance::Revoked
        && !PROTOCOL_ALLOWANCES
            .may_load(deps.storage, &protocol)?
            .unwrap_or(false)
    {
        return Err(ContractError::ProtocolNotApproved {
            protocol: protocol.to_string(),
        });
    }

    ALLOWANCES.save(deps.storage, (&info.sender, &protocol), &allowance)?;

    Ok(Response::new()
        .add_attribute("action", "approve")
        .add_attribute("account", info.sender)
        .add_attribute("protocol", protocol)
        .add_attribute("allowance", format!("{:?}", allowance)))
}

fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let owner = OWNER.load(deps.storage)?;
    if info.sender != owner {
        return Err(ContractError::Unauthorized);
    }

    let new_owner = deps.api.addr_validate(&new_owner)?;
    PENDING_OWNER.save(deps.storage, &new_owner)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_ownership")
        .add_attribute("pending_owner", new_owner))
}

fn execute_accept_ownership(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;
    if info.sender != pending {
        return Err(ContractError::Unauthorized);
    }

    OWNER.save(deps.storage, &pending)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "accept_ownership")
        .add_attribute("owner", pending))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::IsApproved { account, protocol } => {
            to_json_binary(&query_is_approved(deps, account, protocol)?)
        }
        QueryMsg::Allowance { account, protocol } => {
            to_json_binary(&query_allowance(deps, account, protocol)?)
        }
        QueryMsg::ProtocolAllowance { protocol } => {
            to_json_binary(&query_protocol_allowance(deps, protocol)?)
        }
        QueryMsg::Ownership {} => to_json_binary(&query_ownership(deps)?),
    }
}

fn query_allowance(deps: Deps, account: String, protocol: String) -> StdResult<AllowanceResponse> {
    let account = deps.api.addr_validate(&account)?;
    let protocol = deps.api.addr_validate(&protocol)?;
    let allowance = ALLOWANCES
        .may_load(deps.storage, (&account, &protocol))?
        .unwrap_or_default();
    Ok(AllowanceResponse { allowance })
}

fn query_protocol_allowance(deps: Deps, protocol: String) -> StdResult<ProtocolAllowanceResponse> {
    let protocol = deps.api.addr_validate(&protocol)?;
    let approved = PROTOCOL_ALLOWANCES
        .may_load(deps.storage, &protocol)?
        .unwrap_or(false);
    Ok(ProtocolAllowanceResponse { approved })
}

fn query_is_approved(
    deps: Deps,
    account: String,
    protocol: String,
) -> StdResult<IsApprovedResponse> {
    let allowance = query_allowance(deps, account, protocol.clone())?.allowance;
    let approved = match allowance {
        Allowance::ApprovedStrong => true,
        Allowance::ApprovedWeak => query_protocol_allowance(deps, protocol)?.approved,
        Allowance::Revoked => false,
    };
    Ok(IsApprovedResponse { approved })
}

fn query_ownership(deps: Deps) -> StdResult<OwnershipResponse> {
    Ok(OwnershipResponse {
        owner: OWNER.load(deps.storage)?,
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}
