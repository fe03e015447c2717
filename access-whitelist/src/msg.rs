use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

pub use common::IsApprovedResponse;

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: String,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Allowance an account grants to a protocol
#[cw_serde]
#[derive(Copy, Default)]
pub enum Allowance {
    #[default]
    Revoked,
    /// Valid while the owner keeps the protocol approved
    ApprovedWeak,
    /// Valid regardless of the owner's protocol approval
    ApprovedStrong,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Owner approves or revokes a protocol
    ApproveProtocol { protocol: String, approved: bool },
    /// Sender sets its own allowance for a protocol
    Approve {
        protocol: String,
        allowance: Allowance,
    },
    /// Owner proposes a new owner
    TransferOwnership { new_owner: String },
    /// Pending owner accepts ownership
    AcceptOwnership {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(IsApprovedResponse)]
    IsApproved { account: String, protocol: String },
    #[returns(AllowanceResponse)]
    Allowance { account: String, protocol: String },
    #[returns(ProtocolAllowanceResponse)]
    ProtocolAllowance { protocol: String },
    #[returns(OwnershipResponse)]
    Ownership {},
}

#[cw_serde]
pub struct AllowanceResponse {
    pub allowance: Allowance,
}

#[cw_serde]
pub struct ProtocolAllowanceResponse {
    pub approved: bool,
}

#[cw_serde]
pub struct OwnershipResponse {
    pub owner: Addr,
    pub pending_owner: Option<Addr>,
}
