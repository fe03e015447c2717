use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only owner can perform this action")]
    Unauthorized,

    #[error("No pending owner")]
    NoPendingOwner,

    #[error("Protocol allowance unchanged: {protocol}")]
    SameProtocolAllowance { protocol: String },

    #[error("Protocol not approved: {protocol}")]
    ProtocolNotApproved { protocol: String },

    #[error("Allowance unchanged for protocol {protocol}")]
    SameAllowance { protocol: String },

    #[error("Allowances cannot be revoked")]
    RevokeNotAllowed,
}
