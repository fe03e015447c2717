//! Access whitelist interface.

use cosmwasm_schema::{cw_serde, QueryResponses};

/// Subset of the whitelist query API the collateral ledger depends on.
///
/// Any contract whose query message accepts `{"is_approved": {...}}` can act
/// as the whitelist.
#[cw_serde]
#[derive(QueryResponses)]
pub enum AccessWhitelistQueryMsg {
    /// Whether `protocol` may lock or unlock on behalf of `account`
    #[returns(IsApprovedResponse)]
    IsApproved { account: String, protocol: String },
}

#[cw_serde]
pub struct IsApprovedResponse {
    pub approved: bool,
}
