//! Execute handlers for the collateral ledger contract.
//!
//! - `deposit` - cw20 receive hook and allowance deposits
//! - `withdraw` - inbound withdraw reports, nonce skipping, outbound reports
//! - `unlock_report` - unlock counter reports in both directions
//! - `protocol` - whitelisted lock/unlock operations and reject draining
//! - `multicall` - atomic batches of the above

mod deposit;
mod multicall;
mod protocol;
mod unlock_report;
mod withdraw;

pub use deposit::*;
pub use multicall::*;
pub use protocol::*;
pub use unlock_report::*;
pub use withdraw::*;
