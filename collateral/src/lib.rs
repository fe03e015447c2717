//! Collateral Ledger - Cross-Chain Collateral Accounting for CosmWasm
//!
//! Accounts deposit cw20 collateral on this chain. A protocol on a
//! counterpart chain locks and unlocks against it, and withdrawals are paid
//! out only when a proven withdraw report from that chain is covered by the
//! unlock counter kept here.
//!
//! # Accounting
//! - Every token is normalized to one unified precision (`normalize`)
//! - Balances are kept per `(account, chain)` and per token (`ledger`)
//! - Counters gate locks and withdrawals (`state::Counters`)
//! - Rejected unlocks drain tokens in registry order (`drain`)
//!
//! # Reports
//! Withdraw and unlock reports are hashed (`hash`) for the counterpart
//! chain's verifier. Issued and consumed reports are recorded in the hash
//! store (`replay`) so none is processed twice.

pub mod collaborators;
pub mod contract;
pub mod drain;
pub mod error;
mod execute;
pub mod hash;
pub mod ledger;
pub mod msg;
pub mod normalize;
mod query;
pub mod registry;
pub mod replay;
pub mod state;

pub use crate::error::ContractError;
pub use crate::hash::{keccak256, UnlockReport, WithdrawReport};
