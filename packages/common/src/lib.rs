//! Common - Shared Interfaces for the Collateral Ledger Contracts
//!
//! The collateral contract consults two external collaborators through smart
//! queries. Their wire formats live here so that the contracts, off-chain
//! tooling and test mocks agree on a single definition.

pub mod proof;
pub mod whitelist;

pub use proof::{ProofVerifierQueryMsg, VerifyProofResponse};
pub use whitelist::{AccessWhitelistQueryMsg, IsApprovedResponse};
