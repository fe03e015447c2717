//! Proof verifier interface.
//!
//! A verifier answers whether an event with `signature` and data `hash` was
//! emitted on `chain`, given an opaque `proof`.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Binary;

#[cw_serde]
#[derive(QueryResponses)]
pub enum ProofVerifierQueryMsg {
    /// Verify a hash event proof originating on `chain`
    #[returns(VerifyProofResponse)]
    VerifyHashEventProof {
        /// 32-byte event signature
        signature: Binary,
        /// 32-byte event data hash
        hash: Binary,
        /// Origin chain of the event
        chain: u64,
        /// Verifier specific proof payload
        proof: Binary,
    },
}

#[cw_serde]
pub struct VerifyProofResponse {
    pub verified: bool,
}
