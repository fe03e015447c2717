//! External collaborators consulted by the ledger.
//!
//! Both are read-only capabilities: the ledger asks a question, gets a
//! boolean, and never mutates them. Handlers take the traits so the gate
//! logic does not depend on how the answer is obtained.

use common::{
    AccessWhitelistQueryMsg, IsApprovedResponse, ProofVerifierQueryMsg, VerifyProofResponse,
};
use cosmwasm_std::{Addr, Binary, QuerierWrapper, StdResult};

pub trait ProofVerifier {
    /// Whether an event `(signature, hash)` was emitted on `chain`.
    fn verify_hash_event_proof(
        &self,
        signature: &[u8; 32],
        hash: &[u8; 32],
        chain: u64,
        proof: &Binary,
    ) -> StdResult<bool>;
}

pub trait AccessWhitelist {
    /// Whether `protocol` may lock or unlock on behalf of `account`.
    fn is_approved(&self, account: &Addr, protocol: &Addr) -> StdResult<bool>;
}

/// Proof verifier reached through a smart query
pub struct ProofVerifierContract<'a> {
    pub querier: QuerierWrapper<'a>,
    pub address: &'a Addr,
}

impl ProofVerifier for ProofVerifierContract<'_> {
    fn verify_hash_event_proof(
        &self,
        signature: &[u8; 32],
        hash: &[u8; 32],
        chain: u64,
        proof: &Binary,
    ) -> StdResult<bool> {
        let res: VerifyProofResponse = self.querier.query_wasm_smart(
            self.address,
            &ProofVerifierQueryMsg::VerifyHashEventProof {
                signature: Binary::from(signature.as_slice()),
                hash: Binary::from(hash.as_slice()),
                chain,
                proof: proof.clone(),
            },
        )?;
        Ok(res.verified)
    }
}

/// Access whitelist reached through a smart query
pub struct AccessWhitelistContract<'a> {
    pub querier: QuerierWrapper<'a>,
    pub address: &'a Addr,
}

impl AccessWhitelist for AccessWhitelistContract<'_> {
    fn is_approved(&self, account: &Addr, protocol: &Addr) -> StdResult<bool> {
        let res: IsApprovedResponse = self.querier.query_wasm_smart(
            self.address,
            &AccessWhitelistQueryMsg::IsApproved {
                account: account.to_string(),
                protocol: protocol.to_string(),
            },
        )?;
        Ok(res.approved)
    }
}
