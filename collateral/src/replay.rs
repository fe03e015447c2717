//! Replay guard over the report hash store.
//!
//! Every report this ledger issues or consumes is recorded by event hash.
//! A report can be consumed only if its event hash was never recorded.

use cosmwasm_std::Storage;

use crate::error::ContractError;
use crate::hash::bytes32_to_hex;
use crate::state::HASH_STORE;

pub fn is_stored(storage: &dyn Storage, event_hash: &[u8; 32]) -> bool {
    HASH_STORE.has(storage, event_hash.as_slice())
}

/// Fails with `ReportReplayed` if the event hash is already recorded.
pub fn ensure_fresh(storage: &dyn Storage, event_hash: &[u8; 32]) -> Result<(), ContractError> {
    if is_stored(storage, event_hash) {
        return Err(ContractError::ReportReplayed {
            hash: bytes32_to_hex(event_hash),
        });
    }
    Ok(())
}

/// Record an issued or consumed report.
pub fn store(storage: &mut dyn Storage, event_hash: &[u8; 32]) -> Result<(), ContractError> {
    HASH_STORE.save(storage, event_hash.as_slice(), &true)?;
    Ok(())
}
