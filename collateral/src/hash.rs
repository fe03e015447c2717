//! Report hash computation for cross-chain verification
//!
//! Reports are hashed as `keccak256(abi.encode(...))`: every field occupies
//! one 32-byte word, integers big-endian and left-padded. The counterpart
//! chain's verifier computes the same words in the same order.
//!
//! # Withdraw Report (224 bytes)
//! - Bytes 0-31:    variant
//! - Bytes 32-63:   lock chain
//! - Bytes 64-95:   unlock chain
//! - Bytes 96-127:  account
//! - Bytes 128-159: lock counter
//! - Bytes 160-191: amount
//! - Bytes 192-223: nonce
//!
//! # Unlock Report (160 bytes)
//! - Bytes 0-31:    variant
//! - Bytes 32-63:   unlock chain
//! - Bytes 64-95:   lock chain
//! - Bytes 96-127:  account
//! - Bytes 128-159: unlock counter
//!
//! The hash store keys on the event hash, `keccak256(signature ++ report_hash)`.

use cosmwasm_std::{Addr, Api, StdError, StdResult, Uint256};
use tiny_keccak::{Hasher, Keccak};

/// keccak256("WithdrawReport(bytes32)")
pub const WITHDRAW_REPORT_SIGNATURE: [u8; 32] = [
    0x33, 0x21, 0xa6, 0x89, 0x26, 0x54, 0x33, 0x74, 0x5b, 0x47, 0xed, 0x94, 0xc0, 0x36, 0x90, 0xfb,
    0xe2, 0x69, 0x97, 0xcd, 0xa5, 0x46, 0x6a, 0xc8, 0xa0, 0x9e, 0x44, 0x35, 0x13, 0x3f, 0x41, 0x0d,
];

/// keccak256("UnlockReport(bytes32)")
pub const UNLOCK_REPORT_SIGNATURE: [u8; 32] = [
    0xb6, 0x6a, 0xf5, 0x13, 0xd3, 0xdb, 0xb1, 0x83, 0x0e, 0x0b, 0x73, 0x2f, 0xb4, 0x80, 0xb6, 0x37,
    0x78, 0x1c, 0x76, 0x84, 0x9c, 0xfb, 0x48, 0xda, 0x24, 0x32, 0xc0, 0xeb, 0xd3, 0x89, 0xab, 0xf7,
];

/// Fields of a withdraw report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawReport {
    pub variant: Uint256,
    pub lock_chain: u64,
    pub unlock_chain: u64,
    pub account: [u8; 32],
    pub lock_counter: Uint256,
    pub amount: Uint256,
    pub nonce: u64,
}

/// Fields of an unlock counter report
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlockReport {
    pub variant: Uint256,
    pub unlock_chain: u64,
    pub lock_chain: u64,
    pub account: [u8; 32],
    pub unlock_counter: Uint256,
}

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

impl WithdrawReport {
    pub fn hash(&self) -> [u8; 32] {
        let mut data = [0u8; 224];
        data[0..32].copy_from_slice(&self.variant.to_be_bytes());
        data[32..64].copy_from_slice(&u64_word(self.lock_chain));
        data[64..96].copy_from_slice(&u64_word(self.unlock_chain));
        data[96..128].copy_from_slice(&self.account);
        data[128..160].copy_from_slice(&self.lock_counter.to_be_bytes());
        data[160..192].copy_from_slice(&self.amount.to_be_bytes());
        data[192..224].copy_from_slice(&u64_word(self.nonce));
        keccak256(&data)
    }

    pub fn event_hash(&self) -> [u8; 32] {
        event_hash(&WITHDRAW_REPORT_SIGNATURE, &self.hash())
    }
}

impl UnlockReport {
    pub fn hash(&self) -> [u8; 32] {
        let mut data = [0u8; 160];
        data[0..32].copy_from_slice(&self.variant.to_be_bytes());
        data[32..64].copy_from_slice(&u64_word(self.unlock_chain));
        data[64..96].copy_from_slice(&u64_word(self.lock_chain));
        data[96..128].copy_from_slice(&self.account);
        data[128..160].copy_from_slice(&self.unlock_counter.to_be_bytes());
        keccak256(&data)
    }

    pub fn event_hash(&self) -> [u8; 32] {
        event_hash(&UNLOCK_REPORT_SIGNATURE, &self.hash())
    }
}

/// Hash identifying an emitted report event
pub fn event_hash(signature: &[u8; 32], report_hash: &[u8; 32]) -> [u8; 32] {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(signature);
    data[32..].copy_from_slice(report_hash);
    keccak256(&data)
}

/// Encode an account as a 32-byte word.
///
/// Canonical addresses up to 32 bytes are left-padded, longer ones are
/// replaced by their keccak256 digest.
pub fn encode_account(api: &dyn Api, account: &Addr) -> StdResult<[u8; 32]> {
    let canonical = api.addr_canonicalize(account.as_str())?;
    let bytes = canonical.as_slice();
    if bytes.len() > 32 {
        return Ok(keccak256(bytes));
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(word)
}

/// Convert bytes32 to a 0x-prefixed hex string
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a 32-byte hash from raw bytes
pub fn parse_hash(bytes: &[u8]) -> StdResult<[u8; 32]> {
    bytes
        .try_into()
        .map_err(|_| StdError::generic_err(format!("expected 32 bytes, got {}", bytes.len())))
}
