//! State definitions for the collateral ledger contract
//!
//! All per-account state is keyed by `(account, chain)`. Entries are created
//! lazily and read as zero when absent.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint256};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:collateral-ledger";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Largest ledger precision whose scaling factor fits in 256 bits
pub const MAX_LEDGER_DECIMALS: u8 = 77;

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Decimals of the unified accounting unit
    pub decimals: u8,
    /// Deployment variant hashed into every report
    pub variant: Uint256,
    /// This chain's identifier as used in report hashes
    pub chain_id: u64,
    /// Cross-chain event proof verifier
    pub proof_verifier: Addr,
    /// Access whitelist consulted by protocol gated operations
    pub access_whitelist: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

// ============================================================================
// Balance Token Registry
// ============================================================================

/// A registered collateral token
#[cw_serde]
pub struct BalanceToken {
    /// cw20 contract address
    pub address: Addr,
    /// Native decimals of the token
    pub decimals: u8,
}

/// Registered tokens in index order, fixed at instantiation
pub const BALANCE_TOKENS: Item<Vec<BalanceToken>> = Item::new("balance_tokens");

/// token address => index into `BALANCE_TOKENS`
pub const BALANCE_TOKEN_INDEX: Map<&Addr, u32> = Map::new("balance_token_index");

// ============================================================================
// Collateral Ledger
// ============================================================================

/// (account, chain) => total unified balance
pub const TOTAL_BALANCES: Map<(&Addr, u64), Uint256> = Map::new("total_balances");

/// (account, chain, token index) => unified balance of one token
pub const TOKEN_BALANCES: Map<(&Addr, u64, u32), Uint256> = Map::new("token_balances");

// ============================================================================
// Counter State
// ============================================================================

/// Counters of one (account, chain) pair
#[cw_serde]
#[derive(Default)]
pub struct Counters {
    /// Cumulative unified amount unlocked (deposits included)
    pub unlock_counter: Uint256,
    /// Cumulative unified amount locked
    pub lock_counter: Uint256,
    /// Next withdraw report nonce expected from the lock chain
    pub unlock_withdraw_nonce: u64,
    /// Next withdraw report nonce issued by this ledger
    pub lock_withdraw_nonce: u64,
    /// Latest unlock counter proven from the unlock chain
    pub external_unlock_counter: Uint256,
}

pub const COUNTERS: Map<(&Addr, u64), Counters> = Map::new("counters");

// ============================================================================
// Hash Store
// ============================================================================

/// Event hashes of issued and consumed reports
pub const HASH_STORE: Map<&[u8], bool> = Map::new("hash_store");
