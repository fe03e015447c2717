//! Message types for the collateral ledger contract
//!
//! This module defines all messages for instantiation, execution, and queries.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128, Uint256};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// A balance token as supplied at instantiation
#[cw_serde]
pub enum BalanceTokenInit {
    /// `canonical_address << 8 | decimals`
    ///
    /// Only 160-bit (EVM-style) canonical addresses fit. Terra cw20 contract
    /// addresses canonicalize to 32 bytes, so deployed tokens use `Token`.
    Packed(Uint256),
    /// Token address and native decimals
    Token { address: String, decimals: u8 },
}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Decimals of the unified accounting unit (usually 18)
    pub decimals: u8,
    /// Deployment variant hashed into every report
    pub variant: Uint256,
    /// This chain's identifier as used in report hashes
    pub chain_id: u64,
    /// Supported collateral tokens, in index order
    pub balance_tokens: Vec<BalanceTokenInit>,
    /// Proof verifier contract
    pub proof_verifier: String,
    /// Access whitelist contract
    pub access_whitelist: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Deposits
    // ========================================================================
    /// Deposit cw20 tokens (called via cw20 send)
    Receive(cw20::Cw20ReceiveMsg),

    /// Deposit cw20 tokens from an existing allowance
    Deposit {
        token: String,
        /// Native token amount
        amount: Uint128,
        lock_chain: u64,
    },

    // ========================================================================
    // Withdrawals
    // ========================================================================
    /// Withdraw against a proven withdraw report from `lock_chain`
    Withdraw {
        token: String,
        /// Unified amount
        amount: Uint256,
        lock_chain: u64,
        /// Lock counter claimed by the report
        lock_counter: Uint256,
        /// Proof handed to the proof verifier
        proof: Binary,
    },

    /// Skip withdraw nonces `from_nonce..=to_nonce` of the caller
    SkipWithdraw {
        lock_chain: u64,
        from_nonce: u64,
        to_nonce: u64,
    },

    /// Self-report a withdrawal towards `unlock_chain`
    ReportWithdraw {
        /// Unified amount
        amount: Uint256,
        unlock_chain: u64,
    },

    // ========================================================================
    // Unlock Counter Reports
    // ========================================================================
    /// Publish the current unlock counter of `account`
    ReportUnlockCounterUpdate { account: String, lock_chain: u64 },

    /// Accept a proven unlock counter from `unlock_chain`
    UpdateUnlockCounter {
        account: String,
        unlock_chain: u64,
        unlock_counter: Uint256,
        proof: Binary,
    },

    // ========================================================================
    // Protocol Operations (caller must be whitelisted by the account)
    // ========================================================================
    /// Raise the lock counter to exactly `lock_counter`
    CommitLock {
        account: String,
        amount: Uint256,
        lock_chain: u64,
        /// Expected lock counter after the commit
        lock_counter: Uint256,
    },

    CancelLock {
        account: String,
        amount: Uint256,
        lock_chain: u64,
    },

    ApproveUnlock {
        account: String,
        amount: Uint256,
        lock_chain: u64,
    },

    /// Pay out up to `amount` of collateral to `recipient`
    RejectUnlock {
        account: String,
        amount: Uint256,
        lock_chain: u64,
        recipient: String,
    },

    // ========================================================================
    // Batching
    // ========================================================================
    /// Execute calls in order; any failure reverts all of them
    Multicall { calls: Vec<ExecuteMsg> },
}

/// Messages accepted through the cw20 receive hook
#[cw_serde]
pub enum ReceiveMsg {
    /// Credit the sent tokens to `account` (default: the cw20 sender)
    Deposit {
        lock_chain: u64,
        account: Option<String>,
    },
}

// ============================================================================
// Query Messages
// ============================================================================

/// Reference to a balance token by address or registry index
#[cw_serde]
pub enum TokenRef {
    Address(String),
    Index(u32),
}

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get contract configuration
    #[returns(ConfigResponse)]
    Config {},

    // ========================================================================
    // Ledger
    // ========================================================================
    /// Total unified balance of an account
    #[returns(BalanceResponse)]
    Balance { account: String, lock_chain: u64 },

    /// Unified balance of one token
    #[returns(BalanceResponse)]
    BalanceByToken {
        account: String,
        lock_chain: u64,
        token: String,
    },

    // ========================================================================
    // Counters
    // ========================================================================
    #[returns(CounterResponse)]
    UnlockCounter { account: String, lock_chain: u64 },

    #[returns(CounterResponse)]
    LockCounter { account: String, lock_chain: u64 },

    #[returns(NonceResponse)]
    UnlockWithdrawNonce { account: String, lock_chain: u64 },

    #[returns(NonceResponse)]
    LockWithdrawNonce { account: String, lock_chain: u64 },

    #[returns(CounterResponse)]
    ExternalUnlockCounter { account: String, lock_chain: u64 },

    /// All counters of an account at once
    #[returns(CountersResponse)]
    Counters { account: String, lock_chain: u64 },

    // ========================================================================
    // Registry
    // ========================================================================
    #[returns(IsBalanceTokenResponse)]
    IsBalanceToken { token: String },

    #[returns(BalanceTokenIndexResponse)]
    BalanceTokenIndex { token: String },

    #[returns(BalanceTokenDecimalsResponse)]
    BalanceTokenDecimals { token: TokenRef },

    #[returns(BalanceTokenResponse)]
    BalanceTokenByIndex { index: u32 },

    /// Ledger decimals and every registered token
    #[returns(BalanceTokensResponse)]
    BalanceTokens {},

    // ========================================================================
    // Reports
    // ========================================================================
    /// Whether an event hash is in the hash store
    #[returns(HasHashStoreResponse)]
    HasHashStore { hash: Binary },

    /// Compute the hashes of a withdraw report
    #[returns(ReportHashResponse)]
    WithdrawReportHash {
        lock_chain: u64,
        unlock_chain: u64,
        account: String,
        lock_counter: Uint256,
        amount: Uint256,
        nonce: u64,
    },

    /// Compute the hashes of an unlock report
    #[returns(ReportHashResponse)]
    UnlockReportHash {
        unlock_chain: u64,
        lock_chain: u64,
        account: String,
        unlock_counter: Uint256,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub decimals: u8,
    pub variant: Uint256,
    pub chain_id: u64,
    pub proof_verifier: Addr,
    pub access_whitelist: Addr,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint256,
}

#[cw_serde]
pub struct CounterResponse {
    pub counter: Uint256,
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct CountersResponse {
    pub unlock_counter: Uint256,
    pub lock_counter: Uint256,
    pub unlock_withdraw_nonce: u64,
    pub lock_withdraw_nonce: u64,
    pub external_unlock_counter: Uint256,
}

#[cw_serde]
pub struct IsBalanceTokenResponse {
    pub is_balance_token: bool,
}

#[cw_serde]
pub struct BalanceTokenIndexResponse {
    pub index: u32,
}

#[cw_serde]
pub struct BalanceTokenDecimalsResponse {
    pub decimals: u8,
}

#[cw_serde]
pub struct BalanceTokenResponse {
    pub index: u32,
    pub address: Addr,
    pub decimals: u8,
}

#[cw_serde]
pub struct BalanceTokensResponse {
    /// Ledger decimals
    pub decimals: u8,
    pub tokens: Vec<BalanceTokenResponse>,
}

#[cw_serde]
pub struct HasHashStoreResponse {
    pub stored: bool,
}

#[cw_serde]
pub struct ReportHashResponse {
    pub report_hash: Binary,
    /// Key used by the hash store
    pub event_hash: Binary,
}
