//! Error types for the collateral ledger contract

use cosmwasm_std::{
    ConversionOverflowError, DivideByZeroError, OverflowError, StdError, Uint256,
};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    ConversionOverflow(#[from] ConversionOverflowError),

    #[error("{0}")]
    DivideByZero(#[from] DivideByZeroError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized lock access: {protocol} is not approved for {account}")]
    UnauthorizedLockAccess { account: String, protocol: String },

    #[error("Unauthorized unlock access: {protocol} is not approved for {account}")]
    UnauthorizedUnlockAccess { account: String, protocol: String },

    // ========================================================================
    // Allowance Errors
    // ========================================================================

    #[error("Withdraw refused")]
    WithdrawRefusal,

    #[error("Lock refused")]
    LockRefusal,

    #[error("Cannot cancel {requested} of locked {locked}")]
    LockCancelExceeded { locked: Uint256, requested: Uint256 },

    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        available: Uint256,
        requested: Uint256,
    },

    // ========================================================================
    // Sequencing Errors
    // ========================================================================

    #[error("Invalid withdraw skip: nonce is {nonce}, got {from_nonce}..={to_nonce}")]
    InvalidWithdrawSkip {
        nonce: u64,
        from_nonce: u64,
        to_nonce: u64,
    },

    #[error("Invalid unlock counter update")]
    InvalidUnlockUpdate,

    #[error("Report already stored: {hash}")]
    ReportReplayed { hash: String },

    // ========================================================================
    // Registry Errors
    // ========================================================================

    #[error("Unknown token: {token}")]
    UnknownToken { token: String },

    #[error("Invalid token address: {reason}")]
    InvalidTokenAddress { reason: String },

    #[error("Invalid token decimals: {decimals}")]
    InvalidTokenDecimals { decimals: u32 },

    #[error("Duplicate balance token: {token}")]
    DuplicateBalanceToken { token: String },

    #[error("At least one balance token required")]
    EmptyBalanceTokens,

    #[error("Invalid ledger decimals: {decimals} (max {max})")]
    InvalidLedgerDecimals { decimals: u8, max: u8 },

    // ========================================================================
    // Message Errors
    // ========================================================================

    #[error("Invalid multicall: {reason}")]
    InvalidMulticall { reason: String },
}
