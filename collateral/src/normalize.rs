//! Decimal normalization between native token amounts and the ledger's
//! unified accounting unit.
//!
//! A token with `d` decimals is scaled by `10^(ledger_decimals - d)`. Going
//! back to native units divides by the same factor and truncates; whatever
//! falls below one native unit stays on the ledger as dust.

use cosmwasm_std::{Uint128, Uint256};

use crate::error::ContractError;

/// Scaling factor `10^(ledger_decimals - token_decimals)`.
pub fn scale_factor(ledger_decimals: u8, token_decimals: u8) -> Result<Uint256, ContractError> {
    let exp = ledger_decimals
        .checked_sub(token_decimals)
        .ok_or(ContractError::InvalidTokenDecimals {
            decimals: token_decimals as u32,
        })?;
    Ok(Uint256::from(10u128).checked_pow(exp as u32)?)
}

/// Native amount to unified amount.
pub fn to_unified(
    native: Uint128,
    ledger_decimals: u8,
    token_decimals: u8,
) -> Result<Uint256, ContractError> {
    let factor = scale_factor(ledger_decimals, token_decimals)?;
    Ok(Uint256::from(native).checked_mul(factor)?)
}

/// Unified amount to native amount, truncating toward zero.
pub fn to_native(
    unified: Uint256,
    ledger_decimals: u8,
    token_decimals: u8,
) -> Result<Uint128, ContractError> {
    let factor = scale_factor(ledger_decimals, token_decimals)?;
    let native = unified.checked_div(factor)?;
    Ok(Uint128::try_from(native)?)
}
