//! Balance token registry.
//!
//! The registry is an ordered list of cw20 tokens fixed at instantiation.
//! Tokens may be supplied in packed form, a 256-bit word holding the
//! canonical token address in the bits above the low byte and the token
//! decimals in the low byte.
//!
//! # Packed Layout (32 bytes, big-endian)
//! - Bytes 0-10:  zero
//! - Bytes 11-30: canonical address (20 bytes)
//! - Byte 31:     decimals
//!
//! The packed form only holds 160-bit canonical addresses. cw20 contracts on
//! Terra canonicalize to 32 bytes and register through the explicit form.

use cosmwasm_std::{Addr, Api, CanonicalAddr, Storage, Uint256};

use crate::error::ContractError;
use crate::msg::BalanceTokenInit;
use crate::state::{BalanceToken, BALANCE_TOKENS, BALANCE_TOKEN_INDEX};

/// Address width of a packed token (160 bits)
pub const PACKED_ADDRESS_LEN: usize = 20;

/// Pack a canonical address and decimals into one word.
pub fn pack_balance_token(address: &[u8], decimals: u32) -> Result<Uint256, ContractError> {
    if address.len() > PACKED_ADDRESS_LEN {
        return Err(ContractError::InvalidTokenAddress {
            reason: format!("{} bytes exceeds 160 bits", address.len()),
        });
    }
    let decimals =
        u8::try_from(decimals).map_err(|_| ContractError::InvalidTokenDecimals { decimals })?;

    let mut word = [0u8; 32];
    word[31 - address.len()..31].copy_from_slice(address);
    word[31] = decimals;
    Ok(Uint256::from_be_bytes(word))
}

/// Split a packed word into its 20-byte address and decimals.
pub fn unpack_balance_token(
    packed: Uint256,
) -> Result<([u8; PACKED_ADDRESS_LEN], u8), ContractError> {
    let word = packed.to_be_bytes();
    if word[..11].iter().any(|b| *b != 0) {
        return Err(ContractError::InvalidTokenAddress {
            reason: "packed address exceeds 160 bits".to_string(),
        });
    }
    let mut address = [0u8; PACKED_ADDRESS_LEN];
    address.copy_from_slice(&word[11..31]);
    Ok((address, word[31]))
}

/// Resolve one instantiate entry into a validated token.
fn resolve_balance_token(
    api: &dyn Api,
    init: &BalanceTokenInit,
    ledger_decimals: u8,
) -> Result<BalanceToken, ContractError> {
    let (address, decimals) = match init {
        BalanceTokenInit::Packed(packed) => {
            let (bytes, decimals) = unpack_balance_token(*packed)?;
            let address = api
                .addr_humanize(&CanonicalAddr::from(bytes.to_vec()))
                .map_err(|e| ContractError::InvalidTokenAddress {
                    reason: e.to_string(),
                })?;
            (address, decimals)
        }
        BalanceTokenInit::Token { address, decimals } => (api.addr_validate(address)?, *decimals),
    };

    if decimals > ledger_decimals {
        return Err(ContractError::InvalidTokenDecimals {
            decimals: decimals as u32,
        });
    }

    Ok(BalanceToken { address, decimals })
}

/// Register the token list. Only called from instantiate.
pub fn register_balance_tokens(
    storage: &mut dyn Storage,
    api: &dyn Api,
    inits: &[BalanceTokenInit],
    ledger_decimals: u8,
) -> Result<Vec<BalanceToken>, ContractError> {
    if inits.is_empty() {
        return Err(ContractError::EmptyBalanceTokens);
    }

    let mut tokens = Vec::with_capacity(inits.len());
    for (index, init) in inits.iter().enumerate() {
        let token = resolve_balance_token(api, init, ledger_decimals)?;
        if BALANCE_TOKEN_INDEX.has(storage, &token.address) {
            return Err(ContractError::DuplicateBalanceToken {
                token: token.address.to_string(),
            });
        }
        BALANCE_TOKEN_INDEX.save(storage, &token.address, &(index as u32))?;
        tokens.push(token);
    }

    BALANCE_TOKENS.save(storage, &tokens)?;
    Ok(tokens)
}

/// Index of a registered token, `UnknownToken` otherwise.
pub fn index_of(storage: &dyn Storage, token: &Addr) -> Result<u32, ContractError> {
    BALANCE_TOKEN_INDEX
        .may_load(storage, token)?
        .ok_or_else(|| ContractError::UnknownToken {
            token: token.to_string(),
        })
}

/// Look up a registered token by address, returning its index and entry.
pub fn token_by_address(
    storage: &dyn Storage,
    token: &Addr,
) -> Result<(u32, BalanceToken), ContractError> {
    let index = index_of(storage, token)?;
    let token = token_by_index(storage, index)?;
    Ok((index, token))
}

/// Registered token at `index`.
pub fn token_by_index(storage: &dyn Storage, index: u32) -> Result<BalanceToken, ContractError> {
    BALANCE_TOKENS
        .load(storage)?
        .into_iter()
        .nth(index as usize)
        .ok_or_else(|| ContractError::UnknownToken {
            token: format!("index {}", index),
        })
}
