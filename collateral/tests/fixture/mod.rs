//! Shared multi-test fixture for the collateral ledger.
//!
//! Deploys real cw20-base tokens, the access whitelist and a mock proof
//! verifier next to the collateral contract.

#![allow(dead_code)]

use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdResult,
    Uint128, Uint256,
};
use cw20::{BalanceResponse as Cw20BalanceResponse, Cw20Coin, Cw20ExecuteMsg, Cw20QueryMsg};
use cw_multi_test::{App, AppResponse, ContractWrapper, Executor};

use collateral::msg::{
    BalanceResponse, BalanceTokenInit, CountersResponse, ExecuteMsg, InstantiateMsg, QueryMsg,
    ReceiveMsg, ReportHashResponse,
};
use common::{ProofVerifierQueryMsg, VerifyProofResponse};

pub const THIS_CHAIN: u64 = 1;
pub const REMOTE_CHAIN: u64 = 2;
pub const OTHER_CHAIN: u64 = 3;
pub const VARIANT: u128 = 7;
pub const LEDGER_DECIMALS: u8 = 18;
pub const USER_TOKENS: u128 = 100_000_000_000_000_000;

// ============================================================================
// Contracts
// ============================================================================

pub fn contract_collateral() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        collateral::contract::execute,
        collateral::contract::instantiate,
        collateral::contract::query,
    );
    Box::new(contract)
}

fn contract_cw20() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    );
    Box::new(contract)
}

fn contract_whitelist() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        access_whitelist::contract::execute,
        access_whitelist::contract::instantiate,
        access_whitelist::contract::query,
    );
    Box::new(contract)
}

/// Proof verifier accepting exactly the proofs built by `mock_proof`
mod mock_verifier {
    use super::*;

    pub fn instantiate(_: DepsMut, _: Env, _: MessageInfo, _: Empty) -> StdResult<Response> {
        Ok(Response::new())
    }

    pub fn execute(_: DepsMut, _: Env, _: MessageInfo, _: Empty) -> StdResult<Response> {
        Ok(Response::new())
    }

    pub fn query(_: Deps, _: Env, msg: ProofVerifierQueryMsg) -> StdResult<Binary> {
        match msg {
            ProofVerifierQueryMsg::VerifyHashEventProof {
                signature,
                hash,
                chain,
                proof,
            } => {
                let expected = mock_proof(signature.as_slice(), hash.as_slice(), chain);
                to_json_binary(&VerifyProofResponse {
                    verified: proof == expected,
                })
            }
        }
    }
}

fn contract_verifier() -> Box<dyn cw_multi_test::Contract<Empty>> {
    let contract = ContractWrapper::new(
        mock_verifier::execute,
        mock_verifier::instantiate,
        mock_verifier::query,
    );
    Box::new(contract)
}

/// Proof the mock verifier accepts for `(signature, hash, chain)`
pub fn mock_proof(signature: &[u8], hash: &[u8], chain: u64) -> Binary {
    let mut bytes = Vec::with_capacity(72);
    bytes.extend_from_slice(signature);
    bytes.extend_from_slice(hash);
    bytes.extend_from_slice(&chain.to_be_bytes());
    Binary::from(bytes)
}

// ============================================================================
// Environment
// ============================================================================

pub struct TestEnv {
    pub app: App,
    pub collateral: Addr,
    pub whitelist: Addr,
    pub verifier: Addr,
    pub tokens: Vec<Addr>,
    pub owner: Addr,
    pub user: Addr,
    pub protocol: Addr,
    pub recipient: Addr,
}

pub fn instantiate_token(app: &mut App, holder: &Addr, symbol: &str, decimals: u8) -> Addr {
    let code_id = app.store_code(contract_cw20());
    app.instantiate_contract(
        code_id,
        holder.clone(),
        &cw20_base::msg::InstantiateMsg {
            name: format!("{} Token", symbol),
            symbol: symbol.to_string(),
            decimals,
            initial_balances: vec![Cw20Coin {
                address: holder.to_string(),
                amount: Uint128::from(USER_TOKENS),
            }],
            mint: None,
            marketing: None,
        },
        &[],
        "cw20",
        None,
    )
    .unwrap()
}

/// Deploy everything with one registered token per entry of `decimals`.
///
/// The protocol is approved by the whitelist owner and holds a strong
/// allowance from the user.
pub fn setup(decimals: &[u8]) -> TestEnv {
    let mut app = App::default();
    let owner = Addr::unchecked("terra1owner");
    let user = Addr::unchecked("terra1user");
    let protocol = Addr::unchecked("terra1protocol");
    let recipient = Addr::unchecked("terra1recipient");

    let symbols = ["TKA", "TKB", "TKC", "TKD"];
    let tokens: Vec<Addr> = decimals
        .iter()
        .zip(symbols.iter())
        .map(|(d, symbol)| instantiate_token(&mut app, &user, symbol, *d))
        .collect();

    let whitelist_code = app.store_code(contract_whitelist());
    let whitelist = app
        .instantiate_contract(
            whitelist_code,
            owner.clone(),
            &access_whitelist::msg::InstantiateMsg {
                owner: owner.to_string(),
            },
            &[],
            "whitelist",
            None,
        )
        .unwrap();

    let verifier_code = app.store_code(contract_verifier());
    let verifier = app
        .instantiate_contract(verifier_code, owner.clone(), &Empty {}, &[], "verifier", None)
        .unwrap();

    let collateral_code = app.store_code(contract_collateral());
    let collateral = app
        .instantiate_contract(
            collateral_code,
            owner.clone(),
            &InstantiateMsg {
                decimals: LEDGER_DECIMALS,
                variant: Uint256::from(VARIANT),
                chain_id: THIS_CHAIN,
                balance_tokens: tokens
                    .iter()
                    .zip(decimals.iter())
                    .map(|(token, d)| BalanceTokenInit::Token {
                        address: token.to_string(),
                        decimals: *d,
                    })
                    .collect(),
                proof_verifier: verifier.to_string(),
                access_whitelist: whitelist.to_string(),
            },
            &[],
            "collateral",
            Some(owner.to_string()),
        )
        .unwrap();

    let mut env = TestEnv {
        app,
        collateral,
        whitelist,
        verifier,
        tokens,
        owner,
        user,
        protocol,
        recipient,
    };

    env.app
        .execute_contract(
            env.owner.clone(),
            env.whitelist.clone(),
            &access_whitelist::msg::ExecuteMsg::ApproveProtocol {
                protocol: env.protocol.to_string(),
                approved: true,
            },
            &[],
        )
        .unwrap();
    env.app
        .execute_contract(
            env.user.clone(),
            env.whitelist.clone(),
            &access_whitelist::msg::ExecuteMsg::Approve {
                protocol: env.protocol.to_string(),
                allowance: access_whitelist::msg::Allowance::ApprovedStrong,
            },
            &[],
        )
        .unwrap();

    env
}

// ============================================================================
// Actions
// ============================================================================

/// Execute on the collateral contract, flattening errors to their root cause
pub fn exec(env: &mut TestEnv, sender: &Addr, msg: &ExecuteMsg) -> Result<AppResponse, String> {
    let collateral = env.collateral.clone();
    env.app
        .execute_contract(sender.clone(), collateral, msg, &[])
        .map_err(|e| e.root_cause().to_string())
}

/// Deposit `amount` native units of token `index` through cw20 `Send`
pub fn deposit(env: &mut TestEnv, index: usize, amount: u128, lock_chain: u64) -> AppResponse {
    let token = env.tokens[index].clone();
    env.app
        .execute_contract(
            env.user.clone(),
            token,
            &Cw20ExecuteMsg::Send {
                contract: env.collateral.to_string(),
                amount: Uint128::from(amount),
                msg: to_json_binary(&ReceiveMsg::Deposit {
                    lock_chain,
                    account: None,
                })
                .unwrap(),
            },
            &[],
        )
        .unwrap()
}

/// Withdraw with a proof the mock verifier accepts
pub fn withdraw(
    env: &mut TestEnv,
    index: usize,
    amount: Uint256,
    lock_chain: u64,
    lock_counter: Uint256,
) -> Result<AppResponse, String> {
    let nonce = counters(env, &env.user.clone(), lock_chain).unlock_withdraw_nonce;
    let proof = withdraw_proof(env, lock_chain, lock_counter, amount, nonce);
    let user = env.user.clone();
    let msg = ExecuteMsg::Withdraw {
        token: env.tokens[index].to_string(),
        amount,
        lock_chain,
        lock_counter,
        proof,
    };
    exec(env, &user, &msg)
}

/// Proof for the user's withdraw report from `lock_chain` at `nonce`
pub fn withdraw_proof(
    env: &TestEnv,
    lock_chain: u64,
    lock_counter: Uint256,
    amount: Uint256,
    nonce: u64,
) -> Binary {
    let hashes = withdraw_report_hash(env, lock_chain, THIS_CHAIN, lock_counter, amount, nonce);
    mock_proof(
        &collateral::hash::WITHDRAW_REPORT_SIGNATURE,
        hashes.report_hash.as_slice(),
        lock_chain,
    )
}

/// Proof for an unlock report of `account` from `unlock_chain`
pub fn unlock_proof(env: &TestEnv, account: &Addr, unlock_chain: u64, counter: Uint256) -> Binary {
    let hashes = unlock_report_hash(env, account, unlock_chain, THIS_CHAIN, counter);
    mock_proof(
        &collateral::hash::UNLOCK_REPORT_SIGNATURE,
        hashes.report_hash.as_slice(),
        unlock_chain,
    )
}

// ============================================================================
// Queries
// ============================================================================

pub fn counters(env: &TestEnv, account: &Addr, lock_chain: u64) -> CountersResponse {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.collateral,
            &QueryMsg::Counters {
                account: account.to_string(),
                lock_chain,
            },
        )
        .unwrap()
}

pub fn balance(env: &TestEnv, account: &Addr, lock_chain: u64) -> Uint256 {
    let res: BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.collateral,
            &QueryMsg::Balance {
                account: account.to_string(),
                lock_chain,
            },
        )
        .unwrap();
    res.balance
}

pub fn balance_by_token(env: &TestEnv, account: &Addr, lock_chain: u64, index: usize) -> Uint256 {
    let res: BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.collateral,
            &QueryMsg::BalanceByToken {
                account: account.to_string(),
                lock_chain,
                token: env.tokens[index].to_string(),
            },
        )
        .unwrap();
    res.balance
}

/// cw20 balance of `holder` for token `index`, in native units
pub fn token_balance(env: &TestEnv, index: usize, holder: &Addr) -> u128 {
    let res: Cw20BalanceResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.tokens[index],
            &Cw20QueryMsg::Balance {
                address: holder.to_string(),
            },
        )
        .unwrap();
    res.balance.u128()
}

pub fn has_hash_store(env: &TestEnv, hash: &Binary) -> bool {
    let res: collateral::msg::HasHashStoreResponse = env
        .app
        .wrap()
        .query_wasm_smart(
            &env.collateral,
            &QueryMsg::HasHashStore { hash: hash.clone() },
        )
        .unwrap();
    res.stored
}

pub fn withdraw_report_hash(
    env: &TestEnv,
    lock_chain: u64,
    unlock_chain: u64,
    lock_counter: Uint256,
    amount: Uint256,
    nonce: u64,
) -> ReportHashResponse {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.collateral,
            &QueryMsg::WithdrawReportHash {
                lock_chain,
                unlock_chain,
                account: env.user.to_string(),
                lock_counter,
                amount,
                nonce,
            },
        )
        .unwrap()
}

pub fn unlock_report_hash(
    env: &TestEnv,
    account: &Addr,
    unlock_chain: u64,
    lock_chain: u64,
    unlock_counter: Uint256,
) -> ReportHashResponse {
    env.app
        .wrap()
        .query_wasm_smart(
            &env.collateral,
            &QueryMsg::UnlockReportHash {
                unlock_chain,
                lock_chain,
                account: account.to_string(),
                unlock_counter,
            },
        )
        .unwrap()
}

/// Value of attribute `key` emitted by the collateral contract itself
pub fn attr(env: &TestEnv, res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .filter(|e| e.ty == "wasm")
        .filter(|e| {
            e.attributes
                .iter()
                .any(|a| a.key == "_contract_address" && a.value == env.collateral.as_str())
        })
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}

pub fn u(v: u128) -> Uint256 {
    Uint256::from(v)
}

pub fn us(s: &str) -> Uint256 {
    s.parse().unwrap()
}
