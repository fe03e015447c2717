//! Deposit, withdraw and skip flows against real cw20 tokens.

mod fixture;

use fixture::*;
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Cw20ExecuteMsg;
use cw_multi_test::Executor;

use collateral::msg::{ExecuteMsg, ReceiveMsg};

// ============================================================================
// Deposit
// ============================================================================

#[test]
fn test_deposit_credits_unified_amount() {
    let mut env = setup(&[6]);

    let res = deposit(&mut env, 0, 123_456_789, REMOTE_CHAIN);
    assert_eq!(attr(&env, &res, "amount").unwrap(), "123456789000000000000");

    let user = env.user.clone();
    let expected = u(123_456_789_000_000_000_000);
    assert_eq!(balance(&env, &user, REMOTE_CHAIN), expected);
    assert_eq!(balance_by_token(&env, &user, REMOTE_CHAIN, 0), expected);
    assert_eq!(counters(&env, &user, REMOTE_CHAIN).unlock_counter, expected);

    // other lock chains are untouched
    assert!(balance(&env, &user, OTHER_CHAIN).is_zero());

    let collateral = env.collateral.clone();
    assert_eq!(token_balance(&env, 0, &collateral), 123_456_789);
    assert_eq!(token_balance(&env, 0, &user), USER_TOKENS - 123_456_789);
}

#[test]
fn test_deposit_for_another_account() {
    let mut env = setup(&[18]);
    let token = env.tokens[0].clone();
    let recipient = env.recipient.clone();

    env.app
        .execute_contract(
            env.user.clone(),
            token,
            &Cw20ExecuteMsg::Send {
                contract: env.collateral.to_string(),
                amount: Uint128::new(5_000),
                msg: cosmwasm_std::to_json_binary(&ReceiveMsg::Deposit {
                    lock_chain: REMOTE_CHAIN,
                    account: Some(recipient.to_string()),
                })
                .unwrap(),
            },
            &[],
        )
        .unwrap();

    let user = env.user.clone();
    assert_eq!(balance(&env, &recipient, REMOTE_CHAIN), u(5_000));
    assert!(balance(&env, &user, REMOTE_CHAIN).is_zero());
}

#[test]
fn test_deposit_via_allowance() {
    let mut env = setup(&[8]);
    let token = env.tokens[0].clone();

    env.app
        .execute_contract(
            env.user.clone(),
            token.clone(),
            &Cw20ExecuteMsg::IncreaseAllowance {
                spender: env.collateral.to_string(),
                amount: Uint128::new(42),
                expires: None,
            },
            &[],
        )
        .unwrap();

    let user = env.user.clone();
    exec(
        &mut env,
        &user,
        &ExecuteMsg::Deposit {
            token: token.to_string(),
            amount: Uint128::new(42),
            lock_chain: REMOTE_CHAIN,
        },
    )
    .unwrap();

    assert_eq!(balance(&env, &user, REMOTE_CHAIN), u(420_000_000_000));
    let collateral = env.collateral.clone();
    assert_eq!(token_balance(&env, 0, &collateral), 42);
}

#[test]
fn test_deposit_without_allowance_fails() {
    let mut env = setup(&[8]);
    let user = env.user.clone();
    let msg = ExecuteMsg::Deposit {
        token: env.tokens[0].to_string(),
        amount: Uint128::new(42),
        lock_chain: REMOTE_CHAIN,
    };

    assert!(exec(&mut env, &user, &msg).is_err());
    assert!(balance(&env, &user, REMOTE_CHAIN).is_zero());
}

#[test]
fn test_zero_deposit_is_noop() {
    let mut env = setup(&[6]);
    let user = env.user.clone();
    let token = env.tokens[0].to_string();

    exec(
        &mut env,
        &user,
        &ExecuteMsg::Deposit {
            token,
            amount: Uint128::zero(),
            lock_chain: REMOTE_CHAIN,
        },
    )
    .unwrap();

    let counters = counters(&env, &user, REMOTE_CHAIN);
    assert!(counters.unlock_counter.is_zero());
    assert!(balance(&env, &user, REMOTE_CHAIN).is_zero());
}

#[test]
fn test_deposit_unknown_token_fails() {
    let mut env = setup(&[6]);
    let user = env.user.clone();
    let rogue = instantiate_token(&mut env.app, &user, "BAD", 6);

    let err = env
        .app
        .execute_contract(
            user.clone(),
            rogue.clone(),
            &Cw20ExecuteMsg::Send {
                contract: env.collateral.to_string(),
                amount: Uint128::new(1_000),
                msg: cosmwasm_std::to_json_binary(&ReceiveMsg::Deposit {
                    lock_chain: REMOTE_CHAIN,
                    account: None,
                })
                .unwrap(),
            },
            &[],
        )
        .unwrap_err();
    assert!(err.root_cause().to_string().contains("Unknown token"));

    let err = exec(
        &mut env,
        &user,
        &ExecuteMsg::Deposit {
            token: rogue.to_string(),
            amount: Uint128::new(1_000),
            lock_chain: REMOTE_CHAIN,
        },
    )
    .unwrap_err();
    assert!(err.contains("Unknown token"));
}

// ============================================================================
// Withdraw
// ============================================================================

#[test]
fn test_withdraw_pays_out_native_amount() {
    let mut env = setup(&[6]);
    deposit(&mut env, 0, 123_456_789, REMOTE_CHAIN);

    let res = withdraw(
        &mut env,
        0,
        us("30000000000000000000"),
        REMOTE_CHAIN,
        us("120000000000000000000"),
    )
    .unwrap();
    assert_eq!(attr(&env, &res, "nonce").unwrap(), "0");

    let user = env.user.clone();
    let counters = counters(&env, &user, REMOTE_CHAIN);
    assert_eq!(counters.unlock_withdraw_nonce, 1);
    // withdrawals do not touch the unlock counter
    assert_eq!(counters.unlock_counter, u(123_456_789_000_000_000_000));
    assert_eq!(balance(&env, &user, REMOTE_CHAIN), u(93_456_789_000_000_000_000));
    assert_eq!(token_balance(&env, 0, &user), USER_TOKENS - 123_456_789 + 30_000_000);

    let collateral = env.collateral.clone();
    assert_eq!(token_balance(&env, 0, &collateral), 93_456_789);

    // the consumed report is recorded
    let hashes = withdraw_report_hash(
        &env,
        REMOTE_CHAIN,
        THIS_CHAIN,
        us("120000000000000000000"),
        us("30000000000000000000"),
        0,
    );
    assert!(has_hash_store(&env, &hashes.event_hash));
}

#[test]
fn test_withdraw_refused_when_lock_counter_exceeds_unlocks() {
    let mut env = setup(&[6]);
    deposit(&mut env, 0, 123_456_789, REMOTE_CHAIN);

    let err = withdraw(
        &mut env,
        0,
        us("30000000000000000000"),
        REMOTE_CHAIN,
        us("130000000000000000000"),
    )
    .unwrap_err();
    assert!(err.contains("Withdraw refused"));

    let user = env.user.clone();
    assert_eq!(counters(&env, &user, REMOTE_CHAIN).unlock_withdraw_nonce, 0);
}

#[test]
fn test_withdraw_refused_with_invalid_proof() {
    let mut env = setup(&[6]);
    deposit(&mut env, 0, 123_456_789, REMOTE_CHAIN);
    let user = env.user.clone();

    // proof for a different nonce
    let proof = withdraw_proof(
        &env,
        REMOTE_CHAIN,
        us("120000000000000000000"),
        us("30000000000000000000"),
        1,
    );
    let msg = ExecuteMsg::Withdraw {
        token: env.tokens[0].to_string(),
        amount: us("30000000000000000000"),
        lock_chain: REMOTE_CHAIN,
        lock_counter: us("120000000000000000000"),
        proof,
    };
    let err = exec(&mut env, &user, &msg).unwrap_err();
    assert!(err.contains("Withdraw refused"));

    let msg = ExecuteMsg::Withdraw {
        token: env.tokens[0].to_string(),
        amount: us("30000000000000000000"),
        lock_chain: REMOTE_CHAIN,
        lock_counter: us("120000000000000000000"),
        proof: Binary::from(b"garbage".to_vec()),
    };
    let err = exec(&mut env, &user, &msg).unwrap_err();
    assert!(err.contains("Withdraw refused"));

    assert_eq!(balance(&env, &user, REMOTE_CHAIN), u(123_456_789_000_000_000_000));
}

#[test]
fn test_withdraw_resubmitted_report_refused() {
    let mut env = setup(&[18]);
    deposit(&mut env, 0, 1_000, REMOTE_CHAIN);
    let user = env.user.clone();

    let msg = ExecuteMsg::Withdraw {
        token: env.tokens[0].to_string(),
        amount: u(100),
        lock_chain: REMOTE_CHAIN,
        lock_counter: u(500),
        proof: withdraw_proof(&env, REMOTE_CHAIN, u(500), u(100), 0),
    };
    exec(&mut env, &user, &msg).unwrap();

    // the consumed nonce is gone, so the same proof no longer matches
    let err = exec(&mut env, &user, &msg).unwrap_err();
    assert!(err.contains("Withdraw refused"));

    assert_eq!(counters(&env, &user, REMOTE_CHAIN).unlock_withdraw_nonce, 1);
    assert_eq!(balance(&env, &user, REMOTE_CHAIN), u(900));
    assert_eq!(token_balance(&env, 0, &user), USER_TOKENS - 900);
}

#[test]
fn test_withdraw_unknown_token_fails() {
    let mut env = setup(&[6]);
    deposit(&mut env, 0, 1_000, REMOTE_CHAIN);
    let user = env.user.clone();

    let msg = ExecuteMsg::Withdraw {
        token: Addr::unchecked("terra1unknowntoken").to_string(),
        amount: u(1),
        lock_chain: REMOTE_CHAIN,
        lock_counter: u(0),
        proof: Binary::default(),
    };
    let err = exec(&mut env, &user, &msg).unwrap_err();
    assert!(err.contains("Unknown token"));
}

#[test]
fn test_withdraw_more_than_balance_fails() {
    let mut env = setup(&[6]);
    deposit(&mut env, 0, 123_456_789, REMOTE_CHAIN);

    let err = withdraw(&mut env, 0, us("200000000000000000000"), REMOTE_CHAIN, u(0)).unwrap_err();
    assert!(err.contains("Insufficient balance"));
}

#[test]
fn test_withdraw_from_other_token_balance_fails() {
    let mut env = setup(&[6, 18]);
    deposit(&mut env, 0, 1_000_000, REMOTE_CHAIN);

    // the total covers it but the 18 decimals token holds nothing
    let err = withdraw(&mut env, 1, u(1_000), REMOTE_CHAIN, u(0)).unwrap_err();
    assert!(err.contains("Insufficient balance"));
}

#[test]
fn test_withdraw_sub_unit_amount_keeps_dust() {
    let mut env = setup(&[6]);
    deposit(&mut env, 0, 10, REMOTE_CHAIN);

    // half a native unit: debited, nothing transferred
    let res = withdraw(&mut env, 0, u(500_000_000_000), REMOTE_CHAIN, u(0)).unwrap();
    assert_eq!(attr(&env, &res, "action").unwrap(), "withdraw");

    let user = env.user.clone();
    assert_eq!(balance(&env, &user, REMOTE_CHAIN), u(9_500_000_000_000));
    assert_eq!(token_balance(&env, 0, &user), USER_TOKENS - 10);
}

#[test]
fn test_self_issued_report_cannot_be_withdrawn() {
    let mut env = setup(&[18]);
    deposit(&mut env, 0, 1_000, THIS_CHAIN);
    let user = env.user.clone();

    exec(
        &mut env,
        &user,
        &ExecuteMsg::ReportWithdraw {
            amount: u(400),
            unlock_chain: THIS_CHAIN,
        },
    )
    .unwrap();

    let err = withdraw(&mut env, 0, u(400), THIS_CHAIN, u(400)).unwrap_err();
    assert!(err.contains("Report already stored"));
}

// ============================================================================
// Skip
// ============================================================================

fn skip(env: &mut TestEnv, from_nonce: u64, to_nonce: u64) -> Result<(), String> {
    let user = env.user.clone();
    exec(
        env,
        &user,
        &ExecuteMsg::SkipWithdraw {
            lock_chain: REMOTE_CHAIN,
            from_nonce,
            to_nonce,
        },
    )
    .map(|_| ())
}

#[test]
fn test_skip_withdraw_advances_nonce() {
    let mut env = setup(&[6]);
    let user = env.user.clone();

    let err = skip(&mut env, 1, 1).unwrap_err();
    assert!(err.contains("Invalid withdraw skip"));

    skip(&mut env, 0, 0).unwrap();
    assert_eq!(counters(&env, &user, REMOTE_CHAIN).unlock_withdraw_nonce, 1);

    skip(&mut env, 1, 6).unwrap();
    assert_eq!(counters(&env, &user, REMOTE_CHAIN).unlock_withdraw_nonce, 7);

    skip(&mut env, 7, 10).unwrap();
    assert_eq!(counters(&env, &user, REMOTE_CHAIN).unlock_withdraw_nonce, 11);

    let err = skip(&mut env, 11, 10).unwrap_err();
    assert!(err.contains("Invalid withdraw skip"));
    let err = skip(&mut env, 10, 12).unwrap_err();
    assert!(err.contains("Invalid withdraw skip"));
    assert_eq!(counters(&env, &user, REMOTE_CHAIN).unlock_withdraw_nonce, 11);
}

#[test]
fn test_withdraw_after_skip_uses_new_nonce() {
    let mut env = setup(&[18]);
    deposit(&mut env, 0, 1_000, REMOTE_CHAIN);
    skip(&mut env, 0, 4).unwrap();

    let res = withdraw(&mut env, 0, u(100), REMOTE_CHAIN, u(500)).unwrap();
    assert_eq!(attr(&env, &res, "nonce").unwrap(), "5");

    let user = env.user.clone();
    assert_eq!(counters(&env, &user, REMOTE_CHAIN).unlock_withdraw_nonce, 6);
}
