use anchor_lang::prelude::*;

use super::harness::*;
use crate::constants::*;
use crate::engine::{quote_buy, quote_sell, PriceCurve, Side};
use crate::errors::BondingCurveError;

const SOL: u64 = 1_000_000_000;

#[test]
fn test_fresh_market_buy_at_current_price() {
    let mut f = Fixture::new();
    assert_eq!(f.supply(), tokens(200_000));
    assert_eq!(f.balance(&f.creator.clone()), tokens(200_000));

    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, 10 * SOL);

    // 20% outstanding prices a token at 499_999 lamports
    let payment = 499_999 * 10;
    let trade = f.buy(&buyer, payment).unwrap();

    assert_eq!(trade.side, Side::Buy);
    assert_eq!(trade.unit_price, 499_999);
    assert_eq!(trade.token_amount, tokens(10));
    assert_eq!(trade.protocol_fee, 249_999);
    assert_eq!(trade.net, payment - 249_999);

    assert_eq!(f.balance(&buyer), tokens(10));
    assert_eq!(f.supply(), tokens(200_010));
    assert_eq!(f.treasury.wallet(&f.fee_collector), 249_999);
    assert_eq!(f.treasury.wallet(&buyer), 10 * SOL - payment);
    assert_eq!(f.treasury.reserve, payment - 249_999);
    assert_eq!(f.market.total_fee_collected, 249_999);
    assert_eq!(f.market.total_buys, 1);
    assert_eq!(f.market.total_volume, payment);
}

#[test]
fn test_buy_fee_is_exactly_five_percent_of_payment() {
    let mut f = Fixture::new();
    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, 10 * SOL);

    let trade = f.buy(&buyer, SOL).unwrap();

    assert_eq!(trade.protocol_fee, 50_000_000);
    assert_eq!(trade.token_amount, 2_000_004_000);
    assert_eq!(f.treasury.wallet(&f.fee_collector), 50_000_000);
    assert_eq!(f.treasury.reserve, 950_000_000);
}

#[test]
fn test_buy_rejects_zero_payment() {
    let mut f = Fixture::new();
    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, SOL);

    assert_fails(f.buy(&buyer, 0), BondingCurveError::InvalidInput);
    assert_eq!(f.supply(), tokens(200_000));
    assert_eq!(f.market.total_buys, 0);
    assert!(!f.guard.is_locked);
}

#[test]
fn test_buy_rejects_payment_below_one_base_unit() {
    let mut f = Fixture::new();
    f.market.curve = PriceCurve::new(MAX_SUPPLY, 2 * UNIT_SCALE, 2 * UNIT_SCALE).unwrap();
    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, SOL);

    assert_fails(f.buy(&buyer, 1), BondingCurveError::InvalidInput);

    let trade = f.buy(&buyer, 2).unwrap();
    assert_eq!(trade.token_amount, 1);
}

#[test]
fn test_buy_partial_fill_at_supply_cap_keeps_full_payment() {
    let mut f = Fixture::new();
    let whale = Pubkey::new_unique();
    let remaining = 5;
    f.seed_tokens(&whale, MAX_SUPPLY - tokens(200_000) - remaining);

    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, 10 * SOL);
    let payment = 1_000_000;

    let trade = f.buy(&buyer, payment).unwrap();

    assert_eq!(trade.token_amount, remaining);
    assert_eq!(f.supply(), MAX_SUPPLY);
    // Fee on the whole payment, nothing refunded
    assert_eq!(trade.protocol_fee, 50_000);
    assert_eq!(f.treasury.wallet(&buyer), 10 * SOL - payment);
    assert_eq!(f.treasury.reserve, payment - 50_000);

    assert_fails(f.buy(&buyer, payment), BondingCurveError::MarketExhausted);
    assert_eq!(f.supply(), MAX_SUPPLY);
}

#[test]
fn test_buy_never_exceeds_max_supply() {
    let mut f = Fixture::new();
    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, 10_000 * SOL);

    let mut payment = SOL;
    loop {
        match f.buy(&buyer, payment) {
            Ok(_) => assert!(f.supply() <= MAX_SUPPLY),
            Err(err) => {
                let expected: u32 = BondingCurveError::MarketExhausted.into();
                assert_eq!(error_code::<()>(Err(err)), expected);
                break;
            }
        }
        payment *= 2;
    }
    assert_eq!(f.supply(), MAX_SUPPLY);
}

#[test]
fn test_direct_deposit_matches_buy() {
    let mut bought = Fixture::new();
    let mut deposited = Fixture::new();
    let buyer = Pubkey::new_unique();
    bought.fund_wallet(&buyer, SOL);
    deposited.fund_wallet(&buyer, SOL);

    let via_buy = bought.buy(&buyer, 123_456_789).unwrap();
    let via_deposit = deposited.deposit(&buyer, 123_456_789).unwrap();

    assert_eq!(via_buy, via_deposit);
    assert_eq!(bought.balance(&buyer), deposited.balance(&buyer));
    assert_eq!(
        bought.market.total_fee_collected,
        deposited.market.total_fee_collected
    );
    assert_fails(deposited.deposit(&buyer, 0), BondingCurveError::InvalidInput);
}

#[test]
fn test_buy_fails_when_buyer_cannot_pay() {
    let mut f = Fixture::new();
    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, 1_000);

    assert_fails(f.buy(&buyer, 1_000_000), BondingCurveError::TransferFailed);
    assert_eq!(f.balance(&buyer), 0);
    assert_eq!(f.supply(), tokens(200_000));
    assert_eq!(f.treasury.wallet(&buyer), 1_000);
    assert_eq!(f.market.total_fee_collected, 0);
}

#[test]
fn test_sell_limit_boundary() {
    let mut f = Fixture::new();
    let seller = Pubkey::new_unique();
    f.seed_tokens(&seller, tokens(80_000));
    f.seed_tokens(&Pubkey::new_unique(), tokens(20_000));
    f.fund_reserve(100 * SOL);
    assert_eq!(f.supply(), tokens(300_000));

    let now = GENESIS_TIME + 10_000;
    assert_fails(
        f.sell(&seller, tokens(60_000) + 1, now),
        BondingCurveError::ExceedsSellLimit,
    );
    assert_eq!(f.balance(&seller), tokens(80_000));

    let trade = f.sell(&seller, tokens(60_000), now).unwrap();
    assert_eq!(trade.side, Side::Sell);
    assert_eq!(trade.unit_price, 333_333);
    assert_eq!(trade.gross, 19_999_980_000);
    assert_eq!(trade.protocol_fee, 999_999_000);
    assert_eq!(trade.net, 18_999_981_000);

    assert_eq!(f.balance(&seller), tokens(20_000));
    assert_eq!(f.supply(), tokens(240_000));
    assert_eq!(f.treasury.wallet(&seller), 18_999_981_000);
    assert_eq!(f.treasury.wallet(&f.fee_collector), 999_999_000);
    assert_eq!(f.treasury.reserve, 100 * SOL - 19_999_980_000);
}

#[test]
fn test_sell_more_than_held_fails() {
    let mut f = Fixture::new();
    let seller = Pubkey::new_unique();
    f.seed_tokens(&seller, tokens(50_000));
    f.seed_tokens(&Pubkey::new_unique(), tokens(50_000));
    f.fund_reserve(100 * SOL);

    assert_fails(
        f.sell(&seller, tokens(60_000), GENESIS_TIME),
        BondingCurveError::InsufficientBalance,
    );
    assert_eq!(f.balance(&seller), tokens(50_000));
    assert_eq!(f.record(&seller).last_sell_time, 0);
}

#[test]
fn test_sell_rejects_zero_amount() {
    let mut f = Fixture::new();
    assert_fails(
        f.sell(&f.creator.clone(), 0, GENESIS_TIME),
        BondingCurveError::InvalidInput,
    );
}

#[test]
fn test_sell_worth_less_than_one_lamport_is_rejected() {
    let mut f = Fixture::new();
    let seller = Pubkey::new_unique();
    f.seed_tokens(&seller, tokens(10));
    f.fund_reserve(100 * SOL);
    let supply = f.supply();
    let market = f.market.clone();

    // ~500_000 lamports per token: 1_000 base units are worth 0.5 lamports
    assert_fails(quote_sell(&f.market, supply, 1_000), BondingCurveError::InvalidInput);
    assert_fails(f.sell(&seller, 1_000, GENESIS_TIME), BondingCurveError::InvalidInput);

    assert_eq!(f.balance(&seller), tokens(10));
    assert_eq!(f.supply(), supply);
    assert_eq!(f.market, market);
    assert_eq!(f.record(&seller).last_sell_time, 0);
    assert_eq!(f.treasury.reserve, 100 * SOL);

    // No cooldown was started
    let trade = f.sell(&seller, tokens(1), GENESIS_TIME + 1).unwrap();
    assert!(trade.gross > 0);
    assert_eq!(f.balance(&seller), tokens(9));
}

#[test]
fn test_sell_limit_shrinks_with_supply() {
    let mut f = Fixture::new();
    let seller = Pubkey::new_unique();
    f.seed_tokens(&seller, tokens(150_000));
    f.fund_reserve(100 * SOL);

    let t0 = GENESIS_TIME + 10_000;
    f.sell(&seller, tokens(70_000), t0).unwrap();
    assert_eq!(f.supply(), tokens(280_000));

    let t1 = t0 + SELL_COOLDOWN;
    assert_fails(
        f.sell(&seller, tokens(56_000) + 1, t1),
        BondingCurveError::ExceedsSellLimit,
    );
    f.sell(&seller, tokens(56_000), t1).unwrap();
    assert_eq!(f.balance(&seller), tokens(24_000));
}

#[test]
fn test_sell_cooldown() {
    let mut f = Fixture::new();
    let seller = Pubkey::new_unique();
    f.seed_tokens(&seller, tokens(50_000));
    f.fund_reserve(100 * SOL);

    let t0 = GENESIS_TIME + 100_000;
    f.sell(&seller, tokens(1_000), t0).unwrap();
    assert_eq!(f.record(&seller).last_sell_time, t0);

    // Any amount is refused while the cooldown runs
    assert_fails(f.sell(&seller, 1, t0), BondingCurveError::CooldownActive);
    assert_fails(f.sell(&seller, tokens(1), t0 + 1), BondingCurveError::CooldownActive);
    assert_fails(
        f.sell(&seller, tokens(1), t0 + SELL_COOLDOWN - 1),
        BondingCurveError::CooldownActive,
    );
    assert_eq!(f.balance(&seller), tokens(49_000));

    // Boundary is inclusive
    f.sell(&seller, tokens(1), t0 + SELL_COOLDOWN).unwrap();

    let record = f.record(&seller);
    assert_eq!(record.last_sell_time, t0 + SELL_COOLDOWN);
    assert_eq!(record.total_sold, tokens(1_001));
    assert_eq!(f.market.total_sells, 2);
}

#[test]
fn test_cooldown_is_per_account() {
    let mut f = Fixture::new();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    f.seed_tokens(&alice, tokens(10_000));
    f.seed_tokens(&bob, tokens(10_000));
    f.fund_reserve(100 * SOL);

    let now = GENESIS_TIME + 100_000;
    f.sell(&alice, tokens(100), now).unwrap();
    f.sell(&bob, tokens(100), now).unwrap();
    assert_fails(f.sell(&alice, tokens(100), now), BondingCurveError::CooldownActive);
}

#[test]
fn test_sell_priced_before_burn() {
    let mut f = Fixture::new();
    let seller = Pubkey::new_unique();
    f.seed_tokens(&seller, tokens(50_000));
    f.fund_reserve(100 * SOL);

    let before = f.supply();
    let trade = f.sell(&seller, tokens(40_000), GENESIS_TIME).unwrap();

    assert_eq!(trade.unit_price, f.market.curve.price(before));
    assert!(trade.unit_price < f.market.curve.price(f.supply()));
}

#[test]
fn test_sell_proceeds_reconcile_and_favor_seller() {
    let f = Fixture::new();

    // Clamped price of 10_000_000 lamports per token: 3_900 units gross 39
    let quote = quote_sell(&f.market, 1_000_000, 3_900).unwrap();
    assert_eq!(quote.gross_proceeds, 39);
    assert_eq!(quote.protocol_fee, 1);
    assert_eq!(quote.net_proceeds, 38);

    // 19 lamports gross: the whole fee truncates away
    let quote = quote_sell(&f.market, 1_000_000, 1_900).unwrap();
    assert_eq!(quote.gross_proceeds, 19);
    assert_eq!(quote.protocol_fee, 0);
    assert_eq!(quote.net_proceeds, 19);

    for supply in [tokens(1), tokens(200_000), tokens(777_777), MAX_SUPPLY] {
        for amount in [123_456_789, tokens(1), supply / 5] {
            let quote = quote_sell(&f.market, supply, amount).unwrap();
            assert_eq!(quote.net_proceeds + quote.protocol_fee, quote.gross_proceeds);
            assert_eq!(quote.protocol_fee, quote.gross_proceeds * 5 / 100);
        }
    }
}

#[test]
fn test_quote_buy_matches_execution() {
    let mut f = Fixture::new();
    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, SOL);

    let quote = quote_buy(&f.market, f.supply(), 77_777_777).unwrap();
    let trade = f.buy(&buyer, 77_777_777).unwrap();

    assert_eq!(quote.unit_price, trade.unit_price);
    assert_eq!(quote.token_amount, trade.token_amount);
    assert_eq!(quote.protocol_fee, trade.protocol_fee);
    assert_eq!(quote.reserve_amount, trade.net);
}

#[test]
fn test_failed_fee_payout_rolls_back_sell() {
    let mut f = Fixture::new();
    let seller = Pubkey::new_unique();
    f.seed_tokens(&seller, tokens(50_000));
    f.fund_reserve(100 * SOL);
    f.treasury.reject_payouts_to = Some(f.fee_collector);

    let market = f.market.clone();
    let ledger = f.ledger.clone();
    let reserve = f.treasury.reserve;

    assert_fails(
        f.sell(&seller, tokens(1_000), GENESIS_TIME),
        BondingCurveError::TransferFailed,
    );

    assert_eq!(f.market, market);
    assert_eq!(f.ledger, ledger);
    assert_eq!(f.treasury.reserve, reserve);
    assert_eq!(f.treasury.wallet(&seller), 0);
    assert_eq!(f.record(&seller).last_sell_time, 0);
    assert_eq!(f.record(&seller).total_sold, 0);
    assert!(!f.guard.is_locked);

    // Nothing was left half-applied, so the same sell now goes through
    f.treasury.reject_payouts_to = None;
    f.sell(&seller, tokens(1_000), GENESIS_TIME).unwrap();
    assert_eq!(f.balance(&seller), tokens(49_000));
}

#[test]
fn test_failed_fee_payout_rolls_back_buy() {
    let mut f = Fixture::new();
    let buyer = Pubkey::new_unique();
    f.fund_wallet(&buyer, SOL);
    f.treasury.reject_payouts_to = Some(f.fee_collector);

    let market = f.market.clone();
    let ledger = f.ledger.clone();

    assert_fails(f.buy(&buyer, SOL / 2), BondingCurveError::TransferFailed);

    assert_eq!(f.market, market);
    assert_eq!(f.ledger, ledger);
    assert_eq!(f.treasury.wallet(&buyer), SOL);
    assert_eq!(f.treasury.reserve, 0);
    assert!(!f.guard.is_locked);
}

#[test]
fn test_sell_fails_when_reserve_is_short() {
    let mut f = Fixture::new();
    let seller = Pubkey::new_unique();
    f.seed_tokens(&seller, tokens(50_000));
    f.fund_reserve(1_000);

    let ledger = f.ledger.clone();
    assert_fails(
        f.sell(&seller, tokens(1_000), GENESIS_TIME),
        BondingCurveError::TransferFailed,
    );
    assert_eq!(f.ledger, ledger);
    assert_eq!(f.treasury.reserve, 1_000);
    assert_eq!(f.market.total_fee_collected, 0);
}

#[test]
fn test_fee_accumulator_matches_collector_receipts() {
    let mut f = Fixture::new();
    let trader = Pubkey::new_unique();
    f.fund_wallet(&trader, 1_000 * SOL);

    let mut now = GENESIS_TIME;
    for payment in [SOL, 3 * SOL, 7_777_777, 42] {
        f.buy(&trader, payment).unwrap();
    }
    for amount in [tokens(1), 999_999, tokens(3)] {
        f.sell(&trader, amount, now).unwrap();
        now += SELL_COOLDOWN;
    }

    assert_eq!(
        f.market.total_fee_collected,
        f.treasury.wallet(&f.fee_collector)
    );
    assert_eq!(f.market.total_buys, 4);
    assert_eq!(f.market.total_sells, 3);
}
