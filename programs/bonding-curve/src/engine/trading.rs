use anchor_lang::prelude::*;
use crate::constants::UNIT_SCALE;
use crate::engine::ledger::{Ledger, Settlement, Treasury};
use crate::errors::BondingCurveError;
use crate::state::{Market, SellerRecord};
use crate::utils::{mul_div, safe_sub, ReentrancyLock};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyQuote {
    pub unit_price: u64,
    pub token_amount: u64,
    pub protocol_fee: u64,
    /// Part of the payment that stays in the reserve.
    pub reserve_amount: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SellQuote {
    pub unit_price: u64,
    pub gross_proceeds: u64,
    pub protocol_fee: u64,
    pub net_proceeds: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutedTrade {
    pub side: Side,
    pub account: Pubkey,
    pub token_amount: u64,
    pub unit_price: u64,
    /// Payment on a buy, gross proceeds on a sell.
    pub gross: u64,
    pub protocol_fee: u64,
    /// Amount kept by the reserve on a buy, paid to the seller on a sell.
    pub net: u64,
}

/// Prices a buy at `supply`. Fills partially at the supply cap; the fee is
/// still taken on the full payment and the unfilled part is not refunded.
pub fn quote_buy(market: &Market, supply: u64, payment: u64) -> Result<BuyQuote> {
    require!(payment > 0, BondingCurveError::InvalidInput);
    require!(
        supply < market.curve.max_supply,
        BondingCurveError::MarketExhausted
    );

    let unit_price = market.curve.price(supply);
    let requested = (payment as u128)
        .checked_mul(UNIT_SCALE as u128)
        .ok_or(BondingCurveError::MathOverflow)?
        .checked_div(unit_price as u128)
        .ok_or(BondingCurveError::MathOverflow)?;
    let token_amount = requested.min(market.curve.remaining(supply) as u128) as u64;
    require!(token_amount > 0, BondingCurveError::InvalidInput);

    let protocol_fee = market.protocol_fee(payment)?;
    Ok(BuyQuote {
        unit_price,
        token_amount,
        protocol_fee,
        reserve_amount: safe_sub(payment, protocol_fee)?,
    })
}

/// Prices a sell at the pre-burn `supply`. The fee is truncated, so any
/// rounding remainder goes to the seller.
pub fn quote_sell(market: &Market, supply: u64, amount: u64) -> Result<SellQuote> {
    require!(amount > 0, BondingCurveError::InvalidInput);

    let unit_price = market.curve.price(supply);
    let gross_proceeds = mul_div(amount, unit_price, UNIT_SCALE)?;
    require!(gross_proceeds > 0, BondingCurveError::InvalidInput);
    let protocol_fee = market.protocol_fee(gross_proceeds)?;
    Ok(SellQuote {
        unit_price,
        gross_proceeds,
        protocol_fee,
        net_proceeds: safe_sub(gross_proceeds, protocol_fee)?,
    })
}

pub fn buy<G: ReentrancyLock, L: Ledger, T: Treasury>(
    market: &mut Market,
    guard: &mut G,
    ledger: &mut L,
    treasury: &mut T,
    buyer: &Pubkey,
    payment: u64,
) -> Result<ExecutedTrade> {
    guard.guarded(|| {
        let supply = ledger.total_supply()?;
        let quote = quote_buy(market, supply, payment)?;

        let mut next = market.clone();
        next.record_buy(payment, quote.protocol_fee)?;

        let settlement = Settlement::receive(*buyer, payment)
            .pay(market.fee_collector, quote.protocol_fee);

        ledger.mint(buyer, quote.token_amount)?;
        if let Err(err) = treasury.settle(&settlement) {
            msg!("Buy settlement failed, reversing mint of {}", quote.token_amount);
            ledger.burn(buyer, quote.token_amount)?;
            return Err(err);
        }
        *market = next;

        msg!(
            "Bought {} units at {} lamports, fee {}",
            quote.token_amount,
            quote.unit_price,
            quote.protocol_fee
        );

        Ok(ExecutedTrade {
            side: Side::Buy,
            account: *buyer,
            token_amount: quote.token_amount,
            unit_price: quote.unit_price,
            gross: payment,
            protocol_fee: quote.protocol_fee,
            net: quote.reserve_amount,
        })
    })
}

/// A payment with no explicit instruction is a buy.
pub fn receive<G: ReentrancyLock, L: Ledger, T: Treasury>(
    market: &mut Market,
    guard: &mut G,
    ledger: &mut L,
    treasury: &mut T,
    from: &Pubkey,
    payment: u64,
) -> Result<ExecutedTrade> {
    buy(market, guard, ledger, treasury, from, payment)
}

#[allow(clippy::too_many_arguments)]
pub fn sell<G: ReentrancyLock, L: Ledger, T: Treasury>(
    market: &mut Market,
    guard: &mut G,
    record: &mut SellerRecord,
    ledger: &mut L,
    treasury: &mut T,
    seller: &Pubkey,
    amount: u64,
    now: i64,
) -> Result<ExecutedTrade> {
    guard.guarded(|| {
        require!(amount > 0, BondingCurveError::InvalidInput);
        require!(
            ledger.balance_of(seller)? >= amount,
            BondingCurveError::InsufficientBalance
        );
        require!(
            record.cooldown_elapsed(now, market.sell_cooldown),
            BondingCurveError::CooldownActive
        );

        let supply = ledger.total_supply()?;
        require!(
            amount <= market.sell_limit(supply)?,
            BondingCurveError::ExceedsSellLimit
        );

        let quote = quote_sell(market, supply, amount)?;

        let mut next = market.clone();
        next.record_sell(quote.gross_proceeds, quote.protocol_fee)?;
        let mut next_record = record.clone();
        next_record.record_sale(amount, now)?;

        let settlement = Settlement::default()
            .pay(*seller, quote.net_proceeds)
            .pay(market.fee_collector, quote.protocol_fee);

        ledger.burn(seller, amount)?;
        if let Err(err) = treasury.settle(&settlement) {
            msg!("Sell settlement failed, restoring {} burned units", amount);
            ledger.mint(seller, amount)?;
            return Err(err);
        }
        *market = next;
        *record = next_record;

        msg!(
            "Sold {} units at {} lamports, net {} fee {}",
            amount,
            quote.unit_price,
            quote.net_proceeds,
            quote.protocol_fee
        );

        Ok(ExecutedTrade {
            side: Side::Sell,
            account: *seller,
            token_amount: amount,
            unit_price: quote.unit_price,
            gross: quote.gross_proceeds,
            protocol_fee: quote.protocol_fee,
            net: quote.net_proceeds,
        })
    })
}
