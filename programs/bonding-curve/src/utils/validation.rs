use anchor_lang::prelude::*;
use crate::errors::BondingCurveError;
use crate::constants::*;

pub fn validate_name(name: &str) -> Result<()> {
    require!(!name.is_empty(), BondingCurveError::InvalidParameters);
    require!(name.len() <= MAX_NAME_LEN, BondingCurveError::NameTooLong);
    Ok(())
}

pub fn validate_symbol(symbol: &str) -> Result<()> {
    require!(!symbol.is_empty(), BondingCurveError::InvalidParameters);
    require!(symbol.len() <= MAX_SYMBOL_LEN, BondingCurveError::SymbolTooLong);
    require!(
        symbol.chars().all(|c| c.is_ascii_alphanumeric()),
        BondingCurveError::InvalidParameters
    );
    Ok(())
}

pub fn validate_fee_collector(fee_collector: &Pubkey) -> Result<()> {
    require!(
        *fee_collector != Pubkey::default(),
        BondingCurveError::InvalidFeeCollector
    );
    Ok(())
}

pub fn validate_fee_percent(fee_percent: u8) -> Result<()> {
    require!(
        fee_percent <= FEE_PERCENT_CAP,
        BondingCurveError::InvalidParameters
    );
    Ok(())
}

pub fn validate_sell_controls(max_sell_percent: u8, sell_cooldown: i64) -> Result<()> {
    require!(
        max_sell_percent > 0 && max_sell_percent <= 100,
        BondingCurveError::InvalidParameters
    );
    require!(sell_cooldown >= 0, BondingCurveError::InvalidParameters);
    Ok(())
}
