use anchor_lang::prelude::*;
use crate::errors::BondingCurveError;

pub fn safe_add(a: u64, b: u64) -> Result<u64> {
    a.checked_add(b).ok_or(BondingCurveError::MathOverflow.into())
}

pub fn safe_sub(a: u64, b: u64) -> Result<u64> {
    a.checked_sub(b).ok_or(BondingCurveError::MathOverflow.into())
}

/// `floor(a * b / c)` with a 128-bit intermediate.
pub fn mul_div(a: u64, b: u64, c: u64) -> Result<u64> {
    if c == 0 {
        return Err(BondingCurveError::MathOverflow.into());
    }
    let wide = (a as u128)
        .checked_mul(b as u128)
        .ok_or(BondingCurveError::MathOverflow)?
        / c as u128;
    u64::try_from(wide).map_err(|_| BondingCurveError::MathOverflow.into())
}

/// Whole-percent share of `amount`, truncated.
pub fn percent_of(amount: u64, percent: u8) -> Result<u64> {
    mul_div(amount, percent as u64, 100)
}

/// Lamports `balance` still needs to reach `rent_floor`.
pub fn rent_shortfall(balance: u64, rent_floor: u64) -> u64 {
    rent_floor.saturating_sub(balance)
}
