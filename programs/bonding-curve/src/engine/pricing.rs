use anchor_lang::prelude::*;
use crate::errors::BondingCurveError;

/// Inverse bonding curve: price is highest while supply is scarce and falls
/// toward `initial_unit_price` as supply approaches `max_supply`.
///
/// Prices are lamports per whole token, supplies are token base units.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub struct PriceCurve {
    pub max_supply: u64,
    pub initial_unit_price: u64,
    pub max_unit_price: u64,
}

impl PriceCurve {
    pub fn new(max_supply: u64, initial_unit_price: u64, max_unit_price: u64) -> Result<Self> {
        let curve = Self {
            max_supply,
            initial_unit_price,
            max_unit_price,
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.max_supply > 0, BondingCurveError::InvalidParameters);
        require!(self.initial_unit_price > 0, BondingCurveError::InvalidParameters);
        require!(
            self.max_unit_price >= self.initial_unit_price,
            BondingCurveError::InvalidParameters
        );
        // price stays at least 1 lamport all the way to max_supply
        require!(
            self.initial_unit_price as u128 * self.max_supply as u128
                > self.max_supply as u128,
            BondingCurveError::InvalidParameters
        );
        Ok(())
    }

    /// `initial * max_supply / (supply + 1)`, capped at `max_unit_price`.
    ///
    /// The product of two u64 values always fits in u128, so this never
    /// overflows.
    pub fn price(&self, supply: u64) -> u64 {
        let numerator = self.initial_unit_price as u128 * self.max_supply as u128;
        let computed = numerator / (supply as u128 + 1);
        computed.min(self.max_unit_price as u128) as u64
    }

    /// Base units still mintable before the cap.
    pub fn remaining(&self, supply: u64) -> u64 {
        self.max_supply.saturating_sub(supply)
    }
}
