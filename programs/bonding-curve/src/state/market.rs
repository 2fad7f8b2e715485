use anchor_lang::prelude::*;
use crate::constants::*;
use crate::engine::PriceCurve;
use crate::state::MarketParams;
use crate::utils::{percent_of, safe_add};
use crate::utils::validation::*;

#[account]
#[derive(InitSpace, Debug, PartialEq)]
pub struct Market {
    pub creator: Pubkey,            // 32 bytes
    pub mint: Pubkey,               // 32 bytes - SPL mint, authority is this PDA
    pub fee_collector: Pubkey,      // 32 bytes - fixed at genesis
    #[max_len(32)]
    pub name: String,
    #[max_len(10)]
    pub symbol: String,
    pub curve: PriceCurve,        // 24 bytes
    pub fee_percent: u8,            // 1 byte
    pub max_sell_percent: u8,       // 1 byte - of current supply
    pub sell_cooldown: i64,         // 8 bytes - seconds
    pub total_fee_collected: u64,   // 8 bytes - lamports
    pub total_buys: u64,            // 8 bytes
    pub total_sells: u64,           // 8 bytes
    pub total_volume: u64,          // 8 bytes - lamports traded, gross
    pub created_at: i64,            // 8 bytes - Unix timestamp
    pub bump: u8,                   // 1 byte
    pub vault_bump: u8,             // 1 byte
}

impl Market {
    /// A market with the program's curve and anti-dump constants.
    pub fn new(
        params: &MarketParams,
        creator: Pubkey,
        mint: Pubkey,
        created_at: i64,
    ) -> Result<Self> {
        params.validate()?;

        let market = Self {
            creator,
            mint,
            fee_collector: params.fee_collector,
            name: params.name.clone(),
            symbol: params.symbol.clone(),
            curve: PriceCurve::new(MAX_SUPPLY, INITIAL_UNIT_PRICE, MAX_UNIT_PRICE)?,
            fee_percent: FEE_PERCENT,
            max_sell_percent: MAX_SELL_PERCENT,
            sell_cooldown: SELL_COOLDOWN,
            total_fee_collected: 0,
            total_buys: 0,
            total_sells: 0,
            total_volume: 0,
            created_at,
            bump: 0,
            vault_bump: 0,
        };
        market.validate_config()?;
        Ok(market)
    }

    pub fn validate_config(&self) -> Result<()> {
        self.curve.validate()?;
        validate_fee_percent(self.fee_percent)?;
        validate_sell_controls(self.max_sell_percent, self.sell_cooldown)?;
        validate_fee_collector(&self.fee_collector)
    }

    /// Tokens minted to the creator at genesis.
    pub fn creator_allocation(&self) -> Result<u64> {
        percent_of(self.curve.max_supply, CREATOR_ALLOCATION_PERCENT)
    }

    /// Largest amount one sell may move at the given supply.
    pub fn sell_limit(&self, supply: u64) -> Result<u64> {
        percent_of(supply, self.max_sell_percent)
    }

    pub fn protocol_fee(&self, gross: u64) -> Result<u64> {
        percent_of(gross, self.fee_percent)
    }

    pub fn record_buy(&mut self, payment: u64, fee: u64) -> Result<()> {
        self.total_fee_collected = safe_add(self.total_fee_collected, fee)?;
        self.total_volume = safe_add(self.total_volume, payment)?;
        self.total_buys = safe_add(self.total_buys, 1)?;
        Ok(())
    }

    pub fn record_sell(&mut self, gross: u64, fee: u64) -> Result<()> {
        self.total_fee_collected = safe_add(self.total_fee_collected, fee)?;
        self.total_volume = safe_add(self.total_volume, gross)?;
        self.total_sells = safe_add(self.total_sells, 1)?;
        Ok(())
    }
}
