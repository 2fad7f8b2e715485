use anchor_lang::prelude::*;
use crate::utils::safe_add;

/// Per-seller cooldown and telemetry, one PDA per (market, seller).
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct SellerRecord {
    pub market: Pubkey,
    pub seller: Pubkey,
    pub last_sell_time: i64,
    pub total_sold: u64,    // lifetime, not enforced
    pub bump: u8,
}

impl SellerRecord {
    /// Inclusive: a sell exactly `cooldown` seconds after the last one is allowed.
    pub fn cooldown_elapsed(&self, now: i64, cooldown: i64) -> bool {
        now >= self.last_sell_time.saturating_add(cooldown)
    }

    pub fn record_sale(&mut self, amount: u64, now: i64) -> Result<()> {
        self.total_sold = safe_add(self.total_sold, amount)?;
        self.last_sell_time = now;
        Ok(())
    }
}
