use anchor_lang::prelude::*;
use super::buy::{execute, Buy};

/// A bare lamport payment into the market buys at the current price.
pub fn deposit(ctx: Context<Buy>, payment: u64) -> Result<()> {
    msg!("Direct deposit of {} lamports", payment);
    execute(ctx.accounts, payment, true)
}
