use anchor_lang::prelude::*;

pub mod constants;
pub mod engine;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;
use state::MarketParams;

declare_id!("2xk1F1Dx2Qv37FFrrZGGCHq6zxip4ZiwYBVuBkTBSUr3");

#[program]
pub mod bonding_curve {
    use super::*;

    pub fn initialize_market(
        ctx: Context<InitializeMarket>,
        params: MarketParams,
    ) -> Result<()> {
        instructions::initialize_market::initialize_market(ctx, params)
    }

    pub fn buy(ctx: Context<Buy>, payment: u64) -> Result<()> {
        instructions::buy::buy(ctx, payment)
    }

    pub fn deposit(ctx: Context<Buy>, payment: u64) -> Result<()> {
        instructions::deposit::deposit(ctx, payment)
    }

    pub fn sell(ctx: Context<Sell>, amount: u64) -> Result<()> {
        instructions::sell::sell(ctx, amount)
    }

    pub fn current_price(ctx: Context<QueryMarket>) -> Result<u64> {
        instructions::queries::current_price(ctx)
    }

    pub fn reserve_balance(ctx: Context<QueryMarket>) -> Result<u64> {
        instructions::queries::reserve_balance(ctx)
    }

    pub fn total_fee_collected(ctx: Context<QueryMarket>) -> Result<u64> {
        instructions::queries::total_fee_collected(ctx)
    }
}


#[cfg(test)]
mod tests;
