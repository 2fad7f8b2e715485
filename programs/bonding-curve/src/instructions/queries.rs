use anchor_lang::prelude::*;
use anchor_spl::token::Mint;
use crate::constants::*;
use crate::state::Market;

#[derive(Accounts)]
pub struct QueryMarket<'info> {
    #[account(has_one = mint)]
    pub market: Account<'info, Market>,

    pub mint: Account<'info, Mint>,

    #[account(
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,
}

/// Lamports per whole token at the current supply.
pub fn current_price(ctx: Context<QueryMarket>) -> Result<u64> {
    Ok(ctx.accounts.market.curve.price(ctx.accounts.mint.supply))
}

/// Lamports held by the vault, rent reserve included.
pub fn reserve_balance(ctx: Context<QueryMarket>) -> Result<u64> {
    Ok(ctx.accounts.vault.lamports())
}

pub fn total_fee_collected(ctx: Context<QueryMarket>) -> Result<u64> {
    Ok(ctx.accounts.market.total_fee_collected)
}
