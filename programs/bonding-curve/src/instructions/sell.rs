use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::engine::trading;
use crate::errors::BondingCurveError;
use crate::state::{Market, SellerRecord};
use crate::utils::cpi::{SplLedger, VaultTreasury};
use crate::utils::ReentrancyGuard;
use super::buy::emit_fee;

#[derive(Accounts)]
pub struct Sell<'info> {
    #[account(mut)]
    pub seller: Signer<'info>,

    #[account(
        mut,
        seeds = [
            MARKET_SEED,
            market.creator.as_ref(),
            market.symbol.as_bytes(),
        ],
        bump = market.bump,
        has_one = mint,
        has_one = fee_collector @ BondingCurveError::InvalidFeeCollector,
    )]
    pub market: Account<'info, Market>,

    #[account(mut)]
    pub mint: Account<'info, Mint>,

    #[account(
        mut,
        associated_token::mint = mint,
        associated_token::authority = seller,
    )]
    pub seller_token_account: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = seller,
        space = 8 + SellerRecord::INIT_SPACE,
        seeds = [
            SELLER_SEED,
            market.key().as_ref(),
            seller.key().as_ref(),
        ],
        bump,
    )]
    pub seller_record: Account<'info, SellerRecord>,

    #[account(
        mut,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    /// CHECK: Receives protocol fees, must match market.fee_collector
    #[account(mut)]
    pub fee_collector: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [REENTRANCY_SEED, market.key().as_ref()],
        bump = reentrancy_guard.bump,
    )]
    pub reentrancy_guard: Account<'info, ReentrancyGuard>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn sell(ctx: Context<Sell>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;
    let market_key = accounts.market.key();
    let seller = accounts.seller.key();

    // First sell from this account
    let record = &mut accounts.seller_record;
    if record.market == Pubkey::default() {
        record.market = market_key;
        record.seller = seller;
        record.bump = ctx.bumps.seller_record;
    }

    let creator = accounts.market.creator;
    let symbol = accounts.market.symbol.clone();
    let bump = [accounts.market.bump];
    let vault_bump = [accounts.market.vault_bump];

    let market_seeds: &[&[u8]] = &[MARKET_SEED, creator.as_ref(), symbol.as_bytes(), &bump];
    let market_signer: &[&[&[u8]]] = &[market_seeds];
    let vault_seeds: &[&[u8]] = &[VAULT_SEED, market_key.as_ref(), &vault_bump];
    let vault_signer: &[&[&[u8]]] = &[vault_seeds];

    let mut ledger = SplLedger {
        token_program: &accounts.token_program,
        mint: &accounts.mint,
        mint_authority: accounts.market.to_account_info(),
        authority_seeds: market_signer,
        holder: &accounts.seller_token_account,
        holder_authority: accounts.seller.to_account_info(),
    };
    let mut treasury = VaultTreasury {
        system_program: &accounts.system_program,
        vault: accounts.vault.to_account_info(),
        vault_seeds: vault_signer,
        payer: None,
        recipients: vec![
            accounts.seller.to_account_info(),
            accounts.fee_collector.to_account_info(),
        ],
    };

    let trade = trading::sell(
        &mut accounts.market,
        &mut accounts.reentrancy_guard,
        &mut accounts.seller_record,
        &mut ledger,
        &mut treasury,
        &seller,
        amount,
        now,
    )?;

    emit!(Sold {
        market: market_key,
        seller,
        amount: trade.token_amount,
        unit_price: trade.unit_price,
        net_proceeds: trade.net,
        timestamp: now,
    });
    emit_fee(market_key, &accounts.market, &trade, now);

    Ok(())
}

#[event]
pub struct Sold {
    pub market: Pubkey,
    pub seller: Pubkey,
    pub amount: u64,
    pub unit_price: u64,
    pub net_proceeds: u64,
    pub timestamp: i64,
}
