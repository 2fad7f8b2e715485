use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::engine::{trading, ExecutedTrade};
use crate::errors::BondingCurveError;
use crate::state::Market;
use crate::utils::cpi::{SplLedger, VaultTreasury};
use crate::utils::ReentrancyGuard;

#[derive(Accounts)]
pub struct Buy<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

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
        init_if_needed,
        payer = buyer,
        associated_token::mint = mint,
        associated_token::authority = buyer,
    )]
    pub buyer_token_account: Account<'info, TokenAccount>,

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
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn buy(ctx: Context<Buy>, payment: u64) -> Result<()> {
    execute(ctx.accounts, payment, false)
}

/// Shared by `buy` and the direct-deposit path.
pub(crate) fn execute(accounts: &mut Buy, payment: u64, direct: bool) -> Result<()> {
    let market_key = accounts.market.key();
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
        holder: &accounts.buyer_token_account,
        holder_authority: accounts.buyer.to_account_info(),
    };
    let mut treasury = VaultTreasury {
        system_program: &accounts.system_program,
        vault: accounts.vault.to_account_info(),
        vault_seeds: vault_signer,
        payer: Some(accounts.buyer.to_account_info()),
        recipients: vec![accounts.fee_collector.to_account_info()],
    };

    let buyer = accounts.buyer.key();
    let trade = if direct {
        trading::receive(
            &mut accounts.market,
            &mut accounts.reentrancy_guard,
            &mut ledger,
            &mut treasury,
            &buyer,
            payment,
        )?
    } else {
        trading::buy(
            &mut accounts.market,
            &mut accounts.reentrancy_guard,
            &mut ledger,
            &mut treasury,
            &buyer,
            payment,
        )?
    };

    let timestamp = Clock::get()?.unix_timestamp;
    emit!(Bought {
        market: market_key,
        buyer,
        amount: trade.token_amount,
        unit_price: trade.unit_price,
        payment: trade.gross,
        timestamp,
    });
    emit_fee(market_key, &accounts.market, &trade, timestamp);

    Ok(())
}

pub(crate) fn emit_fee(market_key: Pubkey, market: &Market, trade: &ExecutedTrade, timestamp: i64) {
    if trade.protocol_fee == 0 {
        return;
    }
    emit!(FeeCollected {
        market: market_key,
        fee_collector: market.fee_collector,
        amount: trade.protocol_fee,
        total_fee_collected: market.total_fee_collected,
        timestamp,
    });
}

#[event]
pub struct Bought {
    pub market: Pubkey,
    pub buyer: Pubkey,
    pub amount: u64,
    pub unit_price: u64,
    pub payment: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeeCollected {
    pub market: Pubkey,
    pub fee_collector: Pubkey,
    pub amount: u64,
    pub total_fee_collected: u64,
    pub timestamp: i64,
}
