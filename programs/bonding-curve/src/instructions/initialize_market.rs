use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::engine::Ledger;
use crate::errors::BondingCurveError;
use crate::state::{Market, MarketParams};
use crate::utils::cpi::SplLedger;
use crate::utils::{rent_shortfall, ReentrancyGuard};

#[derive(Accounts)]
#[instruction(params: MarketParams)]
pub struct InitializeMarket<'info> {
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [
            MARKET_SEED,
            creator.key().as_ref(),
            params.symbol.as_bytes(),
        ],
        bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        init,
        payer = creator,
        seeds = [MINT_SEED, market.key().as_ref()],
        bump,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = market,
    )]
    pub mint: Account<'info, Mint>,

    #[account(
        init,
        payer = creator,
        associated_token::mint = mint,
        associated_token::authority = creator,
    )]
    pub creator_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [VAULT_SEED, market.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    /// CHECK: any account may collect fees; it is topped up to its rent floor here
    #[account(mut, address = params.fee_collector @ BondingCurveError::InvalidFeeCollector)]
    pub fee_collector: UncheckedAccount<'info>,

    #[account(
        init,
        payer = creator,
        space = 8 + ReentrancyGuard::INIT_SPACE,
        seeds = [REENTRANCY_SEED, market.key().as_ref()],
        bump,
    )]
    pub reentrancy_guard: Account<'info, ReentrancyGuard>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_market(ctx: Context<InitializeMarket>, params: MarketParams) -> Result<()> {
    let current_time = Clock::get()?.unix_timestamp;
    let accounts = &mut *ctx.accounts;

    let mut market = Market::new(
        &params,
        accounts.creator.key(),
        accounts.mint.key(),
        current_time,
    )?;
    market.bump = ctx.bumps.market;
    market.vault_bump = ctx.bumps.vault;
    let allocation = market.creator_allocation()?;
    accounts.market.set_inner(market);

    let guard = &mut accounts.reentrancy_guard;
    guard.is_locked = false;
    guard.bump = ctx.bumps.reentrancy_guard;

    // Vault and fee collector must stay rent exempt to send or receive lamports
    let rent_floor = Rent::get()?.minimum_balance(0);
    fund_to_rent_floor(
        &accounts.system_program,
        &accounts.creator,
        accounts.vault.to_account_info(),
        rent_floor,
    )?;
    fund_to_rent_floor(
        &accounts.system_program,
        &accounts.creator,
        accounts.fee_collector.to_account_info(),
        rent_floor,
    )?;

    let creator_key = accounts.creator.key();
    let bump = [ctx.bumps.market];
    let market_seeds: &[&[u8]] = &[
        MARKET_SEED,
        creator_key.as_ref(),
        params.symbol.as_bytes(),
        &bump,
    ];
    let market_signer: &[&[&[u8]]] = &[market_seeds];

    let mut ledger = SplLedger {
        token_program: &accounts.token_program,
        mint: &accounts.mint,
        mint_authority: accounts.market.to_account_info(),
        authority_seeds: market_signer,
        holder: &accounts.creator_token_account,
        holder_authority: accounts.creator.to_account_info(),
    };
    ledger.mint(&creator_key, allocation)?;

    emit!(MarketInitialized {
        market: accounts.market.key(),
        creator: creator_key,
        mint: accounts.mint.key(),
        fee_collector: params.fee_collector,
        name: params.name.clone(),
        symbol: params.symbol.clone(),
        creator_allocation: allocation,
        timestamp: current_time,
    });

    msg!(
        "Market {} ({}) initialized, {} units minted to creator",
        params.name,
        params.symbol,
        allocation
    );

    Ok(())
}

fn fund_to_rent_floor<'info>(
    system_program: &Program<'info, System>,
    payer: &Signer<'info>,
    target: AccountInfo<'info>,
    rent_floor: u64,
) -> Result<()> {
    let shortfall = rent_shortfall(target.lamports(), rent_floor);
    if shortfall == 0 {
        return Ok(());
    }
    msg!("Funding {} with {} lamports", target.key(), shortfall);
    anchor_lang::system_program::transfer(
        CpiContext::new(
            system_program.to_account_info(),
            anchor_lang::system_program::Transfer {
                from: payer.to_account_info(),
                to: target,
            },
        ),
        shortfall,
    )
}

#[event]
pub struct MarketInitialized {
    pub market: Pubkey,
    pub creator: Pubkey,
    pub mint: Pubkey,
    pub fee_collector: Pubkey,
    pub name: String,
    pub symbol: String,
    pub creator_allocation: u64,
    pub timestamp: i64,
}
