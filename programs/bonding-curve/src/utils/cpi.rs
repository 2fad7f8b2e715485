use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{self, Burn, Mint, MintTo, Token, TokenAccount};
use crate::engine::{Ledger, Settlement, Treasury};
use crate::errors::BondingCurveError;

/// SPL token ledger scoped to a single holder account.
///
/// The market PDA is the mint authority and signs every mint. Balance and
/// supply reads reflect account state at instruction entry.
pub struct SplLedger<'a, 'info> {
    pub token_program: &'a Program<'info, Token>,
    pub mint: &'a Account<'info, Mint>,
    pub mint_authority: AccountInfo<'info>,
    pub authority_seeds: &'a [&'a [&'a [u8]]],
    pub holder: &'a Account<'info, TokenAccount>,
    pub holder_authority: AccountInfo<'info>,
}

impl<'a, 'info> SplLedger<'a, 'info> {
    fn check_holder(&self, account: &Pubkey) -> Result<()> {
        require_keys_eq!(*account, self.holder.owner, BondingCurveError::Unauthorized);
        Ok(())
    }
}

impl<'a, 'info> Ledger for SplLedger<'a, 'info> {
    fn mint(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        self.check_holder(account)?;
        token::mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: self.mint.to_account_info(),
                    to: self.holder.to_account_info(),
                    authority: self.mint_authority.clone(),
                },
                self.authority_seeds,
            ),
            amount,
        )
    }

    fn burn(&mut self, account: &Pubkey, amount: u64) -> Result<()> {
        self.check_holder(account)?;
        token::burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.mint.to_account_info(),
                    from: self.holder.to_account_info(),
                    authority: self.holder_authority.clone(),
                },
            ),
            amount,
        )
    }

    fn balance_of(&self, account: &Pubkey) -> Result<u64> {
        self.check_holder(account)?;
        Ok(self.holder.amount)
    }

    fn total_supply(&self) -> Result<u64> {
        Ok(self.mint.supply)
    }
}

/// Lamport reserve held by the market's vault PDA.
///
/// The vault always keeps its rent-exempt minimum; only the excess can be
/// paid out. A failed transfer returns an error, which aborts the whole
/// transaction, so a settlement is never partially applied.
pub struct VaultTreasury<'a, 'info> {
    pub system_program: &'a Program<'info, System>,
    pub vault: AccountInfo<'info>,
    pub vault_seeds: &'a [&'a [&'a [u8]]],
    pub payer: Option<AccountInfo<'info>>,
    pub recipients: Vec<AccountInfo<'info>>,
}

impl<'a, 'info> VaultTreasury<'a, 'info> {
    fn transfer(&self, from: AccountInfo<'info>, to: AccountInfo<'info>, amount: u64, signed: bool) -> Result<()> {
        let accounts = system_program::Transfer { from, to };
        let ctx = if signed {
            CpiContext::new_with_signer(self.system_program.to_account_info(), accounts, self.vault_seeds)
        } else {
            CpiContext::new(self.system_program.to_account_info(), accounts)
        };
        system_program::transfer(ctx, amount).map_err(|err| {
            msg!("Transfer of {} lamports failed: {:?}", amount, err);
            error!(BondingCurveError::TransferFailed)
        })
    }
}

impl<'a, 'info> Treasury for VaultTreasury<'a, 'info> {
    fn balance(&self) -> Result<u64> {
        let rent_floor = Rent::get()?.minimum_balance(0);
        Ok(self.vault.lamports().saturating_sub(rent_floor))
    }

    fn settle(&mut self, settlement: &Settlement) -> Result<()> {
        if let Some(inflow) = settlement.inflow {
            let payer = self
                .payer
                .clone()
                .filter(|payer| *payer.key == inflow.account)
                .ok_or(error!(BondingCurveError::TransferFailed))?;
            self.transfer(payer, self.vault.clone(), inflow.amount, false)?;
        }

        let total = settlement
            .total_payout()
            .ok_or(error!(BondingCurveError::MathOverflow))?;
        require!(self.balance()? >= total, BondingCurveError::TransferFailed);

        for payout in &settlement.payouts {
            let to = self
                .recipients
                .iter()
                .find(|recipient| *recipient.key == payout.account)
                .cloned()
                .ok_or(error!(BondingCurveError::TransferFailed))?;
            self.transfer(self.vault.clone(), to, payout.amount, true)?;
        }
        Ok(())
    }
}
