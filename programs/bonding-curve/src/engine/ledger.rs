use anchor_lang::prelude::*;

/// Fungible-token bookkeeping the market trades against.
pub trait Ledger {
    fn mint(&mut self, account: &Pubkey, amount: u64) -> Result<()>;
    fn burn(&mut self, account: &Pubkey, amount: u64) -> Result<()>;
    fn balance_of(&self, account: &Pubkey) -> Result<u64>;
    fn total_supply(&self) -> Result<u64>;
}

/// Holds the market's payment-asset reserve.
pub trait Treasury {
    /// Reserve available for payouts.
    fn balance(&self) -> Result<u64>;

    /// Applies every transfer in `settlement` or none of them.
    fn settle(&mut self, settlement: &Settlement) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub account: Pubkey,
    pub amount: u64,
}

/// Payment-asset movements that close out one trade.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    pub inflow: Option<Transfer>,
    pub payouts: Vec<Transfer>,
}

impl Settlement {
    pub fn receive(from: Pubkey, amount: u64) -> Self {
        Self {
            inflow: Some(Transfer { account: from, amount }),
            payouts: Vec::new(),
        }
    }

    /// Zero-amount payouts are dropped.
    pub fn pay(mut self, to: Pubkey, amount: u64) -> Self {
        if amount > 0 {
            self.payouts.push(Transfer { account: to, amount });
        }
        self
    }

    pub fn total_payout(&self) -> Option<u64> {
        self.payouts
            .iter()
            .try_fold(0u64, |total, transfer| total.checked_add(transfer.amount))
    }
}
