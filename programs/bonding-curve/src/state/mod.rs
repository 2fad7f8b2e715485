use anchor_lang::prelude::*;
use crate::utils::validation::*;

pub mod market;
pub mod seller;

pub use market::*;
pub use seller::*;

/// Genesis arguments. Everything else about a market is a program constant.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct MarketParams {
    pub name: String,
    pub symbol: String,
    pub fee_collector: Pubkey,
}

impl MarketParams {
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_symbol(&self.symbol)?;
        validate_fee_collector(&self.fee_collector)
    }
}
