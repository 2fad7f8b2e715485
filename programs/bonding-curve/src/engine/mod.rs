pub mod ledger;
pub mod pricing;
pub mod trading;

pub use ledger::*;
pub use pricing::*;
pub use trading::{quote_buy, quote_sell, BuyQuote, ExecutedTrade, SellQuote, Side};
