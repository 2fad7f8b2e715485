use anchor_lang::prelude::*;

#[error_code]
pub enum BondingCurveError {
    #[msg("Amount must be greater than zero")]
    InvalidInput,

    #[msg("Market has reached its maximum supply")]
    MarketExhausted,

    #[msg("Insufficient token balance")]
    InsufficientBalance,

    #[msg("Sell cooldown is still active")]
    CooldownActive,

    #[msg("Sell amount exceeds the per-transaction limit")]
    ExceedsSellLimit,

    #[msg("Transfer could not be completed")]
    TransferFailed,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Operation locked due to reentrancy")]
    ReentrancyLocked,

    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Invalid market parameters")]
    InvalidParameters,

    #[msg("Token name too long")]
    NameTooLong,

    #[msg("Token symbol too long")]
    SymbolTooLong,

    #[msg("Invalid fee collector")]
    InvalidFeeCollector,
}
