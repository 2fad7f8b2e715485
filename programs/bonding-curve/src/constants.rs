// Token units
pub const TOKEN_DECIMALS: u8 = 9;
pub const UNIT_SCALE: u64 = 1_000_000_000;                    // base units per whole token

// Curve
pub const MAX_SUPPLY: u64 = 1_000_000 * UNIT_SCALE;           // 1M tokens
pub const INITIAL_UNIT_PRICE: u64 = 100_000;                  // 0.0001 SOL per token
pub const MAX_UNIT_PRICE: u64 = 10_000_000;                   // 0.01 SOL per token
pub const CREATOR_ALLOCATION_PERCENT: u8 = 20;                // minted to creator at genesis

// Fees and anti-dump controls
pub const FEE_PERCENT: u8 = 5;
pub const FEE_PERCENT_CAP: u8 = 10;                           // 10% max
pub const MAX_SELL_PERCENT: u8 = 20;                          // of current supply, per sell
pub const SELL_COOLDOWN: i64 = 3_600;                         // seconds between sells

// Genesis metadata
pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 10;

// Seeds
pub const MARKET_SEED: &[u8] = b"market";
pub const MINT_SEED: &[u8] = b"mint";
pub const VAULT_SEED: &[u8] = b"vault";
pub const SELLER_SEED: &[u8] = b"seller";
pub const REENTRANCY_SEED: &[u8] = b"reentrancy";
