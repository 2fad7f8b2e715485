pub mod initialize_market;
pub mod buy;
pub mod deposit;
pub mod sell;
pub mod queries;

pub use initialize_market::*;
pub use buy::*;
pub use deposit::*;
pub use sell::*;
pub use queries::*;
