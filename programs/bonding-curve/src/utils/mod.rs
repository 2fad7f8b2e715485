pub mod cpi;
pub mod math;
pub mod reentrancy;
pub mod validation;

pub use math::*;
pub use reentrancy::*;
