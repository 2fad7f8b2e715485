use anchor_lang::prelude::*;
use crate::errors::BondingCurveError;

/// One per market. Held for the duration of every buy and sell.
#[account]
#[derive(InitSpace, Default)]
pub struct ReentrancyGuard {
    pub is_locked: bool,
    pub bump: u8,
}

impl ReentrancyGuard {
    pub fn lock(&mut self) -> Result<()> {
        require!(!self.is_locked, BondingCurveError::ReentrancyLocked);
        self.is_locked = true;
        Ok(())
    }

    pub fn unlock(&mut self) -> Result<()> {
        self.is_locked = false;
        Ok(())
    }
}

/// Lock the trading engine holds around every buy and sell.
pub trait ReentrancyLock {
    fn acquire(&mut self) -> Result<()>;

    fn release(&mut self) -> Result<()>;

    /// Runs `f` with the lock held and releases it on every exit path.
    fn guarded<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.acquire()?;
        let result = f();
        self.release()?;
        result
    }
}

impl ReentrancyLock for ReentrancyGuard {
    fn acquire(&mut self) -> Result<()> {
        self.lock()
    }

    fn release(&mut self) -> Result<()> {
        self.unlock()
    }
}

/// Writes every state change through to the account data, so a nested
/// invocation reading the guard account sees it held.
impl<'info> ReentrancyLock for Account<'info, ReentrancyGuard> {
    fn acquire(&mut self) -> Result<()> {
        self.lock()?;
        self.exit(&crate::ID)
    }

    fn release(&mut self) -> Result<()> {
        self.unlock()?;
        self.exit(&crate::ID)
    }
}
