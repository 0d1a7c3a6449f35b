//! Dual-currency ledger.
//!
//! Persistent currency survives across runs and pays for towers, plots and
//! upgrades. Volatile currency is earned by kills, pays for barricades and
//! abilities, and converts into persistent currency at every wave clear.

use aetheria_core::constants::{CONVERSION_PERCENT_FULL, CONVERSION_PERCENT_PENALIZED};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
}

/// Both balances. Neither can go negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    persistent: u32,
    volatile: u32,
}

impl Economy {
    pub fn new(persistent: u32, volatile: u32) -> Self {
        Self {
            persistent,
            volatile,
        }
    }

    pub fn persistent(&self) -> u32 {
        self.persistent
    }

    pub fn volatile(&self) -> u32 {
        self.volatile
    }

    /// Check and deduct in one step. On error nothing changes.
    pub fn try_spend_persistent(&mut self, cost: u32) -> Result<(), EconomyError> {
        self.persistent = spend(self.persistent, cost)?;
        Ok(())
    }

    /// Check and deduct in one step. On error nothing changes.
    pub fn try_spend_volatile(&mut self, cost: u32) -> Result<(), EconomyError> {
        self.volatile = spend(self.volatile, cost)?;
        Ok(())
    }

    pub fn credit_kill(&mut self, reward: u32) {
        self.volatile = self.volatile.saturating_add(reward);
    }

    /// Convert the whole volatile balance at the end of a wave. The rate
    /// drops when the heartcrystal was breached during the wave. Returns
    /// the amount added to the persistent balance.
    pub fn convert_wave(&mut self, breached: bool) -> u32 {
        let percent = conversion_percent(breached);
        let converted = (u64::from(self.volatile) * u64::from(percent) / 100) as u32;
        debug!(
            volatile = self.volatile,
            percent, converted, "converting volatile currency"
        );
        self.persistent = self.persistent.saturating_add(converted);
        self.volatile = 0;
        converted
    }

    /// Start a new run: volatile balance resets, persistent is kept.
    pub fn reset_run(&mut self, starting_volatile: u32) {
        self.volatile = starting_volatile;
    }
}

/// Conversion percentage for a wave.
pub fn conversion_percent(breached: bool) -> u32 {
    if breached {
        CONVERSION_PERCENT_PENALIZED
    } else {
        CONVERSION_PERCENT_FULL
    }
}

fn spend(balance: u32, cost: u32) -> Result<u32, EconomyError> {
    balance
        .checked_sub(cost)
        .ok_or(EconomyError::InsufficientFunds {
            needed: cost,
            available: balance,
        })
}
