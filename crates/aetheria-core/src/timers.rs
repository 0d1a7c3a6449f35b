//! Named per-entity countdown timers.
//!
//! Every timed behaviour (slow expiry, shield cooldown, pulse abilities,
//! tower disable, visual windows) is an entry in a `Timers` table rather
//! than an ad hoc counter. Entries are kept sorted by `TimerKind`, so the
//! expiry order within one tick is the declaration order below.

use serde::{Deserialize, Serialize};

/// Timer identity. Declaration order is processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimerKind {
    /// Enemy movement slow.
    Slow,
    /// Shield regeneration delay after a hit.
    ShieldCooldown,
    /// Repeating heal-allies pulse.
    HealPulse,
    /// Repeating slow-towers pulse.
    ChronoPulse,
    /// Cosmetic window after a pulse fires.
    PulseFlash,
    /// Tower acquisition/attack disabled.
    Disabled,
    /// Tower fire-rate slow.
    FireSlow,
    /// Cosmetic window after a tower attack.
    Vfx,
}

/// What the owning system must do when a timer reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryAction {
    /// Set speed back to base speed.
    RestoreSpeed,
    /// Set fire-rate factor back to 1.
    RestoreFireRate,
    /// Fire the heal-allies pulse.
    FireHealPulse,
    /// Fire the slow-towers pulse.
    FireChronoPulse,
    /// Nothing happens; the timer only gated a state.
    None,
}

impl TimerKind {
    pub fn on_expiry(self) -> ExpiryAction {
        match self {
            TimerKind::Slow => ExpiryAction::RestoreSpeed,
            TimerKind::FireSlow => ExpiryAction::RestoreFireRate,
            TimerKind::HealPulse => ExpiryAction::FireHealPulse,
            TimerKind::ChronoPulse => ExpiryAction::FireChronoPulse,
            TimerKind::ShieldCooldown
            | TimerKind::PulseFlash
            | TimerKind::Disabled
            | TimerKind::Vfx => ExpiryAction::None,
        }
    }
}

/// A single countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub kind: TimerKind,
    /// Ticks left before expiry.
    pub remaining: u32,
    /// Reload value for repeating timers.
    pub period: Option<u32>,
}

/// Table of countdowns attached to an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timers {
    entries: Vec<Countdown>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start or overwrite a one-shot timer. Zero ticks removes it.
    pub fn set(&mut self, kind: TimerKind, ticks: u32) {
        self.insert(Countdown {
            kind,
            remaining: ticks,
            period: None,
        });
    }

    /// Start or overwrite a repeating timer. A zero period is ignored.
    pub fn set_repeating(&mut self, kind: TimerKind, period: u32) {
        if period == 0 {
            return;
        }
        self.insert(Countdown {
            kind,
            remaining: period,
            period: Some(period),
        });
    }

    pub fn clear(&mut self, kind: TimerKind) {
        self.entries.retain(|c| c.kind != kind);
    }

    pub fn remaining(&self, kind: TimerKind) -> u32 {
        self.entries
            .iter()
            .find(|c| c.kind == kind)
            .map_or(0, |c| c.remaining)
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.remaining(kind) > 0
    }

    /// Decrement every timer once. Expired kinds are appended to `expired`
    /// in processing order; repeating timers reload, one-shots are dropped.
    pub fn tick(&mut self, expired: &mut Vec<TimerKind>) {
        for countdown in &mut self.entries {
            countdown.remaining = countdown.remaining.saturating_sub(1);
            if countdown.remaining == 0 {
                expired.push(countdown.kind);
                if let Some(period) = countdown.period {
                    countdown.remaining = period;
                }
            }
        }
        self.entries.retain(|c| c.remaining > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Countdown> {
        self.entries.iter()
    }

    fn insert(&mut self, countdown: Countdown) {
        self.clear(countdown.kind);
        if countdown.remaining == 0 {
            return;
        }
        let at = self
            .entries
            .partition_point(|c| c.kind < countdown.kind);
        self.entries.insert(at, countdown);
    }
}
