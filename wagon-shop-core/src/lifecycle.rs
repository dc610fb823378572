//! Open/close state machine for the shop window.
//!
//! `Closing` is a guard state: it looks closed, but for `guard_ms` after the close it also rejects
//! catalog replacement pushes that were in flight when the shop closed.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "phase")]
pub enum LifecyclePhase {
    #[default]
    Closed,
    Open,
    Closing {
        since_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopLifecycle {
    phase: LifecyclePhase,
    guard_ms: u64,
}

impl ShopLifecycle {
    #[must_use]
    pub const fn new(guard_ms: u64) -> Self {
        Self {
            phase: LifecyclePhase::Closed,
            guard_ms,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    #[must_use]
    pub const fn guard_ms(&self) -> u64 {
        self.guard_ms
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self.phase, LifecyclePhase::Open)
    }

    #[must_use]
    pub const fn is_closing(&self) -> bool {
        matches!(self.phase, LifecyclePhase::Closing { .. })
    }

    /// Time at which a pending close settles, if one is pending.
    #[must_use]
    pub const fn settles_at(&self) -> Option<u64> {
        match self.phase {
            LifecyclePhase::Closing { since_ms } => Some(since_ms.saturating_add(self.guard_ms)),
            LifecyclePhase::Open | LifecyclePhase::Closed => None,
        }
    }

    /// Finish a pending close once the guard interval has elapsed.
    pub fn settle(&mut self, now_ms: u64) {
        if self.settles_at().is_some_and(|at| now_ms >= at) {
            self.phase = LifecyclePhase::Closed;
        }
    }

    /// Open the shop. Also cancels a pending close.
    pub fn open(&mut self) {
        self.phase = LifecyclePhase::Open;
    }

    /// Start (or restart) the close guard.
    pub fn begin_closing(&mut self, now_ms: u64) {
        self.phase = LifecyclePhase::Closing { since_ms: now_ms };
    }

    /// Whether a catalog replacement push may be applied at `now_ms`.
    #[must_use]
    pub fn accepts_catalog(&self, now_ms: u64) -> bool {
        self.settles_at().is_none_or(|at| now_ms >= at)
    }
}

impl Default for ShopLifecycle {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CLOSING_GUARD_MS)
    }
}
