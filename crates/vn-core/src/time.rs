//! Cooperative scheduling time model.
//!
//! The host drives this core from a single loop; each invocation is one
//! [`Quantum`].  Every budget in the workspace (search batches, planner
//! node limits, walker iteration cutoffs) is counted in quanta or in units of
//! work, never in wall-clock time.

use std::fmt;

// ── Quantum ───────────────────────────────────────────────────────────────────

/// An absolute quantum counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantum(pub u64);

impl Quantum {
    pub const ZERO: Quantum = Quantum(0);

    /// Return the quantum `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Quantum {
        Quantum(self.0 + n)
    }

    /// Quanta elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Quantum) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::ops::Add<u64> for Quantum {
    type Output = Quantum;
    #[inline]
    fn add(self, rhs: u64) -> Quantum {
        Quantum(self.0 + rhs)
    }
}

impl fmt::Display for Quantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

// ── Pacer ─────────────────────────────────────────────────────────────────────

/// Runs a periodic job every `interval` quanta.
///
/// The host loop ticks at its own rate; subsystems that should only do work
/// every Nth quantum hold a `Pacer` and ask it whether this quantum is theirs.
/// An interval of 0 or 1 fires every quantum.
#[derive(Clone, Debug)]
pub struct Pacer {
    interval: u64,
    last:     Option<Quantum>,
}

impl Pacer {
    pub fn new(interval: u64) -> Self {
        Self { interval: interval.max(1), last: None }
    }

    /// `true` if the job should run at `now`; records `now` when it does.
    pub fn ready(&mut self, now: Quantum) -> bool {
        match self.last {
            Some(last) if now.since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last firing so the next call to `ready` fires immediately.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }
}
