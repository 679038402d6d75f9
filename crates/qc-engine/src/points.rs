//! Cumulative point bookkeeping for users.

use serde::{Deserialize, Serialize};

/// Which way a point adjustment moves the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Normal scoring.
    Add,
    /// Corrections and rollbacks.
    Subtract,
}

impl Direction {
    /// `delta` with this direction's sign applied.
    pub const fn signed(self, delta: i64) -> i64 {
        match self {
            Self::Add => delta,
            Self::Subtract => delta.saturating_neg(),
        }
    }
}

/// Apply `delta` to `total`. Totals are not clamped and may go negative; only the
/// `i64` bounds saturate.
pub const fn adjust(total: i64, delta: i64, direction: Direction) -> i64 {
    total.saturating_add(direction.signed(delta))
}
