pub mod curve;
pub mod engine;
pub mod timing;

pub use curve::SpinCurve;
pub use engine::{pick_winner, SpinEngine};
pub use timing::{SpinTimingState, TickOutcome};

use crate::pool::{PoolSnapshot, Slot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies one draw. Strictly increasing within a session so signals from a
/// cancelled draw can be told apart from the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DrawToken(u64);

impl std::fmt::Display for DrawToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Outcome of one completed draw, consumed by the session in the step that
/// receives it.
#[derive(Debug, Clone)]
pub struct DrawResult {
    pub token: DrawToken,
    pub winner: Slot,
    pub winner_index: usize,
    pub pool_before: PoolSnapshot,
    pub drawn_at: DateTime<Utc>,
}
