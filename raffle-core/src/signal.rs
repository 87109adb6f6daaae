use crate::spin::{DrawResult, DrawToken};

/// Timer output fed back into the session, always tagged with the draw that
/// armed it.
#[derive(Debug, Clone)]
pub enum Signal {
    Tick {
        token: DrawToken,
        index: usize,
        name: String,
        remaining_secs: u64,
    },
    Landed {
        token: DrawToken,
        index: usize,
        name: String,
    },
    Resolved(DrawResult),
    DwellElapsed {
        token: DrawToken,
    },
}

impl Signal {
    pub fn token(&self) -> DrawToken {
        match self {
            Signal::Tick { token, .. }
            | Signal::Landed { token, .. }
            | Signal::DwellElapsed { token } => *token,
            Signal::Resolved(result) => result.token,
        }
    }
}
