use crate::pool::SlotId;
use crate::session::SessionPhase;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RaffleError>;

#[derive(Error, Debug)]
pub enum RaffleError {
    #[error("Pool can only be loaded during upload, session is in {phase}")]
    LoadOutsideUpload { phase: SessionPhase },

    #[error("Participant list is empty")]
    EmptyParticipantList,

    #[error("Cannot spin an empty pool")]
    EmptySnapshot,

    #[error("Slot not found: {0}")]
    SlotNotFound(SlotId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Session is closed")]
    SessionClosed,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RaffleError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Caller broke a precondition; session state was left untouched.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::LoadOutsideUpload { .. }
                | Self::EmptyParticipantList
                | Self::EmptySnapshot
                | Self::SlotNotFound(_)
        )
    }
}
