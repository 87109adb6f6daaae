//! Elimination raffle engine
//!
//! A host loads a list of participants, then draws them one at a time: each
//! draw spins through the pool on a decelerating schedule, picks a winner
//! uniformly at random, reveals it and removes it, until nobody is left.

pub mod actor;
pub mod config;
pub mod effects;
pub mod error;
pub mod participant;
pub mod pool;
pub mod session;
pub mod signal;
pub mod spin;
pub mod timer;

pub use actor::{spawn_session, SessionHandle};
pub use config::RaffleConfig;
pub use effects::{Cue, CueBackend, CueOptions, EffectsError, EffectsGateway, RecordingBackend};
pub use error::{RaffleError, Result};
pub use participant::Participant;
pub use pool::{ParticipantPool, PoolSnapshot, Slot, SlotId};
pub use session::{
    DrawRequest, IgnoreReason, RaffleSession, SessionEvent, SessionPhase, SessionStatus,
    WinnerNotice,
};
pub use spin::{DrawResult, DrawToken, SpinCurve, SpinEngine};
