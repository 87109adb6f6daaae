//! Audio and celebration cues.
//!
//! The session asks for cues through [`EffectsGateway`]; whatever actually plays
//! them sits behind [`CueBackend`]. Backend failures stop at the gateway: they are
//! logged and dropped so a broken speaker never stalls a raffle.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    Lever,
    Spin,
    Win,
    Confetti,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Lever => "lever",
            Cue::Spin => "spin",
            Cue::Win => "win",
            Cue::Confetti => "confetti",
        }
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CueOptions {
    pub looped: bool,
    pub volume: Option<f32>,
}

impl CueOptions {
    pub fn looped(mut self) -> Self {
        self.looped = true;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Volume the backend should use, clamped to `0.0..=1.0`.
    pub fn effective_volume(&self) -> f32 {
        self.volume.unwrap_or(DEFAULT_VOLUME).clamp(0.0, 1.0)
    }
}

#[derive(Error, Debug)]
pub enum EffectsError {
    #[error("Cue resource not found: {0}")]
    MissingResource(Cue),

    #[error("Playback refused: {0}")]
    PlaybackDenied(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Whatever actually makes the noise. Calls must not block.
pub trait CueBackend: Send + Sync {
    fn play(&self, cue: Cue, options: CueOptions) -> Result<(), EffectsError>;
    fn stop(&self, cue: Cue) -> Result<(), EffectsError>;
    fn stop_all(&self) -> Result<(), EffectsError>;
}

/// Best-effort front for a [`CueBackend`]. A gateway without a backend is a
/// silent no-op.
#[derive(Clone, Default)]
pub struct EffectsGateway {
    backend: Option<Arc<dyn CueBackend>>,
}

impl EffectsGateway {
    pub fn new(backend: Arc<dyn CueBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn cue(&self, cue: Cue, options: CueOptions) {
        if let Some(backend) = &self.backend {
            if let Err(e) = backend.play(cue, options) {
                tracing::warn!("Failed to play cue \"{}\": {}", cue, e);
            }
        }
    }

    pub fn stop_cue(&self, cue: Cue) {
        if let Some(backend) = &self.backend {
            if let Err(e) = backend.stop(cue) {
                tracing::warn!("Failed to stop cue \"{}\": {}", cue, e);
            }
        }
    }

    pub fn stop_all(&self) {
        if let Some(backend) = &self.backend {
            if let Err(e) = backend.stop_all() {
                tracing::warn!("Failed to stop cues: {}", e);
            }
        }
    }
}

impl std::fmt::Debug for EffectsGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectsGateway")
            .field("enabled", &self.backend.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CueCall {
    Play(Cue, CueOptions),
    Stop(Cue),
    StopAll,
}

/// Backend that only remembers what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Mutex<Vec<CueCall>>,
    failing: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every call, then reports it as failed.
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn calls(&self) -> Vec<CueCall> {
        self.calls.lock().clone()
    }

    pub fn played(&self) -> Vec<Cue> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                CueCall::Play(cue, _) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: CueCall) -> Result<(), EffectsError> {
        self.calls.lock().push(call);
        if self.failing {
            return Err(EffectsError::PlaybackDenied("recording backend".to_string()));
        }
        Ok(())
    }
}

impl CueBackend for RecordingBackend {
    fn play(&self, cue: Cue, options: CueOptions) -> Result<(), EffectsError> {
        self.record(CueCall::Play(cue, options))
    }

    fn stop(&self, cue: Cue) -> Result<(), EffectsError> {
        self.record(CueCall::Stop(cue))
    }

    fn stop_all(&self) -> Result<(), EffectsError> {
        self.record(CueCall::StopAll)
    }
}
