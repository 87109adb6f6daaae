use raffle_core::{Cue, CueBackend, CueOptions, EffectsError};
use std::io::Write;

/// Cue backend for a plain terminal: logs each cue and rings the bell on a win.
#[derive(Debug, Default)]
pub struct TerminalCues;

impl TerminalCues {
    pub fn new() -> Self {
        Self
    }

    fn bell(&self) -> Result<(), EffectsError> {
        let mut stderr = std::io::stderr();
        stderr
            .write_all(b"\x07")
            .and_then(|_| stderr.flush())
            .map_err(|e| EffectsError::Backend(e.to_string()))
    }
}

impl CueBackend for TerminalCues {
    fn play(&self, cue: Cue, options: CueOptions) -> Result<(), EffectsError> {
        tracing::debug!(
            "Cue {} at volume {:.1}{}",
            cue,
            options.effective_volume(),
            if options.looped { " (looping)" } else { "" }
        );

        if cue == Cue::Win {
            self.bell()?;
        }
        Ok(())
    }

    fn stop(&self, cue: Cue) -> Result<(), EffectsError> {
        tracing::debug!("Cue {} stopped", cue);
        Ok(())
    }

    fn stop_all(&self) -> Result<(), EffectsError> {
        tracing::debug!("All cues stopped");
        Ok(())
    }
}
