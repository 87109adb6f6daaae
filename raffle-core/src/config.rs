use crate::error::{RaffleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RaffleConfig {
    pub draw_duration_seconds: f64,
    pub reveal_dwell_seconds: f64,
    pub min_tick_ms: u64,
    pub max_tick_ms: u64,
    /// Pause between the last spin frame and the winner announcement.
    pub settle_seconds: f64,
    /// Fixed seed for reproducible draws; OS entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RaffleConfig {
    fn default() -> Self {
        Self {
            draw_duration_seconds: 15.0,
            reveal_dwell_seconds: 5.0,
            min_tick_ms: 50,
            max_tick_ms: 500,
            settle_seconds: 1.0,
            seed: None,
        }
    }
}

impl RaffleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            RaffleError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        check_seconds("drawDurationSeconds", self.draw_duration_seconds)?;
        check_seconds("revealDwellSeconds", self.reveal_dwell_seconds)?;
        check_seconds("settleSeconds", self.settle_seconds)?;

        if self.draw_duration_seconds == 0.0 {
            return Err(RaffleError::config(
                "drawDurationSeconds must be greater than 0",
            ));
        }

        if self.min_tick_ms == 0 {
            return Err(RaffleError::config("minTickMs must be greater than 0"));
        }

        if self.max_tick_ms < self.min_tick_ms {
            return Err(RaffleError::config(format!(
                "maxTickMs ({}) must not be below minTickMs ({})",
                self.max_tick_ms, self.min_tick_ms
            )));
        }

        Ok(())
    }

    pub fn draw_duration(&self) -> Duration {
        seconds(self.draw_duration_seconds)
    }

    pub fn reveal_dwell(&self) -> Duration {
        seconds(self.reveal_dwell_seconds)
    }

    pub fn settle_delay(&self) -> Duration {
        seconds(self.settle_seconds)
    }

    pub fn min_tick(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    pub fn max_tick(&self) -> Duration {
        Duration::from_millis(self.max_tick_ms)
    }
}

/// Rejects anything `Duration` cannot hold: negatives, NaN, infinities and
/// values past `u64::MAX` seconds.
fn check_seconds(key: &str, value: f64) -> Result<()> {
    Duration::try_from_secs_f64(value).map_err(|e| {
        RaffleError::config(format!(
            "{} must be a non-negative number of seconds, got {} ({})",
            key, value, e
        ))
    })?;
    Ok(())
}

/// Unvalidated values saturate instead of panicking.
fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(if value > 0.0 {
        Duration::MAX
    } else {
        Duration::ZERO
    })
}
