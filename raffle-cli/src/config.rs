use raffle_core::RaffleConfig;
use std::path::{Path, PathBuf};

/// Overrides taken from the command line, applied on top of the file config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed: Option<u64>,
    pub draw_seconds: Option<f64>,
    pub dwell_seconds: Option<f64>,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("raffle")
        .join("config.json")
}

/// Explicit file if given, else the default location if it exists, else the
/// built-in defaults.
pub async fn load_config(
    explicit: Option<&Path>,
    overrides: &ConfigOverrides,
) -> anyhow::Result<RaffleConfig> {
    let mut config = match explicit {
        Some(path) => RaffleConfig::load(path).await?,
        None => {
            let path = default_config_path();
            if path.exists() {
                tracing::debug!("Using config at {}", path.display());
                RaffleConfig::load(&path).await?
            } else {
                RaffleConfig::default()
            }
        }
    };

    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(seconds) = overrides.draw_seconds {
        config.draw_duration_seconds = seconds;
    }
    if let Some(seconds) = overrides.dwell_seconds {
        config.reveal_dwell_seconds = seconds;
    }

    config.validate()?;
    Ok(config)
}
