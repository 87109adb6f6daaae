//! Participant lists from disk. JSON arrays or CSV with a header row
//! (`name,memory,imageURL`); entries without a name or image are skipped.

use raffle_core::Participant;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Failed to read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported roster format '{0}', expected .json or .csv")]
    UnsupportedFormat(String),

    #[error("JSON roster must contain an array of participants")]
    NotAnArray,

    #[error("Invalid JSON roster: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV roster: {0}")]
    Csv(#[from] csv::Error),

    #[error("No valid participants found in roster")]
    NoParticipants,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterFormat {
    Json,
    Csv,
}

impl RosterFormat {
    pub fn from_path(path: &Path) -> Result<Self, RosterError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(RosterError::UnsupportedFormat(extension)),
        }
    }
}

pub async fn load_roster(path: &Path) -> Result<Vec<Participant>, RosterError> {
    let format = RosterFormat::from_path(path)?;
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RosterError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let participants = parse_roster(&text, format)?;
    tracing::info!(
        "Loaded {} participants from {}",
        participants.len(),
        path.display()
    );
    Ok(participants)
}

pub fn parse_roster(text: &str, format: RosterFormat) -> Result<Vec<Participant>, RosterError> {
    let participants = match format {
        RosterFormat::Json => parse_json(text)?,
        RosterFormat::Csv => parse_csv(text)?,
    };

    if participants.is_empty() {
        return Err(RosterError::NoParticipants);
    }
    Ok(participants)
}

fn parse_json(text: &str) -> Result<Vec<Participant>, RosterError> {
    let serde_json::Value::Array(entries) = serde_json::from_str(text)? else {
        return Err(RosterError::NotAnArray);
    };

    let total = entries.len();
    let participants: Vec<Participant> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<Participant>(entry).ok())
        .filter(Participant::is_valid)
        .collect();

    log_skipped(total, participants.len());
    Ok(participants)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: Option<String>,
    memory: Option<String>,
    #[serde(rename = "imageURL")]
    image_url: Option<String>,
}

fn parse_csv(text: &str) -> Result<Vec<Participant>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut total = 0;
    let mut participants = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        total += 1;
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                tracing::debug!("Skipping unreadable CSV row: {}", e);
                continue;
            }
        };

        let participant = Participant::new(
            row.name.unwrap_or_default(),
            row.memory.unwrap_or_default(),
            row.image_url.unwrap_or_default(),
        );
        if participant.is_valid() {
            participants.push(participant);
        }
    }

    log_skipped(total, participants.len());
    Ok(participants)
}

fn log_skipped(total: usize, kept: usize) {
    if kept < total {
        tracing::warn!("Skipped {} invalid roster entries", total - kept);
    }
}
