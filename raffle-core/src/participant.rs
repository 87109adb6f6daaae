use serde::{Deserialize, Serialize};

/// One raffle entrant. Never mutated after load, only removed from the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(default)]
    pub memory: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
}

impl Participant {
    pub fn new(
        name: impl Into<String>,
        memory: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            memory: memory.into(),
            image_url: image_url.into(),
        }
    }

    /// Roster acceptance rule: a name and an image reference, both non-blank.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.image_url.trim().is_empty()
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
