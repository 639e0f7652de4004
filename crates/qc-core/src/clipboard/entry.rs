use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::EntryId;

use super::normalize::{normalize, NormalizedText};

/// One captured clipboard text plus its capture time.
///
/// Serialized as `{"id": .., "text": .., "ts": ..}`. Files written before
/// entries carried ids still load: a fresh id is assigned. Older files also
/// padded `ts` with a leading space, which is trimmed on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    #[serde(default)]
    pub id: EntryId,
    pub text: String,
    #[serde(rename = "ts", default, deserialize_with = "trimmed")]
    pub timestamp: String,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

impl ClipboardEntry {
    pub fn new(text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(),
            text: text.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn normalized(&self) -> NormalizedText {
        normalize(&self.text)
    }
}
