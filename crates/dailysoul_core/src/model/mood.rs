//! Mood tags attached to journal entries.

use serde::{Deserialize, Serialize};

/// One of the five moods offered on the mood picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Joy,
    Calm,
    Neutral,
    Low,
    Heavy,
}

impl Mood {
    /// All moods in picker order.
    pub const ALL: [Mood; 5] = [Mood::Joy, Mood::Calm, Mood::Neutral, Mood::Low, Mood::Heavy];

    /// Stable storage key written to `journal_entries.mood`.
    pub fn key(self) -> &'static str {
        match self {
            Mood::Joy => "joy",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Low => "low",
            Mood::Heavy => "heavy",
        }
    }

    /// Human label used by export and UI.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Joy => "Joy",
            Mood::Calm => "Calm",
            Mood::Neutral => "Neutral",
            Mood::Low => "Low",
            Mood::Heavy => "Heavy",
        }
    }

    /// Material icon name shown next to the label on the picker.
    pub fn icon(self) -> &'static str {
        match self {
            Mood::Joy => "sunny",
            Mood::Calm => "air",
            Mood::Neutral => "radio_button_unchecked",
            Mood::Low => "water_drop",
            Mood::Heavy => "filter_drama",
        }
    }

    /// Parses a storage key. Returns `None` for unknown keys.
    pub fn from_key(key: &str) -> Option<Mood> {
        Mood::ALL.into_iter().find(|mood| mood.key() == key)
    }
}
