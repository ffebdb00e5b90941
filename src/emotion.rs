use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four music emotions a track can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Energetic,
    Calm,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown emotion \"{0}\" (expected happy, sad, energetic or calm)")]
pub struct UnknownEmotion(pub String);

/// Mood words (as reported by a user or a face detector) and the music emotion
/// each one maps to. Lookup is case-insensitive; anything missing maps to calm.
pub const MOOD_ALIASES: &[(&str, Emotion)] = &[
    ("happy", Emotion::Happy),
    ("joy", Emotion::Happy),
    ("excited", Emotion::Energetic),
    ("angry", Emotion::Energetic),
    ("sad", Emotion::Sad),
    ("fear", Emotion::Sad),
    ("neutral", Emotion::Calm),
    ("calm", Emotion::Calm),
    ("relaxed", Emotion::Calm),
];

impl Emotion {
    /// Display order. Confusion-matrix rows/columns and every printed header use it.
    pub const ALL: [Emotion; 4] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Energetic,
        Emotion::Calm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Energetic => "energetic",
            Self::Calm => "calm",
        }
    }

    /// Position in [`Emotion::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Self::Happy => 0,
            Self::Sad => 1,
            Self::Energetic => 2,
            Self::Calm => 3,
        }
    }

    /// Map a free-form mood word onto a music emotion.
    pub fn from_mood(word: &str) -> Emotion {
        let lower = word.trim().to_lowercase();
        match MOOD_ALIASES.iter().find(|(alias, _)| *alias == lower) {
            Some(&(_, emotion)) => emotion,
            None => {
                log::debug!("No mood alias for \"{}\", using calm", word);
                Emotion::Calm
            }
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width/alignment flags work in table output
        f.pad(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    /// Exact lowercase labels only; `"Happy"` is rejected like any other unknown label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEmotion(s.to_string()))
    }
}
