use std::fmt;

use serde::{Deserialize, Serialize};

use crate::emotion::Emotion;

/// Normalized audio descriptors for one track, nominally each in [0, 1].
///
/// Values come from an upstream feature extractor and are never range-checked
/// here. A field missing from the input document reads as 0.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureRecord {
    pub valence: f64,
    pub energy: f64,
    pub danceability: f64,
    pub acousticness: f64,
}

/// One axis of a [`FeatureRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Valence,
    Energy,
    Danceability,
    Acousticness,
}

impl Feature {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Valence => "valence",
            Self::Energy => "energy",
            Self::Danceability => "danceability",
            Self::Acousticness => "acousticness",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FeatureRecord {
    pub fn new(valence: f64, energy: f64, danceability: f64, acousticness: f64) -> Self {
        Self {
            valence,
            energy,
            danceability,
            acousticness,
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Valence => self.valence,
            Feature::Energy => self.energy,
            Feature::Danceability => self.danceability,
            Feature::Acousticness => self.acousticness,
        }
    }
}

/// A feature record with its ground-truth emotion, used by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    #[serde(flatten)]
    pub features: FeatureRecord,
    pub true_emotion: Emotion,
}

/// A candidate track for recommendation ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    #[serde(flatten)]
    pub features: FeatureRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_zero() {
        let f: FeatureRecord = serde_json::from_str(r#"{"valence": 0.7}"#).unwrap();
        assert_eq!(f, FeatureRecord::new(0.7, 0.0, 0.0, 0.0));

        let empty: FeatureRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, FeatureRecord::default());
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = serde_json::from_str::<FeatureRecord>(r#"{"energy": "loud"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn integer_values_are_accepted() {
        let f: FeatureRecord = serde_json::from_str(r#"{"energy": 1, "acousticness": 0}"#).unwrap();
        assert_eq!(f.energy, 1.0);
        assert_eq!(f.acousticness, 0.0);
    }

    #[test]
    fn get_reads_each_axis() {
        let f = FeatureRecord::new(0.1, 0.2, 0.3, 0.4);
        assert_eq!(f.get(Feature::Valence), 0.1);
        assert_eq!(f.get(Feature::Energy), 0.2);
        assert_eq!(f.get(Feature::Danceability), 0.3);
        assert_eq!(f.get(Feature::Acousticness), 0.4);
    }

    #[test]
    fn labeled_example_flattens_features() {
        let ex: LabeledExample = serde_json::from_str(
            r#"{"valence": 0.2, "energy": 0.3, "true_emotion": "sad"}"#,
        )
        .unwrap();
        assert_eq!(ex.true_emotion, Emotion::Sad);
        assert_eq!(ex.features, FeatureRecord::new(0.2, 0.3, 0.0, 0.0));
    }

    #[test]
    fn labeled_example_requires_a_label() {
        let result = serde_json::from_str::<LabeledExample>(r#"{"valence": 0.2}"#);
        assert!(result.is_err());
    }
}
