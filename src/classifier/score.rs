use crate::emotion::Emotion;
use crate::features::{Feature, FeatureRecord};

use Feature::{Acousticness, Danceability, Energy, Valence};

/// Score returned for a target label that isn't one of the four emotions.
pub const UNKNOWN_TARGET_SCORE: f64 = 50.0;

/// One weighted term of a match score. Inverted terms use `1 - value`.
#[derive(Debug, Clone, Copy)]
pub struct Term {
    pub feature: Feature,
    pub inverted: bool,
    pub weight: f64,
}

const fn term(feature: Feature, weight: f64) -> Term {
    Term {
        feature,
        inverted: false,
        weight,
    }
}

const fn inv(feature: Feature, weight: f64) -> Term {
    Term {
        feature,
        inverted: true,
        weight,
    }
}

// Each row sums to 1.0, so in-range features give a raw score in [0, 100].
const HAPPY: [Term; 4] = [
    term(Valence, 0.4),
    term(Energy, 0.3),
    term(Danceability, 0.2),
    inv(Acousticness, 0.1),
];
const SAD: [Term; 4] = [
    inv(Valence, 0.4),
    inv(Energy, 0.3),
    term(Acousticness, 0.2),
    inv(Danceability, 0.1),
];
const ENERGETIC: [Term; 4] = [
    term(Energy, 0.4),
    term(Danceability, 0.3),
    term(Valence, 0.2),
    inv(Acousticness, 0.1),
];
const CALM: [Term; 4] = [
    inv(Energy, 0.4),
    term(Acousticness, 0.3),
    inv(Danceability, 0.2),
    term(Valence, 0.1),
];

/// The weighted terms that make up the match score for `target`.
pub fn weights(target: Emotion) -> &'static [Term; 4] {
    match target {
        Emotion::Happy => &HAPPY,
        Emotion::Sad => &SAD,
        Emotion::Energetic => &ENERGETIC,
        Emotion::Calm => &CALM,
    }
}

/// How well `features` match `target`, 0-100.
///
/// Out-of-range features can push the raw sum outside [0, 100]; the result is
/// clamped, and a NaN sum reads as 0.
pub fn score(features: &FeatureRecord, target: Emotion) -> f64 {
    let raw: f64 = weights(target)
        .iter()
        .map(|t| {
            let v = features.get(t.feature);
            let v = if t.inverted { 1.0 - v } else { v };
            v * t.weight
        })
        .sum();

    let scaled = raw * 100.0;
    if scaled.is_nan() {
        0.0
    } else {
        scaled.clamp(0.0, 100.0)
    }
}

/// Like [`score`], but takes the target as a label string.
/// An unrecognized label scores [`UNKNOWN_TARGET_SCORE`] rather than failing.
pub fn score_label(features: &FeatureRecord, target: &str) -> f64 {
    match target.parse::<Emotion>() {
        Ok(emotion) => score(features, emotion),
        Err(e) => {
            log::debug!("{}; scoring {}", e, UNKNOWN_TARGET_SCORE);
            UNKNOWN_TARGET_SCORE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn weights_sum_to_one() {
        for e in Emotion::ALL {
            let total: f64 = weights(e).iter().map(|t| t.weight).sum();
            assert!((total - 1.0).abs() < EPS, "{} weights sum to {}", e, total);
        }
    }

    #[test]
    fn happy_formula() {
        let f = FeatureRecord::new(0.8, 0.7, 0.6, 0.2);
        let expected = (0.4 * 0.8 + 0.3 * 0.7 + 0.2 * 0.6 + 0.1 * 0.8) * 100.0;
        assert!((score(&f, Emotion::Happy) - expected).abs() < EPS);
    }

    #[test]
    fn sad_formula() {
        let f = FeatureRecord::new(0.2, 0.3, 0.25, 0.7);
        let expected = (0.4 * 0.8 + 0.3 * 0.7 + 0.2 * 0.7 + 0.1 * 0.75) * 100.0;
        assert!((score(&f, Emotion::Sad) - expected).abs() < EPS);
    }

    #[test]
    fn energetic_formula() {
        let f = FeatureRecord::new(0.65, 0.9, 0.85, 0.1);
        let expected = (0.4 * 0.9 + 0.3 * 0.85 + 0.2 * 0.65 + 0.1 * 0.9) * 100.0;
        assert!((score(&f, Emotion::Energetic) - expected).abs() < EPS);
    }

    #[test]
    fn calm_formula() {
        let f = FeatureRecord::new(0.5, 0.2, 0.35, 0.8);
        let expected = (0.4 * 0.8 + 0.3 * 0.8 + 0.2 * 0.65 + 0.1 * 0.5) * 100.0;
        assert!((score(&f, Emotion::Calm) - expected).abs() < EPS);
    }

    #[test]
    fn extremes_hit_the_bounds() {
        let ones = FeatureRecord::new(1.0, 1.0, 1.0, 0.0);
        assert!((score(&ones, Emotion::Happy) - 100.0).abs() < EPS);
        assert!((score(&ones, Emotion::Energetic) - 100.0).abs() < EPS);
        assert!(score(&ones, Emotion::Sad).abs() < EPS);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let wild = [
            FeatureRecord::new(5.0, 5.0, 5.0, -5.0),
            FeatureRecord::new(-5.0, -5.0, -5.0, 5.0),
            FeatureRecord::new(1e300, -1e300, 0.0, 0.0),
            FeatureRecord::new(f64::INFINITY, 0.0, 0.0, 0.0),
        ];
        for f in &wild {
            for e in Emotion::ALL {
                let s = score(f, e);
                assert!((0.0..=100.0).contains(&s), "{:?} / {} gave {}", f, e, s);
            }
        }
        assert_eq!(score(&wild[0], Emotion::Happy), 100.0);
        assert_eq!(score(&wild[0], Emotion::Sad), 0.0);
    }

    #[test]
    fn nan_inputs_score_zero() {
        let f = FeatureRecord::new(f64::NAN, 0.5, 0.5, 0.5);
        for e in Emotion::ALL {
            assert_eq!(score(&f, e), 0.0);
        }
    }

    #[test]
    fn unknown_label_scores_fifty() {
        let samples = [
            FeatureRecord::default(),
            FeatureRecord::new(1.0, 1.0, 1.0, 1.0),
            FeatureRecord::new(9.0, -3.0, 0.5, 0.5),
        ];
        for f in &samples {
            assert_eq!(score_label(f, "bogus"), UNKNOWN_TARGET_SCORE);
            assert_eq!(score_label(f, ""), UNKNOWN_TARGET_SCORE);
            assert_eq!(score_label(f, "HAPPY"), UNKNOWN_TARGET_SCORE);
        }
    }

    #[test]
    fn known_label_matches_typed_score() {
        let f = FeatureRecord::new(0.3, 0.6, 0.9, 0.4);
        for e in Emotion::ALL {
            assert_eq!(score_label(&f, e.as_str()), score(&f, e));
        }
    }

    #[test]
    fn score_is_repeatable() {
        let f = FeatureRecord::new(0.37, 0.81, 0.44, 0.12);
        for e in Emotion::ALL {
            assert_eq!(score(&f, e).to_bits(), score(&f, e).to_bits());
        }
    }
}
