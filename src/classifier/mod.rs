pub mod rules;
pub mod score;

use crate::emotion::Emotion;
use crate::features::FeatureRecord;

pub use rules::{Rule, RULES};
pub use score::{score, score_label, UNKNOWN_TARGET_SCORE};

/// Anything that can tag a feature record with an emotion.
///
/// `Sync` so the evaluator can classify examples on a rayon pool.
pub trait Classifier: Sync {
    fn classify(&self, features: &FeatureRecord) -> Emotion;
}

impl<F> Classifier for F
where
    F: Fn(&FeatureRecord) -> Emotion + Sync,
{
    fn classify(&self, features: &FeatureRecord) -> Emotion {
        self(features)
    }
}

/// The fixed-threshold rule classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleClassifier;

impl Classifier for RuleClassifier {
    fn classify(&self, features: &FeatureRecord) -> Emotion {
        classify(features)
    }
}

/// Tag a track with an emotion using the first matching rule in [`RULES`].
pub fn classify(features: &FeatureRecord) -> Emotion {
    classify_explained(features).emotion
}

/// Like [`classify`], but also returns the rule that decided it.
pub fn classify_explained(features: &FeatureRecord) -> &'static Rule {
    // RULES ends in an unconditional rule, so this only falls through if the
    // table itself is edited badly.
    let rule = rules::first_match(RULES, features).unwrap_or(&RULES[RULES.len() - 1]);
    log::trace!("{:?} matched rule {}", features, rule.name);
    rule
}
