use std::fmt;

use crate::emotion::Emotion;
use crate::features::{Feature, FeatureRecord};

use Cmp::{Ge, Gt, Lt};
use Feature::{Acousticness, Danceability, Energy, Valence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Gt,
    Lt,
    Ge,
}

/// A single threshold test on one feature axis.
#[derive(Debug, Clone, Copy)]
pub struct Condition {
    pub feature: Feature,
    pub cmp: Cmp,
    pub threshold: f64,
}

impl Condition {
    const fn new(feature: Feature, cmp: Cmp, threshold: f64) -> Self {
        Self {
            feature,
            cmp,
            threshold,
        }
    }

    pub fn holds(&self, features: &FeatureRecord) -> bool {
        let value = features.get(self.feature);
        match self.cmp {
            Cmp::Gt => value > self.threshold,
            Cmp::Lt => value < self.threshold,
            Cmp::Ge => value >= self.threshold,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.cmp {
            Cmp::Gt => ">",
            Cmp::Lt => "<",
            Cmp::Ge => ">=",
        };
        write!(f, "{} {} {}", self.feature, op, self.threshold)
    }
}

/// A conjunction of conditions that, when all hold, assigns `emotion`.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub conditions: &'static [Condition],
    pub emotion: Emotion,
}

impl Rule {
    pub fn matches(&self, features: &FeatureRecord) -> bool {
        self.conditions.iter().all(|c| c.holds(features))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "{}: otherwise -> {}", self.name, self.emotion);
        }
        let parts: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        write!(f, "{}: {} -> {}", self.name, parts.join(" and "), self.emotion)
    }
}

/// Decision rules in priority order; the first match wins.
///
/// Regions overlap (a bright, danceable, high-valence track satisfies both the
/// happy and energetic rules), so the order is the whole definition. The last
/// rule has no conditions and always matches.
pub const RULES: &[Rule] = &[
    // Tier 1: positive and active
    Rule {
        name: "happy",
        conditions: &[Condition::new(Valence, Gt, 0.6), Condition::new(Energy, Gt, 0.5)],
        emotion: Emotion::Happy,
    },
    // Tier 2: negative and low energy
    Rule {
        name: "sad",
        conditions: &[Condition::new(Valence, Lt, 0.4), Condition::new(Energy, Lt, 0.5)],
        emotion: Emotion::Sad,
    },
    // Tier 3: driving and danceable
    Rule {
        name: "energetic",
        conditions: &[Condition::new(Energy, Gt, 0.7), Condition::new(Danceability, Gt, 0.6)],
        emotion: Emotion::Energetic,
    },
    // Tier 4: quiet and acoustic
    Rule {
        name: "calm",
        conditions: &[Condition::new(Energy, Lt, 0.5), Condition::new(Acousticness, Gt, 0.5)],
        emotion: Emotion::Calm,
    },
    // Tier 5-6: binary valence split
    Rule {
        name: "fallback-happy",
        conditions: &[Condition::new(Valence, Ge, 0.5)],
        emotion: Emotion::Happy,
    },
    Rule {
        name: "fallback-sad",
        conditions: &[],
        emotion: Emotion::Sad,
    },
];

/// Return the first rule in `rules` that matches, if any.
pub fn first_match<'a>(rules: &'a [Rule], features: &FeatureRecord) -> Option<&'a Rule> {
    rules.iter().find(|r| r.matches(features))
}
