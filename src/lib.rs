pub mod classifier;
pub mod config;
pub mod dataset;
pub mod emotion;
pub mod evaluate;
pub mod features;
pub mod metrics;
pub mod recommend;

pub use classifier::{classify, score, score_label};
pub use emotion::Emotion;
pub use features::{FeatureRecord, LabeledExample};

/// Application name for XDG paths
pub const APP_NAME: &str = "moodtag";
