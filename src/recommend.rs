use serde::Serialize;

use crate::classifier::{classify, score};
use crate::emotion::Emotion;
use crate::features::Track;

/// Default number of tracks to return.
pub const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct RankOptions {
    pub limit: usize,
    /// Tracks scoring below this are dropped before ranking.
    pub min_score: f64,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            min_score: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTrack {
    pub name: String,
    pub score: f64,
    /// What the rule classifier would tag this track as, independent of the target.
    pub emotion: Emotion,
}

/// Rank candidate tracks by how well they match `target`, best first.
///
/// Ties keep their input order.
pub fn rank(tracks: &[Track], target: Emotion, opts: &RankOptions) -> Vec<RankedTrack> {
    let mut ranked: Vec<RankedTrack> = tracks
        .iter()
        .map(|t| RankedTrack {
            name: t.name.clone(),
            score: score(&t.features, target),
            emotion: classify(&t.features),
        })
        .filter(|r| r.score >= opts.min_score)
        .collect();

    let dropped = tracks.len() - ranked.len();
    if dropped > 0 {
        log::debug!("Dropped {} tracks under min score {:.1}", dropped, opts.min_score);
    }

    // Stable sort, descending
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(opts.limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureRecord;

    fn track(name: &str, v: f64, e: f64, d: f64, a: f64) -> Track {
        Track {
            name: name.to_string(),
            features: FeatureRecord::new(v, e, d, a),
        }
    }

    fn library() -> Vec<Track> {
        vec![
            track("Ballad", 0.15, 0.2, 0.25, 0.8),
            track("Anthem", 0.9, 0.85, 0.8, 0.1),
            track("Lullaby", 0.5, 0.15, 0.3, 0.9),
            track("Banger", 0.6, 0.95, 0.9, 0.05),
        ]
    }

    #[test]
    fn best_match_first() {
        let ranked = rank(&library(), Emotion::Happy, &RankOptions::default());
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].name, "Anthem");
        assert_eq!(ranked[0].emotion, Emotion::Happy);
        for w in ranked.windows(2) {
            assert!(w[0].score >= w[1].score);
        }
    }

    #[test]
    fn target_changes_order() {
        let calm = rank(&library(), Emotion::Calm, &RankOptions::default());
        assert_eq!(calm[0].name, "Lullaby");
        let sad = rank(&library(), Emotion::Sad, &RankOptions::default());
        assert_eq!(sad[0].name, "Ballad");
        let energetic = rank(&library(), Emotion::Energetic, &RankOptions::default());
        assert_eq!(energetic[0].name, "Banger");
    }

    #[test]
    fn limit_truncates() {
        let opts = RankOptions { limit: 2, min_score: 0.0 };
        let ranked = rank(&library(), Emotion::Happy, &opts);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn min_score_filters() {
        let opts = RankOptions { limit: 10, min_score: 60.0 };
        let ranked = rank(&library(), Emotion::Happy, &opts);
        assert!(ranked.iter().all(|r| r.score >= 60.0));
        assert!(ranked.iter().all(|r| r.name != "Ballad"));
    }

    #[test]
    fn ties_keep_input_order() {
        let tracks = vec![
            track("first", 0.5, 0.5, 0.5, 0.5),
            track("second", 0.5, 0.5, 0.5, 0.5),
            track("third", 0.5, 0.5, 0.5, 0.5),
        ];
        let ranked = rank(&tracks, Emotion::Calm, &RankOptions::default());
        let names: Vec<&str> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn empty_input() {
        assert!(rank(&[], Emotion::Sad, &RankOptions::default()).is_empty());
    }
}
