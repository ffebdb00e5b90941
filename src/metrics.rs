//! Multi-class evaluation metrics over the four emotions.
//!
//! Everything here derives from a [`ConfusionMatrix`]; the matrix only counts
//! pairs, so the order predictions arrive in never changes a result.

use serde::Serialize;

use crate::emotion::Emotion;

const N: usize = Emotion::ALL.len();

/// One (actual, predicted) observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PredictionPair {
    pub actual: Emotion,
    pub predicted: Emotion,
}

impl PredictionPair {
    pub fn is_correct(&self) -> bool {
        self.actual == self.predicted
    }
}

/// 4×4 count table. Rows are actual emotions, columns predicted, both in
/// [`Emotion::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; N]; N],
}

impl ConfusionMatrix {
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = &'a PredictionPair>,
    {
        let mut cm = Self::default();
        for pair in pairs {
            cm.record(pair.actual, pair.predicted);
        }
        cm
    }

    pub fn record(&mut self, actual: Emotion, predicted: Emotion) {
        self.counts[actual.index()][predicted.index()] += 1;
    }

    pub fn get(&self, actual: Emotion, predicted: Emotion) -> usize {
        self.counts[actual.index()][predicted.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Sum of the diagonal.
    pub fn correct(&self) -> usize {
        (0..N).map(|i| self.counts[i][i]).sum()
    }

    pub fn true_positives(&self, e: Emotion) -> usize {
        self.get(e, e)
    }

    /// Predicted as `e` but actually something else (column minus diagonal).
    pub fn false_positives(&self, e: Emotion) -> usize {
        let col = e.index();
        (0..N).filter(|&row| row != col).map(|row| self.counts[row][col]).sum()
    }

    /// Actually `e` but predicted as something else (row minus diagonal).
    pub fn false_negatives(&self, e: Emotion) -> usize {
        let row = e.index();
        (0..N).filter(|&col| col != row).map(|col| self.counts[row][col]).sum()
    }

    /// Number of examples whose actual emotion is `e`.
    pub fn support(&self, e: Emotion) -> usize {
        self.counts[e.index()].iter().sum()
    }

    /// Correct / total; NaN when the matrix is empty.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return f64::NAN;
        }
        self.correct() as f64 / total as f64
    }

    pub fn class_metrics(&self, e: Emotion) -> ClassMetrics {
        let tp = self.true_positives(e);
        let precision = ratio(tp, tp + self.false_positives(e));
        let recall = ratio(tp, tp + self.false_negatives(e));
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        ClassMetrics {
            emotion: e,
            precision,
            recall,
            f1,
            support: self.support(e),
        }
    }
}

fn ratio(num: usize, denom: usize) -> f64 {
    if denom == 0 {
        0.0
    } else {
        num as f64 / denom as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub emotion: Emotion,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Dataset-level summary numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateMetrics {
    /// NaN for an empty dataset.
    pub accuracy: f64,
    /// Unweighted mean of the four per-class F1 values, zero-support classes included.
    pub macro_f1: f64,
    /// Support-weighted mean of per-class F1; NaN when total support is 0.
    pub weighted_f1: f64,
    pub correct: usize,
    pub total: usize,
}

impl AggregateMetrics {
    pub fn from_classes(cm: &ConfusionMatrix, classes: &[ClassMetrics]) -> Self {
        let macro_f1 = if classes.is_empty() {
            0.0
        } else {
            classes.iter().map(|c| c.f1).sum::<f64>() / classes.len() as f64
        };

        let support: usize = classes.iter().map(|c| c.support).sum();
        let weighted_f1 = if support == 0 {
            f64::NAN
        } else {
            classes.iter().map(|c| c.f1 * c.support as f64).sum::<f64>() / support as f64
        };

        Self {
            accuracy: cm.accuracy(),
            macro_f1,
            weighted_f1,
            correct: cm.correct(),
            total: cm.total(),
        }
    }
}
