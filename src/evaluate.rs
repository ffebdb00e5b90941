//! Offline evaluation: run a classifier over a labeled dataset and score it.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::classifier::Classifier;
use crate::emotion::Emotion;
use crate::features::LabeledExample;
use crate::metrics::{AggregateMetrics, ClassMetrics, ConfusionMatrix, PredictionPair};

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// One pair per example, in dataset order.
    pub predictions: Vec<PredictionPair>,
    pub confusion: ConfusionMatrix,
    /// One entry per emotion, in [`Emotion::ALL`] order.
    pub classes: Vec<ClassMetrics>,
    pub summary: AggregateMetrics,
}

impl EvaluationReport {
    /// Derive every metric from the collected predictions.
    pub fn from_predictions(predictions: Vec<PredictionPair>) -> Self {
        let confusion = ConfusionMatrix::from_pairs(&predictions);
        let classes: Vec<ClassMetrics> = Emotion::ALL
            .iter()
            .map(|&e| confusion.class_metrics(e))
            .collect();
        let summary = AggregateMetrics::from_classes(&confusion, &classes);

        if summary.total == 0 {
            log::warn!("Evaluated an empty dataset; accuracy is undefined");
        } else {
            log::info!(
                "Evaluated {} examples: accuracy {:.4}, macro F1 {:.4}, weighted F1 {:.4}",
                summary.total,
                summary.accuracy,
                summary.macro_f1,
                summary.weighted_f1
            );
        }

        Self {
            predictions,
            confusion,
            classes,
            summary,
        }
    }
}

/// Classify every example in order and build the report.
pub fn run<C: Classifier + ?Sized>(dataset: &[LabeledExample], classifier: &C) -> EvaluationReport {
    let predictions = dataset
        .iter()
        .map(|ex| predict(ex, classifier))
        .collect();
    EvaluationReport::from_predictions(predictions)
}

/// Same result as [`run`], with classification spread over `workers` threads.
///
/// Falls back to [`run`] if the thread pool can't be built.
pub fn run_parallel<C: Classifier + ?Sized>(
    dataset: &[LabeledExample],
    classifier: &C,
    workers: usize,
) -> EvaluationReport {
    if workers <= 1 {
        return run(dataset, classifier);
    }

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("Failed to build {}-thread pool ({}), evaluating sequentially", workers, e);
            return run(dataset, classifier);
        }
    };

    // Indexed collect keeps dataset order
    let predictions: Vec<PredictionPair> = pool.install(|| {
        dataset
            .par_iter()
            .map(|ex| predict(ex, classifier))
            .collect()
    });
    EvaluationReport::from_predictions(predictions)
}

fn predict<C: Classifier + ?Sized>(ex: &LabeledExample, classifier: &C) -> PredictionPair {
    PredictionPair {
        actual: ex.true_emotion,
        predicted: classifier.classify(&ex.features),
    }
}

/// Render a ratio as `0.8100 (81.00%)`, or `n/a` when undefined.
fn fmt_ratio(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.4} ({:.2}%)", value, value * 100.0)
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predictions")?;
        writeln!(f, "{}", "-".repeat(50))?;
        for (i, p) in self.predictions.iter().enumerate() {
            let marker = if p.is_correct() { "✓" } else { "✗" };
            writeln!(
                f,
                "{:>3}. True: {:<10} | Pred: {:<10} {}",
                i + 1,
                p.actual,
                p.predicted,
                marker
            )?;
        }
        writeln!(f)?;

        let s = &self.summary;
        writeln!(f, "Summary")?;
        writeln!(f, "{}", "-".repeat(50))?;
        writeln!(f, "Macro F1:      {}", fmt_ratio(s.macro_f1))?;
        writeln!(f, "Weighted F1:   {}", fmt_ratio(s.weighted_f1))?;
        writeln!(f, "Accuracy:      {}", fmt_ratio(s.accuracy))?;
        writeln!(f, "Correct/total: {}/{}", s.correct, s.total)?;
        writeln!(f)?;

        writeln!(f, "Per-class report")?;
        writeln!(
            f,
            "{:<10} {:>9} {:>9} {:>9} {:>8}",
            "", "precision", "recall", "f1", "support"
        )?;
        writeln!(f, "{}", "-".repeat(50))?;
        for c in &self.classes {
            writeln!(
                f,
                "{:<10} {:>9.4} {:>9.4} {:>9.4} {:>8}",
                c.emotion, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Confusion matrix (rows = actual, columns = predicted)")?;
        write!(f, "{:<10}", "")?;
        for e in Emotion::ALL {
            write!(f, " {:>9}", e)?;
        }
        writeln!(f)?;
        for actual in Emotion::ALL {
            write!(f, "{:<10}", actual)?;
            for predicted in Emotion::ALL {
                write!(f, " {:>9}", self.confusion.get(actual, predicted))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
