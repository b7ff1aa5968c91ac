//! Running per-version accuracy and performance metrics.

use serde::{Deserialize, Serialize};

use super::FeedbackEntry;
use crate::constants::{
    MAX_SATISFACTION, PERFORMANCE_ACCURACY_WEIGHT, PERFORMANCE_CONFIDENCE_WEIGHT,
    PERFORMANCE_SATISFACTION_WEIGHT,
};

/// Running metrics for one model version, folded one entry at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub feedback_count: u64,
    pub correct_predictions: u64,
    /// Running mean of reported confidence over all entries.
    pub avg_confidence: f64,
    /// Running mean of satisfaction over entries that carried one.
    pub avg_satisfaction: f64,
    /// Number of entries that carried a satisfaction score.
    pub satisfaction_count: u64,
}

/// Serializable view of [`ModelMetrics`] with derived values filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub feedback_count: u64,
    pub correct_predictions: u64,
    pub accuracy: f64,
    pub avg_confidence: f64,
    pub avg_satisfaction: f64,
    pub performance_score: f64,
}

impl ModelMetrics {
    /// Fold one feedback entry into the running aggregates.
    pub fn record(&mut self, entry: &FeedbackEntry) {
        self.feedback_count += 1;
        if entry.is_correct() {
            self.correct_predictions += 1;
        }
        let n = self.feedback_count as f64;
        self.avg_confidence += (entry.confidence - self.avg_confidence) / n;

        if let Some(sat) = entry.satisfaction {
            self.satisfaction_count += 1;
            let m = self.satisfaction_count as f64;
            self.avg_satisfaction += (sat as f64 - self.avg_satisfaction) / m;
        }
    }

    /// correct / feedback_count, or 0 with no feedback.
    pub fn accuracy(&self) -> f64 {
        if self.feedback_count == 0 {
            return 0.0;
        }
        self.correct_predictions as f64 / self.feedback_count as f64
    }

    /// 0.5·accuracy + 0.3·(avg_satisfaction / 5) + 0.2·avg_confidence.
    pub fn performance_score(&self) -> f64 {
        PERFORMANCE_ACCURACY_WEIGHT * self.accuracy()
            + PERFORMANCE_SATISFACTION_WEIGHT * (self.avg_satisfaction / MAX_SATISFACTION as f64)
            + PERFORMANCE_CONFIDENCE_WEIGHT * self.avg_confidence
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            feedback_count: self.feedback_count,
            correct_predictions: self.correct_predictions,
            accuracy: self.accuracy(),
            avg_confidence: self.avg_confidence,
            avg_satisfaction: self.avg_satisfaction,
            performance_score: self.performance_score(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dialect;

    #[test]
    fn performance_score_blends_components() {
        let metrics = ModelMetrics {
            feedback_count: 10,
            correct_predictions: 9,
            avg_confidence: 0.85,
            avg_satisfaction: 4.5,
            satisfaction_count: 10,
        };
        assert!((metrics.accuracy() - 0.9).abs() < 1e-9);
        // 0.45 + 0.27 + 0.17
        assert!((metrics.performance_score() - 0.89).abs() < 0.01);
    }

    #[test]
    fn empty_metrics_score_zero() {
        let metrics = ModelMetrics::default();
        assert_eq!(metrics.accuracy(), 0.0);
        assert_eq!(metrics.performance_score(), 0.0);
    }

    #[test]
    fn running_means_track_entries() {
        let mut metrics = ModelMetrics::default();
        let a = FeedbackEntry::new("s", Dialect::Hindi, 0.6, None, Some(2), "v1".into());
        let b = FeedbackEntry::new(
            "s",
            Dialect::Hindi,
            1.0,
            Some(Dialect::Bengali),
            None,
            "v1".into(),
        );
        metrics.record(&a);
        metrics.record(&b);
        assert_eq!(metrics.feedback_count, 2);
        assert_eq!(metrics.correct_predictions, 1);
        assert!((metrics.avg_confidence - 0.8).abs() < 1e-9);
        assert!((metrics.avg_satisfaction - 2.0).abs() < 1e-9);
        assert_eq!(metrics.satisfaction_count, 1);
    }
}
