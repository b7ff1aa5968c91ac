//! Ratcheting clarification threshold.
//!
//! Satisfaction is smoothed with an EWMA. When the smoothed value sits below
//! `low_satisfaction` and at least `adaptation_min_samples` scores arrived
//! since the last raise, the threshold steps up by `threshold_step`, capped at
//! `max_threshold`. It is never lowered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use bhasha_core::config::FeedbackConfig;

#[derive(Debug)]
struct Smoothing {
    ewma: Option<f64>,
    since_raise: u64,
}

#[derive(Debug)]
pub struct AdaptiveThreshold {
    /// f64 bits, readable without the smoothing lock.
    value: AtomicU64,
    state: Mutex<Smoothing>,
    config: FeedbackConfig,
}

impl AdaptiveThreshold {
    pub fn new(initial: f64, config: FeedbackConfig) -> Self {
        let initial = initial.clamp(0.0, 1.0);
        Self {
            value: AtomicU64::new(initial.to_bits()),
            state: Mutex::new(Smoothing {
                ewma: None,
                since_raise: 0,
            }),
            config,
        }
    }

    pub fn current(&self) -> f64 {
        f64::from_bits(self.value.load(Ordering::Acquire))
    }

    /// Smoothed satisfaction so far, if any score was observed.
    pub fn smoothed_satisfaction(&self) -> Option<f64> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).ewma
    }

    /// Feed one satisfaction score (1–5). Returns the new threshold when this
    /// sample caused a raise.
    pub fn observe(&self, satisfaction: u8) -> Option<f64> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let sample = f64::from(satisfaction);
        let alpha = self.config.satisfaction_smoothing;
        let ewma = match state.ewma {
            Some(prev) => alpha * sample + (1.0 - alpha) * prev,
            None => sample,
        };
        state.ewma = Some(ewma);
        state.since_raise += 1;

        if ewma >= self.config.low_satisfaction
            || state.since_raise < self.config.adaptation_min_samples
        {
            return None;
        }

        let current = self.current();
        if current >= self.config.max_threshold {
            return None;
        }
        let raised = (current + self.config.threshold_step).min(self.config.max_threshold);
        self.value.store(raised.to_bits(), Ordering::Release);
        state.since_raise = 0;
        tracing::info!(
            event = "clarification_threshold_raised",
            from = current,
            to = raised,
            smoothed_satisfaction = ewma,
            "clarification threshold raised"
        );
        Some(raised)
    }
}
