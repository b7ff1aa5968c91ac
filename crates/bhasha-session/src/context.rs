//! SessionContext: bounded segment history per conversation.

use std::collections::{BTreeMap, VecDeque};

use bhasha_core::models::{Dialect, DialectScores, Language};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mixing;

/// One segment as remembered by the context window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
    pub segment_index: u32,
    pub dialect: Dialect,
    pub language: Language,
    pub confidence: f64,
    pub scores: DialectScores,
}

impl SegmentSnapshot {
    pub fn new(segment_index: u32, dialect: Dialect, confidence: f64, scores: DialectScores) -> Self {
        Self {
            segment_index,
            dialect,
            language: dialect.language(),
            confidence,
            scores,
        }
    }
}

/// Per-conversation mixing state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: String,
    /// Last W segments, oldest first.
    pub history: VecDeque<SegmentSnapshot>,
    /// Segment indices where the language changed, oldest first.
    pub switch_points: Vec<u32>,
    /// Total language switches observed since the last reset.
    pub switch_count: u64,
    /// Segments folded in since the last reset.
    pub segments_seen: u64,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    window_size: usize,
}

impl SessionContext {
    pub fn new(session_id: String, window_size: usize) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            history: VecDeque::with_capacity(window_size),
            switch_points: Vec::new(),
            switch_count: 0,
            segments_seen: 0,
            created_at: now,
            last_activity: now,
            window_size: window_size.max(1),
        }
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Append a snapshot, evicting the oldest past capacity.
    pub fn push(&mut self, snapshot: SegmentSnapshot) {
        self.history.push_back(snapshot);
        while self.history.len() > self.window_size {
            self.history.pop_front();
        }
        self.segments_seen += 1;
        self.last_activity = Utc::now();
    }

    /// Record a switch at `segment_index`, keeping at most `cap` points.
    pub fn record_switch(&mut self, segment_index: u32, cap: usize) {
        self.switch_points.push(segment_index);
        if self.switch_points.len() > cap {
            let excess = self.switch_points.len() - cap;
            self.switch_points.drain(..excess);
        }
        self.switch_count += 1;
    }

    /// The most recent snapshot.
    pub fn last(&self) -> Option<&SegmentSnapshot> {
        self.history.back()
    }

    /// Mode of the languages in the window.
    pub fn dominant_language(&self) -> Option<Language> {
        mixing::dominant_language(&self.history)
    }

    /// Per-language fraction of the window.
    pub fn language_distribution(&self) -> BTreeMap<Language, f64> {
        mixing::language_distribution(&self.history)
    }

    /// Clear history and counters, keeping identity and window size.
    pub fn reset(&mut self) {
        self.history.clear();
        self.switch_points.clear();
        self.switch_count = 0;
        self.segments_seen = 0;
        self.last_activity = Utc::now();
    }

    /// Duration since last activity.
    pub fn idle_duration(&self) -> chrono::Duration {
        Utc::now() - self.last_activity
    }
}
