//! SessionContextTracker: concurrent per-session mixing state via DashMap.
//!
//! Segments of one session must arrive in increasing index order; that
//! sequencing is the caller's job. Distinct sessions update in parallel.

use std::collections::BTreeMap;
use std::sync::Arc;

use bhasha_core::config::SessionConfig;
use bhasha_core::models::{Dialect, DialectScores, Language};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::context::{SegmentSnapshot, SessionContext};
use crate::mixing;

/// What one segment did to its session's context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextUpdate {
    pub primary_dialect: Dialect,
    pub primary_language: Language,
    pub secondary_language: Option<Language>,
    pub code_switching_detected: bool,
    /// All retained switch points of the session, oldest first.
    pub switch_points: Vec<u32>,
    pub dominant_language: Language,
    pub language_distribution: BTreeMap<Language, f64>,
    /// Snapshots currently held in the window.
    pub window_len: usize,
    /// Always true: the tracker never drops state silently.
    pub context_preserved: bool,
}

/// Thread-safe owner of every live session context.
pub struct SessionContextTracker {
    sessions: Arc<DashMap<String, SessionContext>>,
    config: SessionConfig,
}

impl SessionContextTracker {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Fold one segment's scores into its session, creating the session on
    /// first use.
    ///
    /// The language is compared against `previous` when given, else against
    /// the last segment in the window. No reference means no switch.
    pub fn update(
        &self,
        session_id: &str,
        scores: &DialectScores,
        previous: Option<Dialect>,
        segment_index: u32,
    ) -> ContextUpdate {
        let (dialect, confidence) = scores
            .top()
            .or_else(|| previous.map(|d| (d, 0.0)))
            .unwrap_or((Dialect::Hindi, 0.0));
        let primary_language = dialect.language();
        let secondary_language = mixing::secondary_language(scores, self.config.mixing_threshold);

        let mut ctx = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionContext::new(session_id.to_string(), self.config.window_size));

        let reference = previous
            .map(|d| d.language())
            .or_else(|| ctx.last().map(|s| s.language));
        let code_switching_detected = reference.is_some_and(|lang| lang != primary_language);

        if code_switching_detected {
            ctx.record_switch(segment_index, self.config.max_switch_points);
            info!(
                session_id,
                segment_index,
                from = ?reference,
                to = %primary_language,
                "language switch detected"
            );
        }
        ctx.push(SegmentSnapshot::new(
            segment_index,
            dialect,
            confidence,
            scores.clone(),
        ));

        let update = ContextUpdate {
            primary_dialect: dialect,
            primary_language,
            secondary_language,
            code_switching_detected,
            switch_points: ctx.switch_points.clone(),
            dominant_language: ctx.dominant_language().unwrap_or(primary_language),
            language_distribution: ctx.language_distribution(),
            window_len: ctx.history.len(),
            context_preserved: true,
        };
        debug!(
            session_id,
            segment_index,
            primary = %dialect,
            window = update.window_len,
            "session context updated"
        );
        update
    }

    /// Snapshot of a session, or None if unknown.
    pub fn get(&self, session_id: &str) -> Option<SessionContext> {
        self.sessions.get(session_id).map(|r| r.clone())
    }

    /// Primary dialect of the session's most recent segment.
    pub fn last_dialect(&self, session_id: &str) -> Option<Dialect> {
        self.sessions
            .get(session_id)
            .and_then(|ctx| ctx.last().map(|s| s.dialect))
    }

    /// Index the next segment of a session would get when the caller does
    /// not supply one: the number of segments seen since the last reset.
    pub fn next_segment_index(&self, session_id: &str) -> u32 {
        self.sessions
            .get(session_id)
            .map_or(0, |ctx| u32::try_from(ctx.segments_seen).unwrap_or(u32::MAX))
    }

    /// Clear a session's history but keep the entry. No-op for unknown ids;
    /// returns whether the session existed.
    pub fn reset(&self, session_id: &str) -> bool {
        match self.sessions.get_mut(session_id) {
            Some(mut ctx) => {
                ctx.reset();
                debug!(session_id, "session context reset");
                true
            }
            None => false,
        }
    }

    /// Remove a session entirely. No-op for unknown ids; returns whether the
    /// session existed.
    pub fn clear(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            debug!(session_id, "session cleared");
        }
        removed
    }

    /// Remove every session idle for longer than `max_idle`. Never called
    /// implicitly; returns the number removed.
    pub fn evict_idle(&self, max_idle: chrono::Duration) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, ctx| ctx.idle_duration() <= max_idle);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            info!(removed, "evicted idle sessions");
        }
        removed
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// All live session ids.
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }
}

impl Default for SessionContextTracker {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
