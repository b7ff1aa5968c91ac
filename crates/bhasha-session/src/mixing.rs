//! Pure helpers over scores and segment windows.

use std::collections::BTreeMap;

use bhasha_core::models::{DialectScores, Language};

use crate::context::SegmentSnapshot;

/// The second-ranked language of a score map, if it reaches `threshold`.
///
/// Languages are ranked by their best dialect score; ties keep first-seen
/// order. Only languages other than the top one are considered.
pub fn secondary_language(scores: &DialectScores, threshold: f64) -> Option<Language> {
    let mut ranked = scores.by_language();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked
        .get(1)
        .filter(|(_, score)| *score >= threshold)
        .map(|(lang, _)| *lang)
}

/// Fraction of the window spent in each language. Sums to one for a
/// non-empty window.
pub fn language_distribution<'a, I>(window: I) -> BTreeMap<Language, f64>
where
    I: IntoIterator<Item = &'a SegmentSnapshot>,
{
    let mut counts: BTreeMap<Language, usize> = BTreeMap::new();
    let mut total = 0usize;
    for snap in window {
        *counts.entry(snap.language).or_insert(0) += 1;
        total += 1;
    }
    counts
        .into_iter()
        .map(|(lang, n)| (lang, n as f64 / total as f64))
        .collect()
}

/// Most frequent language in the window. Ties go to the language seen most
/// recently.
pub fn dominant_language<'a, I>(window: I) -> Option<Language>
where
    I: IntoIterator<Item = &'a SegmentSnapshot>,
{
    // language -> (count, position of last occurrence)
    let mut stats: BTreeMap<Language, (usize, usize)> = BTreeMap::new();
    for (pos, snap) in window.into_iter().enumerate() {
        let entry = stats.entry(snap.language).or_insert((0, pos));
        entry.0 += 1;
        entry.1 = pos;
    }
    stats
        .into_iter()
        .max_by_key(|(_, (count, last))| (*count, *last))
        .map(|(lang, _)| lang)
}
