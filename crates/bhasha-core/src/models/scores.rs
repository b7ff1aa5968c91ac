//! DialectScores: an insertion-ordered dialect → confidence map.
//!
//! Insertion order is the scorer's key order; fusion relies on it as the
//! stable tie-break when two dialects fuse to the same score.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{Dialect, Language};

/// Per-dialect confidence values in [0, 1] with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialectScores {
    entries: Vec<(Dialect, f64)>,
}

impl DialectScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a score. Replacing keeps the original position.
    /// Non-finite values become 0; everything is clamped to [0, 1].
    pub fn insert(&mut self, dialect: Dialect, score: f64) {
        let score = if score.is_finite() {
            score.clamp(0.0, 1.0)
        } else {
            0.0
        };
        match self.entries.iter_mut().find(|(d, _)| *d == dialect) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((dialect, score)),
        }
    }

    pub fn get(&self, dialect: Dialect) -> Option<f64> {
        self.entries
            .iter()
            .find(|(d, _)| *d == dialect)
            .map(|(_, s)| *s)
    }

    pub fn contains(&self, dialect: Dialect) -> bool {
        self.get(dialect).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dialect, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn dialects(&self) -> impl Iterator<Item = Dialect> + '_ {
        self.entries.iter().map(|(d, _)| *d)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all scores.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, s)| s).sum()
    }

    /// Highest-scoring dialect; ties go to the earlier key.
    pub fn top(&self) -> Option<(Dialect, f64)> {
        self.entries.iter().copied().fold(None, |best, (d, s)| match best {
            Some((_, bs)) if bs >= s => best,
            _ => Some((d, s)),
        })
    }

    /// Scores rescaled to sum to one. An all-zero map is returned unchanged.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 {
            return self.clone();
        }
        self.entries
            .iter()
            .map(|(d, s)| (*d, s / total))
            .collect()
    }

    /// Per-language score, taking the best dialect of each language.
    /// Languages appear in first-seen order.
    pub fn by_language(&self) -> Vec<(Language, f64)> {
        let mut out: Vec<(Language, f64)> = Vec::new();
        for (d, s) in &self.entries {
            let lang = d.language();
            match out.iter_mut().find(|(l, _)| *l == lang) {
                Some(entry) => entry.1 = entry.1.max(*s),
                None => out.push((lang, *s)),
            }
        }
        out
    }
}

impl FromIterator<(Dialect, f64)> for DialectScores {
    fn from_iter<I: IntoIterator<Item = (Dialect, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (d, s) in iter {
            scores.insert(d, s);
        }
        scores
    }
}

impl<const N: usize> From<[(Dialect, f64); N]> for DialectScores {
    fn from(arr: [(Dialect, f64); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl Serialize for DialectScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(d, s)| (d, s)))
    }
}

struct ScoresVisitor;

impl<'de> Visitor<'de> for ScoresVisitor {
    type Value = DialectScores;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of dialect code to confidence")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut scores = DialectScores::new();
        while let Some((dialect, score)) = map.next_entry::<Dialect, f64>()? {
            scores.insert(dialect, score);
        }
        Ok(scores)
    }
}

impl<'de> Deserialize<'de> for DialectScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ScoresVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut scores = DialectScores::from([(Dialect::Hindi, 0.2), (Dialect::Bengali, 0.5)]);
        scores.insert(Dialect::Hindi, 0.9);
        let order: Vec<_> = scores.dialects().collect();
        assert_eq!(order, vec![Dialect::Hindi, Dialect::Bengali]);
        assert_eq!(scores.get(Dialect::Hindi), Some(0.9));
    }

    #[test]
    fn clamps_out_of_range_values() {
        let scores = DialectScores::from([
            (Dialect::Hindi, 1.7),
            (Dialect::Tamil, -0.3),
            (Dialect::Telugu, f64::NAN),
        ]);
        assert_eq!(scores.get(Dialect::Hindi), Some(1.0));
        assert_eq!(scores.get(Dialect::Tamil), Some(0.0));
        assert_eq!(scores.get(Dialect::Telugu), Some(0.0));
    }

    #[test]
    fn top_prefers_earlier_key_on_tie() {
        let scores = DialectScores::from([(Dialect::Bengali, 0.5), (Dialect::Hindi, 0.5)]);
        assert_eq!(scores.top(), Some((Dialect::Bengali, 0.5)));
    }

    #[test]
    fn by_language_takes_best_variant() {
        let scores = DialectScores::from([
            (Dialect::Hindi, 0.3),
            (Dialect::Bengali, 0.2),
            (Dialect::HindiBhojpuri, 0.4),
        ]);
        assert_eq!(
            scores.by_language(),
            vec![(Language::Hindi, 0.4), (Language::Bengali, 0.2)]
        );
    }

    #[test]
    fn json_preserves_key_order() {
        let json = r#"{"te":0.1,"hi":0.6,"bn":0.3}"#;
        let scores: DialectScores = serde_json::from_str(json).unwrap();
        let order: Vec<_> = scores.dialects().collect();
        assert_eq!(order, vec![Dialect::Telugu, Dialect::Hindi, Dialect::Bengali]);
        assert_eq!(serde_json::to_string(&scores).unwrap(), json);
    }
}
