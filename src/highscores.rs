//! High score table
//!
//! Every submitted run is kept, sorted by score descending; the menu only
//! shows the top three but the whole list round-trips through the save
//! file. A missing or corrupt file is silently an empty table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence;

/// How many entries the menu displays
pub const MENU_ROWS: usize = 3;

/// One finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name, at most four characters
    pub name: String,
    pub score: u32,
}

/// Ranked score table; the on-disk form is a bare JSON array of entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and restore descending score order. Ties keep the
    /// earlier submission first.
    pub fn submit(&mut self, entry: ScoreEntry) {
        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// The rows the menu shows
    pub fn top(&self) -> &[ScoreEntry] {
        &self.entries[..self.entries.len().min(MENU_ROWS)]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load from disk. Absence or malformed content is recovered as an
    /// empty table - never an error.
    pub fn load(path: &Path) -> Self {
        let scores: HighScores = persistence::load_json_or_default(path);
        log::info!("Loaded {} high scores from {}", scores.len(), path.display());
        scores
    }

    /// Rewrite the whole table, pretty-printed
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        persistence::save_json_pretty(path, self)?;
        log::info!("High scores saved ({} entries)", self.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(name: &str, score: u32) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_submissions_sorted_descending() {
        let mut scores = HighScores::new();
        scores.submit(entry("A", 30));
        assert_eq!(scores.entries()[0].score, 30);

        scores.submit(entry("B", 50));
        let order: Vec<_> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, ["B", "A"]);

        scores.submit(entry("C", 10));
        let order: Vec<_> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, ["B", "A", "C"]);
    }

    #[test]
    fn test_ties_keep_submission_order() {
        let mut scores = HighScores::new();
        scores.submit(entry("OLD", 20));
        scores.submit(entry("NEW", 20));
        let order: Vec<_> = scores.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(order, ["OLD", "NEW"]);
    }

    #[test]
    fn test_top_caps_at_three() {
        let mut scores = HighScores::new();
        for i in 0..5 {
            scores.submit(entry("X", i * 10));
        }
        assert_eq!(scores.top().len(), 3);
        assert_eq!(scores.len(), 5);
    }

    #[test]
    fn test_serialized_form_is_an_array() {
        let mut scores = HighScores::new();
        scores.submit(entry("AB", 40));
        let json = serde_json::to_string(&scores).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"name\":\"AB\""));
    }

    proptest! {
        #[test]
        fn prop_always_sorted_and_growing(submissions in prop::collection::vec(0u32..1000, 0..40)) {
            let mut scores = HighScores::new();
            for (i, score) in submissions.iter().enumerate() {
                let before = scores.len();
                scores.submit(ScoreEntry { name: format!("P{i}"), score: *score });
                // Length only grows
                prop_assert_eq!(scores.len(), before + 1);
                // Descending after every insertion
                for pair in scores.entries().windows(2) {
                    prop_assert!(pair[0].score >= pair[1].score);
                }
            }
        }

        #[test]
        fn prop_serialize_roundtrip_idempotent(submissions in prop::collection::vec(0u32..1000, 0..20)) {
            let mut scores = HighScores::new();
            for (i, score) in submissions.iter().enumerate() {
                scores.submit(ScoreEntry { name: format!("P{i}"), score: *score });
            }
            let once = serde_json::to_string(&scores).unwrap();
            let reloaded: HighScores = serde_json::from_str(&once).unwrap();
            prop_assert_eq!(&reloaded, &scores);
            let twice = serde_json::to_string(&reloaded).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
