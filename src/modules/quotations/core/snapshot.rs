// Point-in-time view of the notes column, keyed by the derived key.
//
// A snapshot is built by folding ordered (key, note) pairs. When a key occurs
// more than once the last occurrence wins, both its note and its position in
// the iteration order. Snapshots are built for one comparison and dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One `(unique_key, note)` pair as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub unique_key: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl NoteEntry {
    pub fn new(unique_key: impl Into<String>, note: Option<&str>) -> Self {
        Self {
            unique_key: unique_key.into(),
            note: note.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<NoteEntry>,
    index: HashMap<String, usize>,
}

impl Snapshot {
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        // key -> (position of the last occurrence, note of the last occurrence)
        let latest = pairs.into_iter().enumerate().fold(
            HashMap::<String, (usize, Option<String>)>::new(),
            |mut acc, (position, (key, note))| {
                acc.insert(key.into(), (position, note));
                acc
            },
        );

        let mut ordered: Vec<(String, usize, Option<String>)> = latest
            .into_iter()
            .map(|(key, (position, note))| (key, position, note))
            .collect();
        ordered.sort_by_key(|(_, position, _)| *position);

        let entries: Vec<NoteEntry> = ordered
            .into_iter()
            .map(|(unique_key, _, note)| NoteEntry { unique_key, note })
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.unique_key.clone(), i))
            .collect();

        Self { entries, index }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = NoteEntry>) -> Self {
        Self::from_pairs(entries.into_iter().map(|e| (e.unique_key, e.note)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// `None` when the key is absent, `Some(None)` when the note is null.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].note.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|entry| (entry.unique_key.as_str(), entry.note.as_deref()))
    }
}

/// Comparison form of a note: null and empty are the same value.
pub fn normalize_note(note: Option<&str>) -> &str {
    note.unwrap_or_default()
}
