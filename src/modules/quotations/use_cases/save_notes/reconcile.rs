// Change detection between the rendered notes and the edited notes.
//
// Purpose
// - Decide which keys need a write, then write them one at a time.
//
// Responsibilities
// - Compare notes with null and empty treated as equal, everything else exact.
// - Walk keys in the original snapshot order so the writes are deterministic.
// - Write null for a cleared note, never an empty string.
// - Stop at the first failed write. Earlier writes stay applied.

use crate::modules::quotations::core::snapshot::{Snapshot, normalize_note};
use crate::modules::quotations::use_cases::save_notes::persister_port::{
    NotePersister, PersistError,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteChange {
    pub key: String,
    /// Value to store. `None` clears the note.
    pub note: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("failed to save note for '{key}': {source}")]
    Persist {
        key: String,
        #[source]
        source: PersistError,
    },
}

/// Keys of `original` whose note differs in `edited`. Keys missing from
/// `edited` are left alone; keys only present in `edited` are ignored.
pub fn changed_notes(original: &Snapshot, edited: &Snapshot) -> Vec<NoteChange> {
    original
        .iter()
        .filter_map(|(key, before)| {
            let after = edited.get(key)?;
            if normalize_note(before) == normalize_note(after) {
                return None;
            }
            let note = after.filter(|n| !n.is_empty()).map(str::to_string);
            Some(NoteChange {
                key: key.to_string(),
                note,
            })
        })
        .collect()
}

/// Persists every changed note and returns how many were written.
pub async fn reconcile<P>(
    original: &Snapshot,
    edited: &Snapshot,
    persister: &P,
) -> Result<usize, ReconcileError>
where
    P: NotePersister + ?Sized,
{
    let changes = changed_notes(original, edited);
    for change in &changes {
        persister
            .persist(&change.key, change.note.as_deref())
            .await
            .map_err(|source| ReconcileError::Persist {
                key: change.key.clone(),
                source,
            })?;
        tracing::debug!(key = %change.key, cleared = change.note.is_none(), "note persisted");
    }
    Ok(changes.len())
}
