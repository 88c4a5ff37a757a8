use crate::modules::quotations::core::snapshot::{NoteEntry, Snapshot};
use serde::Deserialize;

/// Notes as they were rendered and as the user left them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SaveNotes {
    pub original: Vec<NoteEntry>,
    pub edited: Vec<NoteEntry>,
}

impl SaveNotes {
    pub fn snapshots(self) -> (Snapshot, Snapshot) {
        (
            Snapshot::from_entries(self.original),
            Snapshot::from_entries(self.edited),
        )
    }
}

#[cfg(test)]
mod save_notes_command_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_deserialize_and_split_into_snapshots() {
        let command: SaveNotes = serde_json::from_str(
            r#"{
                "original": [{"unique_key": "K", "note": "a"}, {"unique_key": "K", "note": "b"}],
                "edited": [{"unique_key": "K", "note": null}]
            }"#,
        )
        .unwrap();

        let (original, edited) = command.snapshots();

        assert_eq!(original.get("K"), Some(Some("b")));
        assert_eq!(edited.get("K"), Some(None));
    }
}
