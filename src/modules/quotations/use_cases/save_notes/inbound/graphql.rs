use async_graphql::{Context, Enum, InputObject, Object, Result as GqlResult, SimpleObject};

use crate::modules::quotations::core::snapshot::NoteEntry;
use crate::modules::quotations::use_cases::save_notes::command::SaveNotes;
use crate::modules::quotations::use_cases::save_notes::handler::SaveOutcome;
use crate::shell::state::AppState;

#[derive(InputObject, Clone)]
pub struct GqlNoteEntry {
    pub unique_key: String,
    pub note: Option<String>,
}

impl From<GqlNoteEntry> for NoteEntry {
    fn from(e: GqlNoteEntry) -> Self {
        Self {
            unique_key: e.unique_key,
            note: e.note,
        }
    }
}

#[derive(Enum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GqlSaveStatus {
    NothingToSave,
    Saved,
}

#[derive(SimpleObject, Clone, Debug, PartialEq, Eq)]
pub struct GqlSaveOutcome {
    pub status: GqlSaveStatus,
    pub updated: i64,
}

impl From<SaveOutcome> for GqlSaveOutcome {
    fn from(outcome: SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::NothingToSave => Self {
                status: GqlSaveStatus::NothingToSave,
                updated: 0,
            },
            SaveOutcome::Saved { updated } => Self {
                status: GqlSaveStatus::Saved,
                updated: updated as i64,
            },
        }
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn save_notes(
        &self,
        context: &Context<'_>,
        original: Vec<GqlNoteEntry>,
        edited: Vec<GqlNoteEntry>,
    ) -> GqlResult<GqlSaveOutcome> {
        let state = context.data_unchecked::<AppState>();

        let command = SaveNotes {
            original: original.into_iter().map(Into::into).collect(),
            edited: edited.into_iter().map(Into::into).collect(),
        };

        let outcome = state
            .save_notes
            .handle(command)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        Ok(outcome.into())
    }
}

#[cfg(test)]
mod save_notes_graphql_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SaveOutcome::NothingToSave, GqlSaveStatus::NothingToSave, 0)]
    #[case(SaveOutcome::Saved { updated: 3 }, GqlSaveStatus::Saved, 3)]
    fn it_should_flatten_the_outcome(
        #[case] outcome: SaveOutcome,
        #[case] status: GqlSaveStatus,
        #[case] updated: i64,
    ) {
        assert_eq!(
            GqlSaveOutcome::from(outcome),
            GqlSaveOutcome { status, updated }
        );
    }
}
