use crate::modules::quotations::use_cases::save_notes::command::SaveNotes;
use crate::modules::quotations::use_cases::save_notes::persister_port::NotePersister;
use crate::modules::quotations::use_cases::save_notes::reconcile::{ReconcileError, reconcile};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveNotesError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SaveOutcome {
    NothingToSave,
    Saved { updated: usize },
}

pub struct SaveNotesHandler<TPersister>
where
    TPersister: NotePersister + ?Sized,
{
    persister: Arc<TPersister>,
}

impl<TPersister> SaveNotesHandler<TPersister>
where
    TPersister: NotePersister + ?Sized,
{
    pub fn new(persister: Arc<TPersister>) -> Self {
        Self { persister }
    }

    pub async fn handle(&self, command: SaveNotes) -> Result<SaveOutcome, SaveNotesError> {
        let batch_id = Uuid::now_v7();
        let (original, edited) = command.snapshots();

        match reconcile(&original, &edited, &*self.persister).await {
            Ok(0) => {
                tracing::info!(%batch_id, rows = original.len(), "no note changes to save");
                Ok(SaveOutcome::NothingToSave)
            }
            Ok(updated) => {
                tracing::info!(%batch_id, updated, "notes saved");
                Ok(SaveOutcome::Saved { updated })
            }
            Err(error) => {
                tracing::error!(%batch_id, %error, "saving notes failed");
                Err(error.into())
            }
        }
    }
}
