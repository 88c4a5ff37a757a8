// Test double for the NotePersister port.
// Records every call in order and can be told to fail on one key.

use crate::modules::quotations::use_cases::save_notes::persister_port::{
    NotePersister, PersistError,
};
use async_trait::async_trait;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct RecordingPersister {
    calls: Mutex<Vec<(String, Option<String>)>>,
    failing_key: Option<String>,
}

impl RecordingPersister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(key: impl Into<String>) -> Self {
        Self {
            failing_key: Some(key.into()),
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl NotePersister for RecordingPersister {
    async fn persist(&self, key: &str, note: Option<&str>) -> Result<(), PersistError> {
        if self.failing_key.as_deref() == Some(key) {
            return Err(PersistError::Unavailable(format!("refused key {key}")));
        }
        self.calls
            .lock()
            .await
            .push((key.to_string(), note.map(str::to_string)));
        Ok(())
    }
}
