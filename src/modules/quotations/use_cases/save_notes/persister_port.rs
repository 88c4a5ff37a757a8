use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("note store unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Writes one note. Implementations insert the note when the key is unknown
/// and overwrite it otherwise; `None` stores a null note. Repeating a call
/// with the same arguments leaves the store unchanged.
#[async_trait]
pub trait NotePersister: Send + Sync {
    async fn persist(&self, key: &str, note: Option<&str>) -> Result<(), PersistError>;
}
