// In memory warehouse: quotation rows plus the notes table.
//
// Purpose
// - Exercise the use cases and the inbound adapters without BigQuery.
//
// Responsibilities
// - Join notes onto quotations by the derived key, like the warehouse query.
// - Upsert notes keyed by the derived key.

use crate::modules::quotations::core::quotation::QuotationRecord;
use crate::modules::quotations::core::unique_key::generate_unique_id;
use crate::modules::quotations::use_cases::list_quotations::queries_port::QuotationSource;
use crate::modules::quotations::use_cases::save_notes::persister_port::{
    NotePersister, PersistError,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryWarehouse {
    quotations: RwLock<Vec<QuotationRecord>>,
    notes: RwLock<HashMap<String, Option<String>>>,
    is_offline: bool,
}

impl InMemoryWarehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes carried by the records seed the notes table, last record wins.
    pub fn with_quotations(quotations: Vec<QuotationRecord>) -> Self {
        let notes = quotations
            .iter()
            .filter(|record| record.note.is_some())
            .map(|record| {
                let key =
                    generate_unique_id(record.project_name.as_deref(), record.requester.as_deref());
                (key, record.note.clone())
            })
            .collect();
        Self {
            quotations: RwLock::new(quotations),
            notes: RwLock::new(notes),
            ..Self::default()
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// `None` when no row exists for the key, `Some(None)` for a null note.
    pub async fn note(&self, key: &str) -> Option<Option<String>> {
        self.notes.read().await.get(key).cloned()
    }
}

#[async_trait::async_trait]
impl QuotationSource for InMemoryWarehouse {
    async fn fetch_quotations(&self) -> anyhow::Result<Vec<QuotationRecord>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Warehouse offline"));
        }

        let notes = self.notes.read().await;
        let rows = self
            .quotations
            .read()
            .await
            .iter()
            .cloned()
            .map(|mut record| {
                let key =
                    generate_unique_id(record.project_name.as_deref(), record.requester.as_deref());
                record.note = notes.get(&key).cloned().flatten();
                record
            })
            .collect();
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl NotePersister for InMemoryWarehouse {
    async fn persist(&self, key: &str, note: Option<&str>) -> Result<(), PersistError> {
        if self.is_offline {
            return Err(PersistError::Unavailable("Warehouse offline".into()));
        }

        self.notes
            .write()
            .await
            .insert(key.to_string(), note.map(str::to_string));
        Ok(())
    }
}
