use crate::modules::quotations::core::unique_key::generate_unique_id;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the project / quotation / note join, as the warehouse returns it.
/// Every column is nullable because both joins are LEFT JOINs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuotationRecord {
    pub project_id: Option<String>,
    pub samsung_number: Option<String>,
    pub owner: Option<String>,
    pub project_name: Option<String>,
    pub total_amount: Option<f64>,
    pub requester: Option<String>,
    pub quote_date: Option<NaiveDate>,
    pub creator: Option<String>,
    pub note: Option<String>,
}

/// A quotation annotated with its derived key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quotation {
    pub unique_key: String,
    pub project_id: Option<String>,
    pub samsung_number: Option<String>,
    pub owner: Option<String>,
    pub project_name: Option<String>,
    pub total_amount: Option<f64>,
    pub requester: Option<String>,
    pub quote_date: Option<NaiveDate>,
    pub creator: Option<String>,
    pub note: Option<String>,
}

impl From<QuotationRecord> for Quotation {
    fn from(record: QuotationRecord) -> Self {
        let unique_key =
            generate_unique_id(record.project_name.as_deref(), record.requester.as_deref());
        Self {
            unique_key,
            project_id: record.project_id,
            samsung_number: record.samsung_number,
            owner: record.owner,
            project_name: record.project_name,
            total_amount: record.total_amount,
            requester: record.requester,
            quote_date: record.quote_date,
            creator: record.creator,
            note: record.note,
        }
    }
}

/// Computes the key of every record exactly once.
pub fn annotate(records: Vec<QuotationRecord>) -> Vec<Quotation> {
    records.into_iter().map(Quotation::from).collect()
}
