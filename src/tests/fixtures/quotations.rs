// Shared test fixture for quotation records.
// The defaults come from json/quotation_record.json; setters override single columns.

use crate::modules::quotations::core::quotation::QuotationRecord;
use chrono::NaiveDate;

const DEFAULT_RECORD: &str = include_str!("json/quotation_record.json");

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

pub struct QuotationRecordBuilder {
    inner: QuotationRecord,
}

impl Default for QuotationRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl QuotationRecordBuilder {
    pub fn new() -> Self {
        let inner: QuotationRecord =
            serde_json::from_str(DEFAULT_RECORD).expect("valid quotation fixture");
        Self { inner }
    }

    pub fn project_id(mut self, v: impl Into<String>) -> Self {
        self.inner.project_id = Some(v.into());
        self
    }

    pub fn samsung_number(mut self, v: impl Into<String>) -> Self {
        self.inner.samsung_number = Some(v.into());
        self
    }

    pub fn no_samsung_number(mut self) -> Self {
        self.inner.samsung_number = None;
        self
    }

    pub fn project_name(mut self, v: impl Into<String>) -> Self {
        self.inner.project_name = Some(v.into());
        self
    }

    pub fn requester(mut self, v: impl Into<String>) -> Self {
        self.inner.requester = Some(v.into());
        self
    }

    pub fn creator(mut self, v: impl Into<String>) -> Self {
        self.inner.creator = Some(v.into());
        self
    }

    pub fn total_amount(mut self, v: f64) -> Self {
        self.inner.total_amount = Some(v);
        self
    }

    pub fn no_total_amount(mut self) -> Self {
        self.inner.total_amount = None;
        self
    }

    pub fn quote_date(mut self, v: NaiveDate) -> Self {
        self.inner.quote_date = Some(v);
        self
    }

    pub fn no_quote_date(mut self) -> Self {
        self.inner.quote_date = None;
        self
    }

    pub fn note(mut self, v: impl Into<String>) -> Self {
        self.inner.note = Some(v.into());
        self
    }

    pub fn build(self) -> QuotationRecord {
        self.inner
    }
}

#[cfg(test)]
mod quotation_record_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = QuotationRecordBuilder::default().build();
        assert_eq!(built.project_id.as_deref(), Some("P-0001"));
        assert_eq!(built.requester.as_deref(), Some("Teszt Kft."));
        assert_eq!(built.total_amount, Some(12_500_000.0));
        assert_eq!(built.quote_date, Some(date(2024, 3, 14)));
        assert_eq!(built.note, None);
    }

    #[rstest]
    fn setters_override_columns_and_build_returns_inner() {
        let custom = QuotationRecordBuilder::new()
            .project_id("P-9")
            .project_name("Name")
            .requester("Req")
            .creator("Creator")
            .note("Hello")
            .no_quote_date()
            .build();

        assert_eq!(custom.project_id.as_deref(), Some("P-9"));
        assert_eq!(custom.project_name.as_deref(), Some("Name"));
        assert_eq!(custom.requester.as_deref(), Some("Req"));
        assert_eq!(custom.creator.as_deref(), Some("Creator"));
        assert_eq!(custom.note.as_deref(), Some("Hello"));
        assert_eq!(custom.quote_date, None);
    }
}
