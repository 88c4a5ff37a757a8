// BigQuery implementation of the QuotationSource and NotePersister ports.
//
// Tables (all in one dataset)
// - projektlista: projects (azonosito, szam, felelos)
// - ajanlatok: quotations (pjt_azonosito, pjt_nev, vegosszeg, ajanlatkero, datum, keszito)
// - megjegyzesek: notes (azonositok, megjegyzesek)
//
// The join key in SQL is derived with the same five token rule as
// generate_unique_id, so notes attach to the rows the service annotates.

use crate::modules::quotations::core::quotation::QuotationRecord;
use crate::modules::quotations::core::unique_key::PROJECT_NAME_TOKENS;
use crate::modules::quotations::use_cases::list_quotations::queries_port::QuotationSource;
use crate::modules::quotations::use_cases::save_notes::persister_port::{
    NotePersister, PersistError,
};
use crate::shared::infrastructure::bigquery::{
    BigQueryClient, BigQueryError, NamedRow, QueryParameter, QueryRequest,
};
use async_trait::async_trait;
use chrono::NaiveDate;

pub struct BigQueryWarehouse {
    client: BigQueryClient,
    dataset: String,
}

impl BigQueryWarehouse {
    pub fn new(client: BigQueryClient, dataset: impl Into<String>) -> Self {
        Self {
            client,
            dataset: dataset.into(),
        }
    }
}

pub fn select_quotations_sql(dataset: &str) -> String {
    format!(
        r#"
    WITH quotations AS (
        SELECT
            p.azonosito AS project_id,
            p.szam AS samsung_number,
            p.felelos AS owner,
            a.pjt_nev AS project_name,
            a.vegosszeg AS total_amount,
            a.ajanlatkero AS requester,
            a.datum AS quote_date,
            a.keszito AS creator,
            TRIM(CONCAT(
                ARRAY_TO_STRING(ARRAY(
                    SELECT token
                    FROM UNNEST(SPLIT(IFNULL(a.pjt_nev, ''), ' ')) AS token WITH OFFSET AS pos
                    WHERE pos < {PROJECT_NAME_TOKENS}
                    ORDER BY pos
                ), ' '),
                ' ',
                IFNULL(a.ajanlatkero, '')
            )) AS unique_key
        FROM
            `{dataset}.projektlista` AS p
        LEFT JOIN
            `{dataset}.ajanlatok` AS a ON p.azonosito = a.pjt_azonosito
    )
    SELECT
        CAST(q.project_id AS STRING) AS project_id,
        CAST(q.samsung_number AS STRING) AS samsung_number,
        q.owner,
        q.project_name,
        SAFE_CAST(q.total_amount AS FLOAT64) AS total_amount,
        q.requester,
        CAST(q.quote_date AS STRING) AS quote_date,
        q.creator,
        m.megjegyzesek AS note
    FROM
        quotations AS q
    LEFT JOIN
        `{dataset}.megjegyzesek` AS m ON q.unique_key = m.azonositok
    "#
    )
}

pub fn merge_note_sql(dataset: &str) -> String {
    format!(
        r#"
    MERGE `{dataset}.megjegyzesek` T
    USING (SELECT @key AS azonositok, @note AS megjegyzesek) S
    ON T.azonositok = S.azonositok
    WHEN MATCHED THEN
      UPDATE SET megjegyzesek = S.megjegyzesek
    WHEN NOT MATCHED THEN
      INSERT (azonositok, megjegyzesek) VALUES (S.azonositok, S.megjegyzesek)
    "#
    )
}

/// Maps one result row onto a record. Dates and amounts that do not parse
/// become `None` instead of failing the whole fetch.
pub fn record_from_row(row: &NamedRow) -> QuotationRecord {
    let text = |column: &str| row.get(column).cloned().flatten();
    QuotationRecord {
        project_id: text("project_id"),
        samsung_number: text("samsung_number"),
        owner: text("owner"),
        project_name: text("project_name"),
        total_amount: text("total_amount").and_then(|v| v.trim().parse::<f64>().ok()),
        requester: text("requester"),
        quote_date: text("quote_date").and_then(|v| parse_date(&v)),
        creator: text("creator"),
        note: text("note"),
    }
}

// DATE, DATETIME and TIMESTAMP all cast to strings starting with YYYY-MM-DD.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let day = value.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

fn persist_error(error: BigQueryError) -> PersistError {
    match error {
        BigQueryError::Transport(e) => PersistError::Unavailable(e.to_string()),
        other => PersistError::Backend(other.to_string()),
    }
}

#[async_trait]
impl QuotationSource for BigQueryWarehouse {
    async fn fetch_quotations(&self) -> anyhow::Result<Vec<QuotationRecord>> {
        let request = QueryRequest::new(select_quotations_sql(&self.dataset));
        let response = self.client.query(&request).await?;
        let rows = response.named_rows()?;
        Ok(rows.iter().map(record_from_row).collect())
    }
}

#[async_trait]
impl NotePersister for BigQueryWarehouse {
    async fn persist(&self, key: &str, note: Option<&str>) -> Result<(), PersistError> {
        let request = QueryRequest::new(merge_note_sql(&self.dataset))
            .with_parameter(QueryParameter::string("key", Some(key)))
            .with_parameter(QueryParameter::string("note", note));
        self.client
            .query(&request)
            .await
            .map(|_| ())
            .map_err(persist_error)
    }
}
