// Minimal BigQuery REST client around `jobs.query` and `jobs.getQueryResults`.
//
// Responsibilities
// - Send standard SQL with named parameters and a bearer token.
// - Wait for the job and collect every result page before returning.
// - Decode the tabular response into rows addressed by column name.
//
// Boundaries
// - Tokens come from a TokenSource: a service account key (minted and
//   refreshed by gcp_auth) or a fixed token.

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://bigquery.googleapis.com";
pub const BIGQUERY_SCOPE: &str = "https://www.googleapis.com/auth/bigquery";
const QUERY_TIMEOUT_MS: u64 = 30_000;
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Service account key JSON.
    ServiceAccountKey(String),
    /// Fixed bearer token. It is never refreshed.
    AccessToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ServiceAccountKey(_) => f.write_str("ServiceAccountKey(<redacted>)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigQueryConfig {
    pub endpoint: String,
    pub project_id: String,
    pub credentials: Credentials,
}

#[derive(Debug, Error)]
pub enum BigQueryError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("bigquery returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("query results are pending but the response has no job reference")]
    JobIncomplete,

    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Hands out a bearer token for each request.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn bearer_token(&self) -> Result<String, BigQueryError>;
}

pub struct FixedToken(pub String);

#[async_trait]
impl TokenSource for FixedToken {
    async fn bearer_token(&self) -> Result<String, BigQueryError> {
        Ok(self.0.clone())
    }
}

/// Tokens minted from a service account key. gcp_auth caches each token and
/// mints a new one shortly before it expires.
pub struct ServiceAccountTokens {
    account: CustomServiceAccount,
}

impl ServiceAccountTokens {
    pub fn from_json(key: &str) -> Result<Self, BigQueryError> {
        let account =
            CustomServiceAccount::from_json(key).map_err(|e| BigQueryError::Auth(e.to_string()))?;
        Ok(Self { account })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokens {
    async fn bearer_token(&self) -> Result<String, BigQueryError> {
        let token = self
            .account
            .token(&[BIGQUERY_SCOPE])
            .await
            .map_err(|e| BigQueryError::Auth(e.to_string()))?;
        Ok(token.as_str().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub query: String,
    pub use_legacy_sql: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query_parameters: Vec<QueryParameter>,
    pub timeout_ms: u64,
}

impl QueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            use_legacy_sql: false,
            parameter_mode: None,
            query_parameters: Vec::new(),
            timeout_ms: QUERY_TIMEOUT_MS,
        }
    }

    pub fn with_parameter(mut self, parameter: QueryParameter) -> Self {
        self.parameter_mode = Some("NAMED");
        self.query_parameters.push(parameter);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameter {
    pub name: String,
    pub parameter_type: ParameterType,
    pub parameter_value: ParameterValue,
}

impl QueryParameter {
    /// A `STRING` parameter; `None` binds SQL `NULL`.
    pub fn string(name: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parameter_type: ParameterType {
                r#type: "STRING".to_string(),
            },
            parameter_value: ParameterValue {
                value: value.map(str::to_string),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterType {
    pub r#type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterValue {
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    pub project_id: String,
    pub job_id: String,
    pub location: Option<String>,
}

/// Body of both `jobs.query` and `jobs.getQueryResults`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    #[serde(default)]
    pub job_complete: bool,
    pub job_reference: Option<JobReference>,
    pub page_token: Option<String>,
    pub total_rows: Option<String>,
    pub schema: Option<TableSchema>,
    #[serde(default)]
    pub rows: Vec<TableRow>,
    pub num_dml_affected_rows: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<TableField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableField {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableRow {
    #[serde(default)]
    pub f: Vec<TableCell>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableCell {
    #[serde(default)]
    pub v: serde_json::Value,
}

/// One result row, scalar cells keyed by column name. Null cells are `None`.
pub type NamedRow = HashMap<String, Option<String>>;

impl QueryResponse {
    fn is_finished(&self) -> bool {
        self.job_complete && self.page_token.is_none()
    }

    // Folds a getQueryResults answer into the rows collected so far. While the
    // job is still running the answer carries no rows and the page token is kept.
    fn absorb(&mut self, next: QueryResponse) {
        self.job_reference = next.job_reference.or(self.job_reference.take());
        if !next.job_complete {
            return;
        }
        self.job_complete = true;
        self.page_token = next.page_token;
        self.total_rows = next.total_rows.or(self.total_rows.take());
        self.schema = self.schema.take().or(next.schema);
        self.num_dml_affected_rows = self.num_dml_affected_rows.take().or(next.num_dml_affected_rows);
        self.rows.extend(next.rows);
    }

    pub fn named_rows(&self) -> Result<Vec<NamedRow>, BigQueryError> {
        let fields = match &self.schema {
            Some(schema) => &schema.fields,
            None if self.rows.is_empty() => return Ok(Vec::new()),
            None => return Err(BigQueryError::Decode("rows without a schema".into())),
        };

        self.rows
            .iter()
            .map(|row| {
                if row.f.len() != fields.len() {
                    return Err(BigQueryError::Decode(format!(
                        "row has {} cells, schema has {} fields",
                        row.f.len(),
                        fields.len()
                    )));
                }
                Ok(fields
                    .iter()
                    .zip(&row.f)
                    .map(|(field, cell)| (field.name.clone(), scalar(&cell.v)))
                    .collect())
            })
            .collect()
    }
}

fn scalar(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string())
}

#[derive(Clone)]
pub struct BigQueryClient {
    http: reqwest::Client,
    endpoint: String,
    project_id: String,
    tokens: Arc<dyn TokenSource>,
}

impl BigQueryClient {
    pub fn new(config: BigQueryConfig) -> Result<Self, BigQueryError> {
        let tokens: Arc<dyn TokenSource> = match &config.credentials {
            Credentials::ServiceAccountKey(key) => Arc::new(ServiceAccountTokens::from_json(key)?),
            Credentials::AccessToken(token) => Arc::new(FixedToken(token.clone())),
        };
        Self::with_token_source(config.endpoint, config.project_id, tokens)
    }

    pub fn with_token_source(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        tokens: Arc<dyn TokenSource>,
    ) -> Result<Self, BigQueryError> {
        let http = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            tokens,
        })
    }

    fn queries_url(&self) -> String {
        format!(
            "{}/bigquery/v2/projects/{}/queries",
            self.endpoint, self.project_id
        )
    }

    fn query_results_url(&self, job: &JobReference) -> String {
        format!(
            "{}/bigquery/v2/projects/{}/queries/{}",
            self.endpoint, job.project_id, job.job_id
        )
    }

    /// Runs `request` and returns once the job is complete, with the rows of
    /// every result page.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BigQueryError> {
        let first = self.http.post(self.queries_url()).json(request);
        let mut response = self.send(first).await?;

        while !response.is_finished() {
            let job = response
                .job_reference
                .clone()
                .ok_or(BigQueryError::JobIncomplete)?;
            let mut params = vec![("timeoutMs", request.timeout_ms.to_string())];
            if let Some(location) = &job.location {
                params.push(("location", location.clone()));
            }
            if let Some(page_token) = &response.page_token {
                params.push(("pageToken", page_token.clone()));
            }
            tracing::debug!(
                job_id = %job.job_id,
                complete = response.job_complete,
                rows = response.rows.len(),
                "fetching query results"
            );

            let next = self.http.get(self.query_results_url(&job)).query(&params);
            response.absorb(self.send(next).await?);
        }
        Ok(response)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<QueryResponse, BigQueryError> {
        let token = self.tokens.bearer_token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BigQueryError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(response.json().await?)
    }
}
