use crate::shared::infrastructure::bigquery::{BigQueryConfig, Credentials, DEFAULT_ENDPOINT};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATASET: &str = "ajanlatok_dataset";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarehouseConfig {
    InMemory { seed_file: Option<PathBuf> },
    BigQuery { client: BigQueryConfig, dataset: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub password: String,
    pub bind_addr: SocketAddr,
    pub warehouse: WarehouseConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let password = get("DASHBOARD_PASSWORD").ok_or(ConfigError::Missing("DASHBOARD_PASSWORD"))?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let key = get("GCP_SERVICE_ACCOUNT_KEY");
        let project_id = get("BIGQUERY_PROJECT_ID");

        let warehouse = if key.is_none() && project_id.is_none() {
            WarehouseConfig::InMemory {
                seed_file: get("QUOTATIONS_SEED_FILE").map(PathBuf::from),
            }
        } else {
            let (credentials, key_project) = match key {
                Some(key) => {
                    let key_project = key_project_id(&key)?;
                    (Credentials::ServiceAccountKey(key), key_project)
                }
                None => {
                    let token = get("BIGQUERY_ACCESS_TOKEN")
                        .ok_or(ConfigError::Missing("GCP_SERVICE_ACCOUNT_KEY"))?;
                    (Credentials::AccessToken(token), None)
                }
            };
            let project_id = project_id
                .or(key_project)
                .ok_or(ConfigError::Missing("BIGQUERY_PROJECT_ID"))?;
            let dataset = get("BIGQUERY_DATASET").unwrap_or_else(|| DEFAULT_DATASET.to_string());
            validate_dataset(&dataset)?;
            WarehouseConfig::BigQuery {
                client: BigQueryConfig {
                    endpoint: get("BIGQUERY_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
                    project_id,
                    credentials,
                },
                dataset,
            }
        };

        Ok(Self {
            password,
            bind_addr,
            warehouse,
        })
    }
}

#[derive(Deserialize)]
struct ServiceAccountKey {
    project_id: Option<String>,
}

// Only the project is read here; the key itself is parsed by the token source.
fn key_project_id(key: &str) -> Result<Option<String>, ConfigError> {
    serde_json::from_str::<ServiceAccountKey>(key)
        .map(|parsed| parsed.project_id)
        .map_err(|e| ConfigError::Invalid {
            name: "GCP_SERVICE_ACCOUNT_KEY",
            reason: e.to_string(),
        })
}

// The dataset is interpolated into SQL.
fn validate_dataset(dataset: &str) -> Result<(), ConfigError> {
    if dataset
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name: "BIGQUERY_DATASET",
            reason: format!("'{dataset}' may only contain letters, digits and '_'"),
        })
    }
}
