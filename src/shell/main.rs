use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use quotation_notes::modules::access::password_gate::PasswordGate;
use quotation_notes::modules::quotations::adapters::outbound::warehouse_bigquery::BigQueryWarehouse;
use quotation_notes::modules::quotations::adapters::outbound::warehouse_in_memory::InMemoryWarehouse;
use quotation_notes::modules::quotations::core::quotation::QuotationRecord;
use quotation_notes::shared::infrastructure::bigquery::BigQueryClient;
use quotation_notes::shell::config::{AppConfig, WarehouseConfig};
use quotation_notes::shell::http::router;
use quotation_notes::shell::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = AppConfig::from_env()?;
    let gate = PasswordGate::new(config.password);

    let state = match config.warehouse {
        WarehouseConfig::InMemory { seed_file } => {
            let quotations = match seed_file {
                Some(path) => load_seed(&path)?,
                None => Vec::new(),
            };
            tracing::info!(rows = quotations.len(), "using in-memory warehouse");
            AppState::new(gate, Arc::new(InMemoryWarehouse::with_quotations(quotations)))
        }
        WarehouseConfig::BigQuery { client, dataset } => {
            tracing::info!(project = %client.project_id, %dataset, "using bigquery warehouse");
            let client = BigQueryClient::new(client)?;
            AppState::new(gate, Arc::new(BigQueryWarehouse::new(client, dataset)))
        }
    };

    let app = router(state);

    tracing::info!("HTTP endpoint: http://{}", config.bind_addr);
    tracing::info!("GraphQL endpoint: http://{}/gql", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn load_seed(path: &Path) -> anyhow::Result<Vec<QuotationRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing seed file {}", path.display()))
}
