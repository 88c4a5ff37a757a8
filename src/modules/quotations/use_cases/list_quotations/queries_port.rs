use crate::modules::quotations::core::quotation::QuotationRecord;
use async_trait::async_trait;

/// Read side of the warehouse: the project / quotation / note join.
#[async_trait]
pub trait QuotationSource: Send + Sync {
    async fn fetch_quotations(&self) -> anyhow::Result<Vec<QuotationRecord>>;
}
