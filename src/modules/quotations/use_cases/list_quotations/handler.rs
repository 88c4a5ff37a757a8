use crate::modules::quotations::core::filter::{FilterOptions, QuotationFilter};
use crate::modules::quotations::core::quotation::{Quotation, annotate};
use crate::modules::quotations::use_cases::list_quotations::queries_port::QuotationSource;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuotationPage {
    pub count: usize,
    pub rows: Vec<Quotation>,
}

pub struct ListQuotationsHandler<TSource>
where
    TSource: QuotationSource + ?Sized,
{
    source: Arc<TSource>,
}

impl<TSource> ListQuotationsHandler<TSource>
where
    TSource: QuotationSource + ?Sized,
{
    pub fn new(source: Arc<TSource>) -> Self {
        Self { source }
    }

    /// Fetches the joined rows and derives every key once.
    pub async fn load(&self) -> anyhow::Result<Vec<Quotation>> {
        let records = self.source.fetch_quotations().await?;
        tracing::debug!(rows = records.len(), "quotations fetched");
        Ok(annotate(records))
    }

    pub async fn search(&self, filter: &QuotationFilter) -> anyhow::Result<QuotationPage> {
        let rows = filter.apply(self.load().await?);
        Ok(QuotationPage {
            count: rows.len(),
            rows,
        })
    }

    pub async fn options(&self) -> anyhow::Result<FilterOptions> {
        Ok(FilterOptions::from_quotations(&self.load().await?))
    }
}

#[cfg(test)]
mod list_quotations_handler_tests {
    use super::*;
    use crate::modules::quotations::adapters::outbound::warehouse_in_memory::InMemoryWarehouse;
    use crate::tests::fixtures::quotations::{QuotationRecordBuilder, date};
    use rstest::{fixture, rstest};

    #[fixture]
    fn warehouse() -> InMemoryWarehouse {
        InMemoryWarehouse::with_quotations(vec![
            QuotationRecordBuilder::new()
                .project_name("Régi ajánlat")
                .requester("Alfa Zrt.")
                .quote_date(date(2022, 5, 1))
                .build(),
            QuotationRecordBuilder::new()
                .project_name("Új ajánlat")
                .requester("Béta Kft.")
                .quote_date(date(2024, 9, 30))
                .build(),
        ])
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_annotate_rows_with_their_keys(warehouse: InMemoryWarehouse) {
        let handler = ListQuotationsHandler::new(Arc::new(warehouse));

        let rows = handler.load().await.unwrap();

        assert_eq!(rows[0].unique_key, "Régi ajánlat Alfa Zrt.");
        assert_eq!(rows[1].unique_key, "Új ajánlat Béta Kft.");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_return_the_filtered_and_sorted_page(warehouse: InMemoryWarehouse) {
        let handler = ListQuotationsHandler::new(Arc::new(warehouse));

        let page = handler.search(&QuotationFilter::default()).await.unwrap();

        assert_eq!(page.count, 2);
        assert_eq!(page.rows[0].unique_key, "Új ajánlat Béta Kft.");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_count_only_matching_rows(warehouse: InMemoryWarehouse) {
        let handler = ListQuotationsHandler::new(Arc::new(warehouse));
        let filter = QuotationFilter {
            requesters: vec!["Alfa Zrt.".into()],
            ..QuotationFilter::default()
        };

        let page = handler.search(&filter).await.unwrap();

        assert_eq!(page.count, 1);
        assert_eq!(page.rows.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_compute_the_filter_options(warehouse: InMemoryWarehouse) {
        let handler = ListQuotationsHandler::new(Arc::new(warehouse));

        let options = handler.options().await.unwrap();

        assert_eq!(options.requesters, vec!["Alfa Zrt.", "Béta Kft."]);
        assert_eq!(options.min_quote_date, Some(date(2022, 5, 1)));
        assert_eq!(options.max_quote_date, Some(date(2024, 9, 30)));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_propagate_source_failures(mut warehouse: InMemoryWarehouse) {
        warehouse.toggle_offline();
        let handler = ListQuotationsHandler::new(Arc::new(warehouse));

        let result = handler.search(&QuotationFilter::default()).await;

        assert!(result.is_err());
    }
}
