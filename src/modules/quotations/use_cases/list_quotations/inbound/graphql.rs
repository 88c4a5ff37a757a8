use async_graphql::{Context, InputObject, Object, Result as GqlResult, SimpleObject};
use chrono::NaiveDate;

use crate::modules::quotations::core::filter::{
    AmountRange, DateRange, FilterOptions, QuotationFilter,
};
use crate::modules::quotations::core::quotation::Quotation;
use crate::modules::quotations::use_cases::list_quotations::handler::QuotationPage;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlQuotation {
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

impl From<Quotation> for GqlQuotation {
    fn from(q: Quotation) -> Self {
        Self {
            unique_key: q.unique_key,
            project_id: q.project_id,
            samsung_number: q.samsung_number,
            owner: q.owner,
            project_name: q.project_name,
            total_amount: q.total_amount,
            requester: q.requester,
            quote_date: q.quote_date,
            creator: q.creator,
            note: q.note,
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlQuotationPage {
    pub count: i64,
    pub rows: Vec<GqlQuotation>,
}

impl From<QuotationPage> for GqlQuotationPage {
    fn from(page: QuotationPage) -> Self {
        Self {
            count: page.count as i64,
            rows: page.rows.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(SimpleObject, Clone)]
pub struct GqlFilterOptions {
    pub requesters: Vec<String>,
    pub creators: Vec<String>,
    pub min_quote_date: Option<NaiveDate>,
    pub max_quote_date: Option<NaiveDate>,
    pub min_total_amount: Option<f64>,
    pub max_total_amount: Option<f64>,
}

impl From<FilterOptions> for GqlFilterOptions {
    fn from(o: FilterOptions) -> Self {
        Self {
            requesters: o.requesters,
            creators: o.creators,
            min_quote_date: o.min_quote_date,
            max_quote_date: o.max_quote_date,
            min_total_amount: o.min_total_amount,
            max_total_amount: o.max_total_amount,
        }
    }
}

/// Ranges apply only when both bounds are given.
#[derive(InputObject, Default)]
pub struct GqlQuotationFilter {
    pub requesters: Option<Vec<String>>,
    pub creators: Option<Vec<String>>,
    pub samsung_number: Option<String>,
    pub project_name: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl From<GqlQuotationFilter> for QuotationFilter {
    fn from(f: GqlQuotationFilter) -> Self {
        Self {
            requesters: f.requesters.unwrap_or_default(),
            creators: f.creators.unwrap_or_default(),
            samsung_number: f.samsung_number,
            project_name: f.project_name,
            amount_range: f
                .min_amount
                .zip(f.max_amount)
                .map(|(min, max)| AmountRange { min, max }),
            date_range: f
                .from_date
                .zip(f.to_date)
                .map(|(from, to)| DateRange { from, to }),
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn quotations(
        &self,
        context: &Context<'_>,
        filter: Option<GqlQuotationFilter>,
    ) -> GqlResult<GqlQuotationPage> {
        let state = context.data_unchecked::<AppState>();
        let filter: QuotationFilter = filter.unwrap_or_default().into();
        let page = state.list_quotations.search(&filter).await?;
        Ok(page.into())
    }

    async fn filter_options(&self, context: &Context<'_>) -> GqlResult<GqlFilterOptions> {
        let state = context.data_unchecked::<AppState>();
        let options = state.list_quotations.options().await?;
        Ok(options.into())
    }
}
