use crate::modules::quotations::core::quotation::Quotation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

impl AmountRange {
    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }
}

/// Interactive filters over the quotation view. Empty lists, empty strings and
/// `None` ranges are not applied. A row whose filtered column is null never
/// matches an applied predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationFilter {
    pub requesters: Vec<String>,
    pub creators: Vec<String>,
    pub samsung_number: Option<String>,
    pub project_name: Option<String>,
    pub amount_range: Option<AmountRange>,
    pub date_range: Option<DateRange>,
}

impl QuotationFilter {
    pub fn matches(&self, quotation: &Quotation) -> bool {
        is_selected(&self.requesters, quotation.requester.as_deref())
            && is_selected(&self.creators, quotation.creator.as_deref())
            && contains_ignore_case(
                self.samsung_number.as_deref(),
                quotation.samsung_number.as_deref(),
            )
            && contains_ignore_case(
                self.project_name.as_deref(),
                quotation.project_name.as_deref(),
            )
            && self
                .amount_range
                .is_none_or(|range| quotation.total_amount.is_some_and(|a| range.contains(a)))
            && self
                .date_range
                .is_none_or(|range| quotation.quote_date.is_some_and(|d| range.contains(d)))
    }

    /// Keeps matching rows, newest quote date first, undated rows last.
    /// Rows with the same date keep their load order.
    pub fn apply(&self, quotations: Vec<Quotation>) -> Vec<Quotation> {
        let mut rows: Vec<Quotation> = quotations
            .into_iter()
            .filter(|quotation| self.matches(quotation))
            .collect();
        rows.sort_by(|a, b| b.quote_date.cmp(&a.quote_date));
        rows
    }
}

fn is_selected(selection: &[String], value: Option<&str>) -> bool {
    if selection.is_empty() {
        return true;
    }
    value.is_some_and(|v| selection.iter().any(|s| s == v))
}

fn contains_ignore_case(needle: Option<&str>, haystack: Option<&str>) -> bool {
    match needle {
        None | Some("") => true,
        Some(needle) => haystack
            .is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase())),
    }
}

/// Choices a client can offer for the filters, computed over the full view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub requesters: Vec<String>,
    pub creators: Vec<String>,
    pub min_quote_date: Option<NaiveDate>,
    pub max_quote_date: Option<NaiveDate>,
    pub min_total_amount: Option<f64>,
    pub max_total_amount: Option<f64>,
}

impl FilterOptions {
    pub fn from_quotations(quotations: &[Quotation]) -> Self {
        let mut options = FilterOptions::default();
        for quotation in quotations {
            push_distinct(&mut options.requesters, quotation.requester.as_deref());
            push_distinct(&mut options.creators, quotation.creator.as_deref());

            if let Some(date) = quotation.quote_date {
                options.min_quote_date = Some(options.min_quote_date.map_or(date, |d| d.min(date)));
                options.max_quote_date = Some(options.max_quote_date.map_or(date, |d| d.max(date)));
            }
            if let Some(amount) = quotation.total_amount {
                options.min_total_amount =
                    Some(options.min_total_amount.map_or(amount, |a| a.min(amount)));
                options.max_total_amount =
                    Some(options.max_total_amount.map_or(amount, |a| a.max(amount)));
            }
        }
        options
    }
}

fn push_distinct(values: &mut Vec<String>, value: Option<&str>) {
    if let Some(value) = value {
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
}
