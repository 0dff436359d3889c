use super::{Id, meter::ResourceType};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Formats a calendar month the way the backend keys aggregates: `YYYY-MM`.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

/// Month key for the month containing `date`.
pub fn month_key_of(date: NaiveDate) -> String {
    month_key(date.year(), date.month())
}

/// First day of the month `offset` whole months before `date`'s month.
pub fn month_start_back(date: NaiveDate, offset: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month() as i32 - 1 - offset as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

/// Inclusive month window used by the analytics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthRange {
    pub start_year: i32,
    pub start_month: u32,
    pub end_year: i32,
    pub end_month: u32,
}

impl MonthRange {
    /// Window covering the `months` calendar months ending in `end`'s month.
    pub fn ending_at(end: NaiveDate, months: u32) -> Self {
        let start = month_start_back(end, months.saturating_sub(1));
        Self {
            start_year: start.year(),
            start_month: start.month(),
            end_year: end.year(),
            end_month: end.month(),
        }
    }
}

/// Preset windows offered by the analytics builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RangePreset {
    #[serde(rename = "half")]
    HalfYear,
    #[default]
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "two")]
    TwoYears,
}

impl RangePreset {
    pub fn months(&self) -> u32 {
        match self {
            RangePreset::HalfYear => 6,
            RangePreset::Year => 12,
            RangePreset::TwoYears => 24,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RangePreset::HalfYear => "6 months",
            RangePreset::Year => "Year",
            RangePreset::TwoYears => "2 years",
        }
    }

    pub fn all() -> &'static [RangePreset] {
        &[RangePreset::HalfYear, RangePreset::Year, RangePreset::TwoYears]
    }

    /// The concrete month window this preset means as of `today`.
    pub fn period(&self, today: NaiveDate) -> MonthRange {
        MonthRange::ending_at(today, self.months())
    }
}

/// One month of aggregated charges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyPoint {
    pub month: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub total_consumption: f64,
    #[serde(default)]
    pub cumulative_amount: f64,
}

/// Per-resource totals inside the summary block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceTotal {
    pub resource_type: ResourceType,
    #[serde(default)]
    pub consumption: f64,
    #[serde(default)]
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SummaryBlock {
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub total_consumption: f64,
    #[serde(default)]
    pub average_daily: f64,
    #[serde(default)]
    pub peak_month: Option<String>,
    #[serde(default)]
    pub resources: Vec<ResourceTotal>,
}

/// Cross-property totals. The backend emits Django ORM join keys, hence the
/// double-underscore field names on the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "property__id")]
    pub property_id: Id,
    #[serde(rename = "property__name")]
    pub property_name: String,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub total_consumption: f64,
}

/// Server-computed aggregation consumed read-only by the dashboard and the
/// analytics builder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub period: Option<MonthRange>,
    #[serde(default)]
    pub monthly: Vec<MonthlyPoint>,
    #[serde(default)]
    pub summary: SummaryBlock,
    #[serde(default)]
    pub comparison: Vec<ComparisonRow>,
    #[serde(default)]
    pub forecast_amount: f64,
}

/// Current-vs-previous month figures for the dashboard stat cards.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthOverMonth {
    pub current_month: String,
    pub previous_month: String,
    pub current_amount: f64,
    pub previous_amount: f64,
}

impl MonthOverMonth {
    pub fn delta(&self) -> f64 {
        self.current_amount - self.previous_amount
    }
}

impl AnalyticsSummary {
    /// Total charged in the month identified by `key`, zero when the month
    /// is absent from the response.
    pub fn total_for_month(&self, key: &str) -> f64 {
        self.monthly
            .iter()
            .find(|point| point.month == key)
            .map_or(0.0, |point| point.total_amount)
    }

    /// Dashboard comparison of the month containing `today` against the one
    /// before it.
    pub fn month_over_month(&self, today: NaiveDate) -> MonthOverMonth {
        let current_month = month_key_of(today);
        let previous_month = month_key_of(month_start_back(today, 1));
        MonthOverMonth {
            current_amount: self.total_for_month(&current_month),
            previous_amount: self.total_for_month(&previous_month),
            current_month,
            previous_month,
        }
    }
}

/// Parameters for one analytics fetch: which properties, which resource
/// (all when `None`), which month window.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsQuery {
    pub properties: Vec<Id>,
    pub resource_type: Option<ResourceType>,
    pub range: MonthRange,
}

impl AnalyticsQuery {
    pub fn new(properties: Vec<Id>, resource_type: Option<ResourceType>, range: MonthRange) -> Self {
        Self {
            properties,
            resource_type,
            range,
        }
    }

    /// Query the dashboard uses for its stat cards: the active property over
    /// the current and previous month.
    pub fn current_window(property: Id, today: NaiveDate) -> Self {
        Self::new(vec![property], None, MonthRange::ending_at(today, 2))
    }
}
