use super::{
    Id,
    analytics::{AnalyticsQuery, RangePreset},
    meter::ResourceType,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A pinned analytics chart, persisted in browser storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteChart {
    pub id: String,
    pub name: String,
    pub properties: Vec<Id>,
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    #[serde(default)]
    pub range: RangePreset,
}

impl FavoriteChart {
    /// The analytics request this pin stands for, resolved against `today`.
    pub fn query(&self, today: NaiveDate) -> AnalyticsQuery {
        AnalyticsQuery::new(
            self.properties.clone(),
            self.resource_type,
            self.range.period(today),
        )
    }
}
