use super::{Id, reading::Reading};
use chrono::NaiveDate;

/// Days a meter may stay silent before we flag it dormant.
const DORMANT_AFTER_DAYS: i64 = 60;
/// Consecutive deltas inspected by the anomaly and stability checks.
const HEALTH_WINDOW: usize = 6;
/// Readings fed into the consumption estimator.
const ESTIMATE_WINDOW: usize = 10;
/// Priced readings sampled when deriving the charge per unit.
const RATE_SAMPLES: usize = 6;
/// A delta this much larger than its predecessor counts as a spike.
const SPIKE_FACTOR: f64 = 1.5;

/// Client-side projection of a meter's usage and cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageEstimate {
    pub daily_units: f64,
    pub monthly_cost: f64,
}

/// Heuristic classification of a meter's recent reading pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterHealth {
    NoData,
    Dormant,
    Anomaly,
    Nominal,
    Active,
    Watch,
}

impl MeterHealth {
    pub fn label(&self) -> &'static str {
        match self {
            MeterHealth::NoData => "No data",
            MeterHealth::Dormant => "Dormant",
            MeterHealth::Anomaly => "Anomaly",
            MeterHealth::Nominal => "Nominal",
            MeterHealth::Active => "Active",
            MeterHealth::Watch => "Watch",
        }
    }

    /// Suffix for the `tone-*` badge classes in the stylesheet.
    pub fn tone(&self) -> &'static str {
        match self {
            MeterHealth::NoData => "gray",
            MeterHealth::Dormant => "amber",
            MeterHealth::Anomaly => "rose",
            MeterHealth::Nominal => "emerald",
            MeterHealth::Active => "cyan",
            MeterHealth::Watch => "blue",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            MeterHealth::NoData => "No readings submitted yet",
            MeterHealth::Dormant => "Last reading is over two months old",
            MeterHealth::Anomaly => "Recent usage jumped well above its trend",
            MeterHealth::Nominal => "Usage is steady across recent readings",
            MeterHealth::Active => "Frequent readings in the last month",
            MeterHealth::Watch => "Too little recent data to call it steady",
        }
    }
}

/// All readings for the active property, held newest first.
///
/// The derived numbers here are advisory only; billing figures always come
/// from the analytics endpoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadingHistory {
    readings: Vec<Reading>,
}

impl ReadingHistory {
    pub fn new(mut readings: Vec<Reading>) -> Self {
        readings.sort_by(|a, b| {
            b.reading_date
                .cmp(&a.reading_date)
                .then_with(|| b.id.cmp(&a.id))
        });
        Self { readings }
    }

    pub fn all(&self) -> &[Reading] {
        &self.readings
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// The `n` most recent readings across all meters.
    pub fn latest(&self, n: usize) -> &[Reading] {
        &self.readings[..self.readings.len().min(n)]
    }

    /// Readings for one meter, newest first.
    pub fn for_meter(&self, meter: Id) -> Vec<&Reading> {
        self.readings.iter().filter(|r| r.meter == meter).collect()
    }

    /// Chronological values feeding the estimator sparkline, capped to the
    /// same window the estimator itself looks at.
    pub fn estimate_series(&self, meter: Id) -> Vec<f64> {
        let mut values: Vec<f64> = self
            .for_meter(meter)
            .iter()
            .rev()
            .map(|r| r.value)
            .collect();
        let keep_from = values.len().saturating_sub(ESTIMATE_WINDOW);
        values.drain(..keep_from);
        values
    }

    /// Average daily consumption and a projected monthly cost for `meter`.
    ///
    /// Needs at least two readings. Daily usage is the mean of per-day deltas
    /// over the last ten readings; cost applies the average charge per unit
    /// observed on priced readings, falling back to raw units when the
    /// backend has not priced anything yet.
    pub fn estimate_for(&self, meter: Id) -> Option<UsageEstimate> {
        let newest_first = self.for_meter(meter);
        let mut ordered: Vec<&Reading> =
            newest_first.iter().rev().copied().collect();
        let keep_from = ordered.len().saturating_sub(ESTIMATE_WINDOW);
        ordered.drain(..keep_from);
        if ordered.len() < 2 {
            return None;
        }

        let deltas: Vec<f64> = ordered
            .windows(2)
            .map(|pair| {
                let days = (pair[1].reading_date - pair[0].reading_date).num_days().max(1);
                (pair[1].value - pair[0].value) / days as f64
            })
            .collect();
        let daily_units = deltas.iter().sum::<f64>() / deltas.len() as f64;

        let rates: Vec<f64> = newest_first
            .iter()
            .filter(|r| r.amount_value.is_some_and(|amount| amount != 0.0))
            .take(RATE_SAMPLES)
            .filter_map(|r| r.amount_value.map(|amount| amount / r.value.max(1.0)))
            .collect();
        let unit_rate = if rates.is_empty() {
            0.0
        } else {
            rates.iter().sum::<f64>() / rates.len() as f64
        };
        let multiplier = if unit_rate == 0.0 { 1.0 } else { unit_rate };

        Some(UsageEstimate {
            daily_units: daily_units.max(0.0),
            monthly_cost: (daily_units * 30.0 * multiplier).max(0.0),
        })
    }

    /// Classifies `meter` by its reading cadence and recent deltas.
    ///
    /// Checks run in priority order: missing data, then staleness, then a
    /// spike in consecutive deltas, then stability, then cadence.
    pub fn health_for(&self, meter: Id, today: NaiveDate) -> MeterHealth {
        let readings = self.for_meter(meter);
        let Some(newest) = readings.first() else {
            return MeterHealth::NoData;
        };
        if (today - newest.reading_date).num_days() > DORMANT_AFTER_DAYS {
            return MeterHealth::Dormant;
        }

        let deltas: Vec<f64> = readings
            .iter()
            .take(HEALTH_WINDOW)
            .collect::<Vec<_>>()
            .windows(2)
            .map(|pair| pair[0].value - pair[1].value)
            .collect();
        if deltas
            .windows(2)
            .any(|pair| pair[1] > pair[0] * SPIKE_FACTOR)
        {
            return MeterHealth::Anomaly;
        }
        let denom = deltas.len().max(1) as f64;
        let mean = deltas.iter().sum::<f64>() / denom;
        let variance = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / denom;
        if variance < 1.0 && deltas.len() >= 3 {
            return MeterHealth::Nominal;
        }

        let recent = readings
            .iter()
            .filter(|r| (today - r.reading_date).num_days() <= 30)
            .count();
        if recent >= 4 {
            MeterHealth::Active
        } else {
            MeterHealth::Watch
        }
    }
}
