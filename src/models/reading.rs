use super::{Id, error::AppError, meter::ResourceType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Nested meter summary the readings endpoint embeds for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeterDetail {
    pub resource_type: ResourceType,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub unit: String,
}

/// A timestamped value recorded against a meter.
///
/// The backend serializes decimal columns as JSON strings (`"15.500"`), so
/// `value` and `amount_value` accept either a number or a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reading {
    pub id: Id,
    pub meter: Id,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub value: f64,
    pub reading_date: NaiveDate,
    #[serde(default, deserialize_with = "deserialize_opt_decimal")]
    pub amount_value: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub meter_detail: Option<MeterDetail>,
}

impl Reading {
    /// Meter line for the journal: resource label plus serial number, unit
    /// appended when known.
    pub fn meter_label(&self) -> String {
        match &self.meter_detail {
            Some(detail) => {
                let serial = if detail.serial_number.is_empty() {
                    self.meter.to_string()
                } else {
                    detail.serial_number.clone()
                };
                if detail.unit.is_empty() {
                    format!("{} · {serial}", detail.resource_type.label())
                } else {
                    format!("{} · {serial} {}", detail.resource_type.label(), detail.unit)
                }
            }
            None => format!("Meter #{}", self.meter),
        }
    }

    /// Reading value with the meter's unit when the detail block carries one.
    pub fn value_with_unit(&self) -> String {
        let unit = self
            .meter_detail
            .as_ref()
            .map(|d| d.unit.as_str())
            .unwrap_or_default();
        if unit.is_empty() {
            format!("{}", self.value)
        } else {
            format!("{} {unit}", self.value)
        }
    }
}

/// Raw decimal as the backend sends it: a JSON number or a decimal string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Number(f64),
    Text(String),
}

impl RawDecimal {
    fn parse<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            RawDecimal::Number(n) => Ok(n),
            RawDecimal::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("Failed to parse decimal '{s}'"))),
        }
    }
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RawDecimal::deserialize(deserializer)?.parse()
}

fn deserialize_opt_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<RawDecimal>::deserialize(deserializer)?
        .map(RawDecimal::parse)
        .transpose()
}

/// Payload for recording a reading. Construction enforces the form
/// invariants: a finite value strictly greater than zero and a present date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReading {
    pub meter: Id,
    pub value: f64,
    pub reading_date: NaiveDate,
}

impl NewReading {
    pub fn new(meter: Id, value: f64, reading_date: NaiveDate) -> Result<Self, AppError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::Validation(
                "Enter a positive reading value".to_string(),
            ));
        }
        Ok(Self {
            meter,
            value,
            reading_date,
        })
    }

    /// Builds a payload from raw form input.
    pub fn parse(meter: Id, raw_value: &str, reading_date: NaiveDate) -> Result<Self, AppError> {
        let value = raw_value
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::Validation("Enter a positive reading value".to_string()))?;
        Self::new(meter, value, reading_date)
    }
}
