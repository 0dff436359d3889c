use super::{Id, error::AppError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Utility resources a meter can measure. Wire values are the backend's
/// snake_case codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    Electricity,
    ColdWater,
    HotWater,
    Gas,
    Heating,
}

impl ResourceType {
    /// Returns the snake_case code used in API payloads and query strings.
    pub fn code(&self) -> &'static str {
        match self {
            ResourceType::Electricity => "electricity",
            ResourceType::ColdWater => "cold_water",
            ResourceType::HotWater => "hot_water",
            ResourceType::Gas => "gas",
            ResourceType::Heating => "heating",
        }
    }

    /// Returns a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Electricity => "Electricity",
            ResourceType::ColdWater => "Cold water",
            ResourceType::HotWater => "Hot water",
            ResourceType::Gas => "Gas",
            ResourceType::Heating => "Heating",
        }
    }

    /// Measurement unit used when the meter form leaves the field blank.
    pub fn default_unit(&self) -> &'static str {
        match self {
            ResourceType::Electricity => "kWh",
            ResourceType::ColdWater | ResourceType::HotWater | ResourceType::Gas => "m³",
            ResourceType::Heating => "Gcal",
        }
    }

    /// Returns CSS class name for color coding resource chips.
    pub fn css_class(&self) -> &'static str {
        match self {
            ResourceType::Electricity => "resource-electricity",
            ResourceType::ColdWater => "resource-cold-water",
            ResourceType::HotWater => "resource-hot-water",
            ResourceType::Gas => "resource-gas",
            ResourceType::Heating => "resource-heating",
        }
    }

    /// All resource types, in form/display order.
    pub fn all() -> &'static [ResourceType] {
        &[
            ResourceType::Electricity,
            ResourceType::ColdWater,
            ResourceType::HotWater,
            ResourceType::Gas,
            ResourceType::Heating,
        ]
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ResourceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "electricity" => Ok(ResourceType::Electricity),
            "cold_water" => Ok(ResourceType::ColdWater),
            "hot_water" => Ok(ResourceType::HotWater),
            "gas" => Ok(ResourceType::Gas),
            "heating" => Ok(ResourceType::Heating),
            _ => Err(AppError::DataError(format!("Unknown resource type: {s}"))),
        }
    }
}

/// A metering device attached to a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meter {
    pub id: Id,
    pub property: Id,
    pub resource_type: ResourceType,
    pub unit: String,
    pub serial_number: String,
    #[serde(default)]
    pub installed_at: Option<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl Meter {
    /// Short identification line shown in selects and tables.
    pub fn label(&self) -> String {
        if self.serial_number.is_empty() {
            format!("{} · #{}", self.resource_type.label(), self.id)
        } else {
            format!("{} · {}", self.resource_type.label(), self.serial_number)
        }
    }
}

/// Payload for creating a meter. Construction enforces the form invariants:
/// a non-empty serial number, and the resource's default unit when the unit
/// field is left blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMeter {
    pub property: Id,
    pub resource_type: ResourceType,
    pub unit: String,
    pub serial_number: String,
}

impl NewMeter {
    pub fn new(
        property: Id,
        resource_type: ResourceType,
        unit: &str,
        serial_number: &str,
    ) -> Result<Self, AppError> {
        let serial_number = serial_number.trim();
        if serial_number.is_empty() {
            return Err(AppError::Validation("Serial number is required".to_string()));
        }

        let unit = unit.trim();
        let unit = if unit.is_empty() {
            resource_type.default_unit().to_string()
        } else {
            unit.to_string()
        };

        Ok(Self {
            property,
            resource_type,
            unit,
            serial_number: serial_number.to_string(),
        })
    }
}
