use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

use super::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Feature – the fields the assembler knows how to produce
// ---------------------------------------------------------------------------

/// One column the assembler can fill, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Feature {
    GlobalReactivePower,
    Voltage,
    GlobalIntensity,
    SubMetering1,
    SubMetering2,
    SubMetering3,
    Year,
    Month,
    Day,
    Hour,
    Minute,
    IsHoliday,
    Light,
    Weekday,
}

impl Feature {
    /// Canonical order, matching the column layout models were trained on.
    pub const ALL: [Feature; 14] = [
        Feature::GlobalReactivePower,
        Feature::Voltage,
        Feature::GlobalIntensity,
        Feature::SubMetering1,
        Feature::SubMetering2,
        Feature::SubMetering3,
        Feature::Year,
        Feature::Month,
        Feature::Day,
        Feature::Hour,
        Feature::Minute,
        Feature::IsHoliday,
        Feature::Light,
        Feature::Weekday,
    ];

    /// Column name as written in the feature-name artifact.
    pub fn name(self) -> &'static str {
        match self {
            Feature::GlobalReactivePower => "Global_reactive_power",
            Feature::Voltage => "Voltage",
            Feature::GlobalIntensity => "Global_intensity",
            Feature::SubMetering1 => "Sub_metering_1",
            Feature::SubMetering2 => "Sub_metering_2",
            Feature::SubMetering3 => "Sub_metering_3",
            Feature::Year => "Year",
            Feature::Month => "Month",
            Feature::Day => "Day",
            Feature::Hour => "Hour",
            Feature::Minute => "Minute",
            Feature::IsHoliday => "Is_holiday",
            Feature::Light => "Light",
            Feature::Weekday => "Weekday",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// FeatureSchema – named, versioned column contract
// ---------------------------------------------------------------------------

/// The ordered column list a set of models expects as input.
///
/// Loaded once and never mutated. Column names are unique and non-empty; both
/// are checked by [`FeatureSchema::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    name: String,
    version: u32,
    columns: Vec<String>,
}

/// On-disk shapes accepted for the schema artifact.
///
/// A bare array is what the training side dumps; the object form adds the
/// name and version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SchemaArtifact {
    Columns(Vec<String>),
    Named {
        name: String,
        #[serde(default = "default_version")]
        version: u32,
        columns: Vec<String>,
    },
}

fn default_version() -> u32 {
    1
}

impl SchemaArtifact {
    pub(crate) fn into_schema(self, fallback_name: &str) -> Result<FeatureSchema> {
        match self {
            SchemaArtifact::Columns(columns) => {
                FeatureSchema::new(fallback_name, default_version(), columns)
            }
            SchemaArtifact::Named {
                name,
                version,
                columns,
            } => FeatureSchema::new(name, version, columns),
        }
    }
}

impl FeatureSchema {
    pub fn new(name: impl Into<String>, version: u32, columns: Vec<String>) -> Result<Self> {
        let name = name.into();
        if columns.is_empty() {
            return Err(DashboardError::ResourceLoad(format!(
                "feature schema '{name}' has no columns"
            )));
        }
        let mut seen = BTreeSet::new();
        for col in &columns {
            if col.trim().is_empty() {
                return Err(DashboardError::ResourceLoad(format!(
                    "feature schema '{name}' contains an empty column name"
                )));
            }
            if !seen.insert(col.as_str()) {
                return Err(DashboardError::ResourceLoad(format!(
                    "feature schema '{name}' lists column '{col}' twice"
                )));
            }
        }
        Ok(Self {
            name,
            version,
            columns,
        })
    }

    /// Schema with every producible feature in canonical order.
    #[cfg(test)]
    pub fn canonical() -> Self {
        Self {
            name: "energy-consumption".to_string(),
            version: 1,
            columns: Feature::ALL.iter().map(|f| f.name().to_string()).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Columns no [`Feature`] can fill, in schema order.
    pub fn unknown_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| Feature::from_name(c).is_none())
            .cloned()
            .collect()
    }
}

impl fmt::Display for FeatureSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.columns.len();
        write!(f, "{} v{} ({n} columns)", self.name, self.version)
    }
}
