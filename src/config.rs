//! Dashboard configuration
//!
//! One core serves both dashboard variants. A variant is a preset of this
//! struct; a JSON file can pick a preset and override any top-level key.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::prediction::inputs::HiddenDefaults;
use crate::prediction::loader::{ArtifactSet, ModelSpec};

/// Path to a JSON config file.
pub const CONFIG_ENV: &str = "ENERGY_DASHBOARD_CONFIG";

/// Overrides the artifacts directory from any config source.
pub const ARTIFACTS_ENV: &str = "ENERGY_DASHBOARD_ARTIFACTS";

/// Where the inputs are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Inputs in a side panel, predictions in the central panel.
    Sidebar,
    /// Three-column input card above the predictions.
    Form,
}

/// A numeric form field: bounds, initial value and drag step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub min: f64,
    pub max: f64,
    pub value: f64,
    pub step: f64,
}

impl FieldSpec {
    pub const fn new(min: f64, max: f64, value: f64, step: f64) -> Self {
        Self {
            min,
            max,
            value,
            step,
        }
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}

/// Initial values and bounds for every input widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSpec {
    pub voltage: FieldSpec,
    pub global_intensity: FieldSpec,
    pub sub_metering: [FieldSpec; 3],
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
}

impl Default for FormSpec {
    fn default() -> Self {
        Self {
            voltage: FieldSpec::new(220.0, 255.0, 240.0, 0.1),
            global_intensity: FieldSpec::new(0.0, 20.0, 4.63, 0.01),
            sub_metering: [
                FieldSpec::new(0.0, 50.0, 1.12, 0.01),
                FieldSpec::new(0.0, 50.0, 1.30, 0.01),
                FieldSpec::new(0.0, 50.0, 6.46, 0.01),
            ],
            date: NaiveDate::from_ymd_opt(2024, 11, 28).unwrap_or_default(),
            hour: 12,
            minute: 0,
        }
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub layout: Layout,

    /// Directory holding the schema and model artifacts
    pub artifacts_dir: PathBuf,

    /// Feature-name list file, relative to `artifacts_dir`
    pub schema_file: String,

    /// Models to query, in display order
    pub models: Vec<ModelSpec>,

    /// Show the holiday / daylight selectors
    pub expose_selectors: bool,

    /// Values for fields the form does not expose
    pub hidden_defaults: HiddenDefaults,

    pub form: FormSpec,

    /// Initial background theme name
    pub theme: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::sidebar()
    }
}

impl DashboardConfig {
    /// Side-panel inputs, fixed holiday/daylight, linear and ridge models.
    pub fn sidebar() -> Self {
        Self {
            layout: Layout::Sidebar,
            artifacts_dir: PathBuf::from("artifacts"),
            schema_file: "feature_names.json".to_string(),
            models: vec![
                ModelSpec::new("Linear Regression", "linear_model.json"),
                ModelSpec::new("Ridge Regression", "ridge_model.json"),
            ],
            expose_selectors: false,
            hidden_defaults: HiddenDefaults::default(),
            form: FormSpec::default(),
            theme: "Grey".to_string(),
        }
    }

    /// Three-column form with holiday/daylight selectors, linear model only.
    pub fn form() -> Self {
        let mut form = FormSpec::default();
        for field in [&mut form.voltage, &mut form.global_intensity]
            .into_iter()
            .chain(form.sub_metering.iter_mut())
        {
            field.step = 0.1;
        }
        Self {
            layout: Layout::Form,
            models: vec![ModelSpec::new("Linear Regression", "linear_model.json")],
            expose_selectors: true,
            form,
            theme: "Light Blue".to_string(),
            ..Self::sidebar()
        }
    }

    pub fn preset(name: &str) -> Result<Self> {
        match name {
            "sidebar" => Ok(Self::sidebar()),
            "form" => Ok(Self::form()),
            other => bail!("Unknown preset '{other}' (expected 'sidebar' or 'form')"),
        }
    }

    /// Build from a JSON document: `preset` picks the base, other top-level
    /// keys replace the preset's values.
    pub fn from_json(text: &str) -> Result<Self> {
        let overrides: JsonValue = serde_json::from_str(text).context("parsing config JSON")?;
        let JsonValue::Object(overrides) = overrides else {
            bail!("Expected a top-level JSON object");
        };

        let preset = match overrides.get("preset") {
            Some(JsonValue::String(name)) => name.as_str(),
            Some(other) => bail!("'preset' must be a string, got {other}"),
            None => "sidebar",
        };

        let mut merged = serde_json::to_value(Self::preset(preset)?)?;
        if let JsonValue::Object(base) = &mut merged {
            for (key, value) in overrides {
                if key != "preset" {
                    base.insert(key, value);
                }
            }
        }
        serde_json::from_value(merged).context("invalid dashboard config")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Load configuration from the environment and an optional config file
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(dir) = std::env::var_os(ARTIFACTS_ENV) {
            config.artifacts_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn artifact_set(&self) -> ArtifactSet {
        ArtifactSet {
            dir: self.artifacts_dir.clone(),
            schema_file: self.schema_file.clone(),
            models: self.models.clone(),
        }
    }
}
