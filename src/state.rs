use std::path::PathBuf;

use chrono::NaiveDate;

use crate::config::DashboardConfig;
use crate::prediction::error::Result;
use crate::prediction::inputs::{Daylight, Holiday, RawInputs};
use crate::prediction::loader;
use crate::prediction::predictor::{handle_request, Outcome, PredictionContext};
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Form state – what the widgets edit
// ---------------------------------------------------------------------------

/// Current widget values. Selectors are kept as the label strings the combo
/// boxes show and parsed on every request.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub voltage: f64,
    pub global_intensity: f64,
    pub sub_metering: [f64; 3],
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    pub holiday: String,
    pub daylight: String,
}

impl FormState {
    pub fn from_config(config: &DashboardConfig) -> Self {
        let spec = &config.form;
        Self {
            voltage: spec.voltage.value,
            global_intensity: spec.global_intensity.value,
            sub_metering: spec.sub_metering.map(|f| f.value),
            date: spec.date,
            hour: spec.hour,
            minute: spec.minute,
            holiday: Holiday::LABELS[0].to_string(),
            daylight: Daylight::LABELS[0].to_string(),
        }
    }

    /// Snapshot the widgets into a request. Selectors are only read when the
    /// layout exposes them.
    pub fn to_raw_inputs(&self, expose_selectors: bool) -> Result<RawInputs> {
        let (holiday, daylight) = if expose_selectors {
            (
                Some(self.holiday.parse::<Holiday>()?),
                Some(self.daylight.parse::<Daylight>()?),
            )
        } else {
            (None, None)
        };
        Ok(RawInputs {
            voltage: self.voltage,
            global_intensity: self.global_intensity,
            sub_metering: self.sub_metering,
            date: self.date,
            hour: self.hour,
            minute: self.minute,
            holiday,
            daylight,
        })
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Banner shown after each resource load attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loaded(String),
    Failed(String),
}

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded schema and models (None when loading failed).
    pub context: Option<PredictionContext>,

    pub load_status: LoadStatus,

    pub form: FormState,

    /// Result of the latest request.
    pub outcome: Option<Outcome>,

    /// Active background theme.
    pub theme: Theme,

    /// Form changed since `outcome` was computed.
    dirty: bool,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let form = FormState::from_config(&config);
        let theme = Theme::by_name(&config.theme);
        let mut state = Self {
            config,
            context: None,
            load_status: LoadStatus::Failed("Resources not loaded yet".to_string()),
            form,
            outcome: None,
            theme,
            dirty: true,
        };
        state.reload_resources();
        state
    }

    /// (Re)load artifacts from the configured directory.
    ///
    /// On failure the previous context is dropped so no stale model answers.
    pub fn reload_resources(&mut self) {
        let artifacts = self.config.artifact_set();
        match loader::load(&artifacts) {
            Ok(resources) => {
                log::info!(
                    "Loaded schema {} and {} model(s) from {}",
                    resources.schema,
                    resources.models.len(),
                    artifacts.dir.display()
                );
                let defaults = self.config.hidden_defaults;
                self.context = Some(PredictionContext::new(resources, defaults));
                self.load_status = LoadStatus::Loaded("Resources loaded successfully!".to_string());
            }
            Err(e) => {
                log::error!("{e}");
                self.context = None;
                self.load_status = LoadStatus::Failed(e.to_string());
            }
        }
        self.dirty = true;
    }

    /// Point the dashboard at another artifacts directory and reload.
    pub fn reload_from(&mut self, dir: PathBuf) {
        self.config.artifacts_dir = dir;
        self.reload_resources();
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Recompute the outcome if anything changed since the last request.
    pub fn refresh_prediction(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        let outcome = match self.form.to_raw_inputs(self.config.expose_selectors) {
            Ok(raw) => handle_request(self.context.as_ref(), &raw),
            Err(e) => Outcome::Failed(e),
        };
        self.outcome = Some(outcome);
    }

    pub fn set_theme(&mut self, name: &str) {
        self.theme = Theme::by_name(name);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::prediction::error::DashboardError;

    const SCHEMA: &str = r#"["Global_reactive_power", "Voltage", "Global_intensity",
        "Sub_metering_1", "Sub_metering_2", "Sub_metering_3", "Year", "Month", "Day",
        "Hour", "Minute", "Is_holiday", "Light", "Weekday"]"#;

    fn write_artifacts(dir: &std::path::Path) {
        fs::write(dir.join("feature_names.json"), SCHEMA).unwrap();
        // Only Global_intensity contributes, so the prediction equals it.
        let model = r#"{"kind": "linear", "coefficients":
            [0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0], "intercept": 0}"#;
        fs::write(dir.join("linear_model.json"), model).unwrap();
        let ridge = model.replace("linear", "ridge");
        fs::write(dir.join("ridge_model.json"), ridge).unwrap();
    }

    fn config_for(dir: &std::path::Path, base: DashboardConfig) -> DashboardConfig {
        DashboardConfig {
            artifacts_dir: dir.to_path_buf(),
            ..base
        }
    }

    #[test]
    fn failed_load_disables_predictions() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::new(config_for(dir.path(), DashboardConfig::sidebar()));
        assert!(state.context.is_none());
        assert!(matches!(state.load_status, LoadStatus::Failed(_)));

        for _ in 0..2 {
            state.mark_dirty();
            state.refresh_prediction();
            assert!(matches!(
                state.outcome,
                Some(Outcome::Failed(DashboardError::ResourceLoad(_)))
            ));
        }
    }

    #[test]
    fn reload_recovers_after_artifacts_appear() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::new(config_for(dir.path(), DashboardConfig::sidebar()));
        assert!(state.context.is_none());

        write_artifacts(dir.path());
        state.reload_resources();
        assert!(matches!(state.load_status, LoadStatus::Loaded(_)));

        state.refresh_prediction();
        let Some(Outcome::Predicted(preds)) = &state.outcome else {
            panic!("expected predictions, got {:?}", state.outcome);
        };
        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0].display(), "4.63 kW");
    }

    #[test]
    fn reload_from_a_bad_directory_drops_the_context() {
        let dir = TempDir::new().unwrap();
        write_artifacts(dir.path());
        let mut state = AppState::new(config_for(dir.path(), DashboardConfig::form()));
        assert!(state.context.is_some());

        state.reload_from(dir.path().join("missing"));
        assert!(state.context.is_none());
    }

    #[test]
    fn form_variant_parses_selectors() {
        let dir = TempDir::new().unwrap();
        write_artifacts(dir.path());
        let mut state = AppState::new(config_for(dir.path(), DashboardConfig::form()));

        state.form.holiday = "Maybe".to_string();
        state.mark_dirty();
        state.refresh_prediction();
        assert!(matches!(
            state.outcome,
            Some(Outcome::Failed(DashboardError::InvalidChoice {
                field: "holiday",
                ..
            }))
        ));

        state.form.holiday = "Yes".to_string();
        state.mark_dirty();
        state.refresh_prediction();
        assert!(matches!(state.outcome, Some(Outcome::Predicted(_))));
    }

    #[test]
    fn sidebar_variant_ignores_selector_strings() {
        let form = FormState {
            holiday: "garbage".to_string(),
            ..FormState::from_config(&DashboardConfig::sidebar())
        };
        let raw = form.to_raw_inputs(false).unwrap();
        assert_eq!(raw.holiday, None);
        assert_eq!(raw.daylight, None);
        assert!(form.to_raw_inputs(true).is_err());
    }

    #[test]
    fn refresh_is_skipped_when_clean() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::new(config_for(dir.path(), DashboardConfig::sidebar()));
        state.refresh_prediction();
        state.outcome = None;
        state.refresh_prediction();
        assert!(state.outcome.is_none());
    }

    #[test]
    fn shipped_artifacts_load_for_both_presets() {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("artifacts");
        for base in [DashboardConfig::sidebar(), DashboardConfig::form()] {
            let expected = base.models.len();
            let mut state = AppState::new(config_for(&dir, base));
            assert!(matches!(state.load_status, LoadStatus::Loaded(_)));
            state.refresh_prediction();
            let Some(Outcome::Predicted(preds)) = &state.outcome else {
                panic!("expected predictions, got {:?}", state.outcome);
            };
            assert_eq!(preds.len(), expected);
            for pred in preds {
                let value = pred.result.as_ref().copied();
                assert!(value.is_ok_and(f64::is_finite), "{pred:?}");
            }
        }
    }
}
