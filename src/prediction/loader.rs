use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use super::error::{DashboardError, Result};
use super::model::{LinearArtifact, LinearModel, Model};
use super::schema::{FeatureSchema, SchemaArtifact};

// ---------------------------------------------------------------------------
// Artifact locations
// ---------------------------------------------------------------------------

/// One model to load and query, with the label shown next to its prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub label: String,
    pub file: String,
}

impl ModelSpec {
    pub fn new(label: &str, file: &str) -> Self {
        Self {
            label: label.to_string(),
            file: file.to_string(),
        }
    }
}

/// Where the schema and model artifacts live.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    pub dir: PathBuf,
    pub schema_file: String,
    pub models: Vec<ModelSpec>,
}

impl ArtifactSet {
    pub fn schema_path(&self) -> PathBuf {
        self.dir.join(&self.schema_file)
    }

    pub fn model_path(&self, spec: &ModelSpec) -> PathBuf {
        self.dir.join(&spec.file)
    }
}

/// Everything read from disk: the column contract plus the models fitted on it.
#[derive(Debug)]
pub struct Resources {
    pub schema: FeatureSchema,
    pub models: Vec<(String, Box<dyn Model>)>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the feature schema and every configured model.
///
/// Any failure, including a model whose input width or fitted column names
/// disagree with the schema, comes back as [`DashboardError::ResourceLoad`].
pub fn load(artifacts: &ArtifactSet) -> Result<Resources> {
    if artifacts.models.is_empty() {
        return Err(DashboardError::ResourceLoad(
            "no models configured".to_string(),
        ));
    }

    let schema = load_schema(&artifacts.schema_path())?;

    let mut models: Vec<(String, Box<dyn Model>)> = Vec::with_capacity(artifacts.models.len());
    for spec in &artifacts.models {
        let model = load_model(&artifacts.model_path(spec))?;
        check_compatible(&schema, &model)?;
        log::debug!("Loaded {} as '{}'", model.describe(), spec.label);
        models.push((spec.label.clone(), Box::new(model)));
    }

    Ok(Resources { schema, models })
}

/// Load a feature schema from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `["Voltage", ...]` or `{ "name", "version", "columns" }`
/// * `.csv` / `.txt` – first record holds the column names
pub fn load_schema(path: &Path) -> Result<FeatureSchema> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("feature_names");

    let artifact = match ext.as_str() {
        "json" => read_schema_json(path),
        "csv" | "txt" => read_schema_csv(path),
        other => Err(anyhow::anyhow!("Unsupported schema extension: .{other}")),
    }
    .with_context(|| format!("loading feature names from {}", path.display()))
    .map_err(DashboardError::resource_load)?;

    artifact.into_schema(stem)
}

/// Load one linear/ridge model artifact.
pub fn load_model(path: &Path) -> Result<LinearModel> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("model")
        .to_string();

    let artifact = read_model_json(path)
        .with_context(|| format!("loading model from {}", path.display()))
        .map_err(DashboardError::resource_load)?;

    LinearModel::from_artifact(name, artifact)
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

fn read_schema_json(path: &Path) -> anyhow::Result<SchemaArtifact> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing feature-name list")
}

fn read_schema_csv(path: &Path) -> anyhow::Result<SchemaArtifact> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let record = match reader.records().next() {
        Some(r) => r.context("reading first CSV record")?,
        None => bail!("file is empty"),
    };

    Ok(SchemaArtifact::Columns(
        record.iter().map(|c| c.to_string()).collect(),
    ))
}

fn read_model_json(path: &Path) -> anyhow::Result<LinearArtifact> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    serde_json::from_str(&text).context("parsing model artifact")
}

// ---------------------------------------------------------------------------
// Cross-artifact checks
// ---------------------------------------------------------------------------

fn check_compatible(schema: &FeatureSchema, model: &dyn Model) -> Result<()> {
    if model.n_features() != schema.len() {
        return Err(DashboardError::ResourceLoad(format!(
            "model '{}' expects {} features but schema {} has {}",
            model.name(),
            model.n_features(),
            schema,
            schema.len()
        )));
    }
    if let Some(names) = model.feature_names() {
        if names != schema.columns() {
            return Err(DashboardError::ResourceLoad(format!(
                "model '{}' was fitted on a different column order than schema {}",
                model.name(),
                schema
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const SCHEMA: &str = r#"["Global_reactive_power", "Voltage", "Global_intensity",
        "Sub_metering_1", "Sub_metering_2", "Sub_metering_3", "Year", "Month", "Day",
        "Hour", "Minute", "Is_holiday", "Light", "Weekday"]"#;

    fn model_json(kind: &str, n: usize) -> String {
        let coefs: Vec<String> = (0..n).map(|i| format!("{}.0", i)).collect();
        format!(
            r#"{{"kind": "{kind}", "coefficients": [{}], "intercept": 0.5}}"#,
            coefs.join(", ")
        )
    }

    fn artifact_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("feature_names.json"), SCHEMA).unwrap();
        let linear = model_json("linear", 14);
        let ridge = model_json("ridge", 14);
        fs::write(dir.path().join("linear_model.json"), linear).unwrap();
        fs::write(dir.path().join("ridge_model.json"), ridge).unwrap();
        dir
    }

    fn set(dir: &Path, models: &[(&str, &str)]) -> ArtifactSet {
        ArtifactSet {
            dir: dir.to_path_buf(),
            schema_file: "feature_names.json".to_string(),
            models: models.iter().map(|(l, f)| ModelSpec::new(l, f)).collect(),
        }
    }

    #[test]
    fn loads_schema_and_models() {
        let dir = artifact_dir();
        let linear = ("Linear", "linear_model.json");
        let ridge = ("Ridge", "ridge_model.json");
        let res = load(&set(dir.path(), &[linear, ridge])).unwrap();
        assert_eq!(res.schema.len(), 14);
        assert_eq!(res.schema.name(), "feature_names");
        assert_eq!(res.models.len(), 2);
        assert_eq!(res.models[1].0, "Ridge");
        assert_eq!(res.models[1].1.name(), "ridge_model");
    }

    #[test]
    fn missing_model_file_is_a_load_error() {
        let dir = artifact_dir();
        let err = load(&set(dir.path(), &[("Linear", "absent.json")])).unwrap_err();
        match err {
            DashboardError::ResourceLoad(msg) => {
                assert!(msg.contains("absent.json"), "{msg}");
                assert!(msg.contains("reading JSON file"), "{msg}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn corrupt_schema_is_a_load_error() {
        let dir = artifact_dir();
        fs::write(dir.path().join("feature_names.json"), "{not json").unwrap();
        let err = load(&set(dir.path(), &[("Linear", "linear_model.json")])).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ResourceLoad(msg) if msg.contains("parsing")
        ));
    }

    #[test]
    fn stale_model_width_is_caught_at_load() {
        let dir = artifact_dir();
        let stale = model_json("linear", 13);
        fs::write(dir.path().join("linear_model.json"), stale).unwrap();
        let err = load(&set(dir.path(), &[("Linear", "linear_model.json")])).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ResourceLoad(msg) if msg.contains("expects 13")
        ));
    }

    #[test]
    fn fitted_column_order_is_checked_at_load() {
        let dir = TempDir::new().unwrap();
        let schema = r#"["Voltage", "Hour"]"#;
        fs::write(dir.path().join("feature_names.json"), schema).unwrap();
        fs::write(
            dir.path().join("m.json"),
            r#"{"kind": "linear", "coefficients": [1.0, 2.0], "intercept": 0.0,
                "feature_names": ["Hour", "Voltage"]}"#,
        )
        .unwrap();
        let err = load(&set(dir.path(), &[("M", "m.json")])).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ResourceLoad(msg) if msg.contains("column order")
        ));
    }

    #[test]
    fn no_models_configured() {
        let dir = artifact_dir();
        assert!(load(&set(dir.path(), &[])).is_err());
    }

    #[test]
    fn schema_from_csv_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("columns.csv");
        fs::write(&path, "Voltage, Hour ,Weekday\n").unwrap();
        let schema = load_schema(&path).unwrap();
        assert_eq!(schema.name(), "columns");
        let expected = ["Voltage", "Hour", "Weekday"].map(String::from);
        assert_eq!(schema.columns(), expected);
    }

    #[test]
    fn empty_csv_schema_is_a_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("columns.csv");
        fs::write(&path, "").unwrap();
        match load_schema(&path).unwrap_err() {
            DashboardError::ResourceLoad(msg) => {
                assert!(msg.contains("empty"), "{msg}");
                assert!(msg.contains("columns.csv"), "{msg}");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn unsupported_schema_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feature_names.pkl");
        fs::write(&path, b"\x80\x04").unwrap();
        let err = load_schema(&path).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::ResourceLoad(msg) if msg.contains(".pkl")
        ));
    }
}
