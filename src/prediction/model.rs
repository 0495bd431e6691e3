use std::fmt;

use serde::Deserialize;

use super::assembler::FeatureVector;
use super::error::{DashboardError, Result};

// ---------------------------------------------------------------------------
// Model – anything that maps one feature row to a number
// ---------------------------------------------------------------------------

/// A trained regression model.
///
/// Implementations must be pure: the same vector always yields the same value.
pub trait Model: fmt::Debug {
    /// Display name (e.g. the artifact stem).
    fn name(&self) -> &str;

    /// Number of inputs the model was fitted on.
    fn n_features(&self) -> usize;

    /// Column names seen during fitting, when the artifact recorded them.
    fn feature_names(&self) -> Option<&[String]> {
        None
    }

    /// One-line summary for status displays.
    fn describe(&self) -> String {
        format!("{} ({} inputs)", self.name(), self.n_features())
    }

    fn predict(&self, vector: &FeatureVector) -> Result<f64>;
}

// ---------------------------------------------------------------------------
// LinearModel – ordinary least squares and ridge share the same inference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinearKind {
    Linear,
    Ridge,
}

impl fmt::Display for LinearKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinearKind::Linear => f.write_str("linear"),
            LinearKind::Ridge => f.write_str("ridge"),
        }
    }
}

/// On-disk model artifact.
///
/// ```json
/// {
///   "kind": "ridge",
///   "coefficients": [0.01, 0.002, ...],
///   "intercept": -3.2,
///   "feature_names": ["Global_reactive_power", ...],
///   "alpha": 1.0
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LinearArtifact {
    pub kind: LinearKind,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    /// Regularisation strength; informational only at inference time.
    #[serde(default)]
    pub alpha: Option<f64>,
}

/// `y = intercept + Σ coefficient_i · x_i`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    name: String,
    kind: LinearKind,
    coefficients: Vec<f64>,
    intercept: f64,
    feature_names: Option<Vec<String>>,
    alpha: Option<f64>,
}

impl LinearModel {
    pub fn new(
        name: impl Into<String>,
        kind: LinearKind,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            coefficients,
            intercept,
            feature_names: None,
            alpha: None,
        }
    }

    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    pub(crate) fn from_artifact(name: impl Into<String>, artifact: LinearArtifact) -> Result<Self> {
        let name = name.into();
        if artifact.coefficients.is_empty() {
            return Err(DashboardError::ResourceLoad(format!(
                "model '{name}' has no coefficients"
            )));
        }
        if let Some(names) = &artifact.feature_names {
            if names.len() != artifact.coefficients.len() {
                return Err(DashboardError::ResourceLoad(format!(
                    "model '{name}' lists {} feature names for {} coefficients",
                    names.len(),
                    artifact.coefficients.len()
                )));
            }
        }
        let non_finite = !artifact.intercept.is_finite()
            || artifact.coefficients.iter().any(|c| !c.is_finite());
        if non_finite {
            return Err(DashboardError::ResourceLoad(format!(
                "model '{name}' contains non-finite parameters"
            )));
        }

        let mut model = Self::new(
            name,
            artifact.kind,
            artifact.coefficients,
            artifact.intercept,
        );
        if let Some(names) = artifact.feature_names {
            model = model.with_feature_names(names);
        }
        model.alpha = artifact.alpha;
        Ok(model)
    }

    pub fn kind(&self) -> LinearKind {
        self.kind
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    fn reject(&self, reason: String) -> DashboardError {
        DashboardError::Prediction {
            model: self.name.clone(),
            reason,
        }
    }
}

impl Model for LinearModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }

    fn describe(&self) -> String {
        match self.alpha() {
            Some(alpha) => format!("{}: {}, alpha={alpha}", self.name, self.kind()),
            None => format!("{}: {}", self.name, self.kind()),
        }
    }

    fn predict(&self, vector: &FeatureVector) -> Result<f64> {
        if vector.len() != self.coefficients.len() {
            return Err(self.reject(format!(
                "X has {} features, but the model is expecting {} features as input",
                vector.len(),
                self.coefficients.len()
            )));
        }
        if let Some(expected) = &self.feature_names {
            if expected.as_slice() != vector.columns() {
                return Err(self.reject(
                    "feature names must match those passed during fit, in the same order"
                        .to_string(),
                ));
            }
        }
        if let Some((col, _)) = vector.iter().find(|(_, v)| !v.is_finite()) {
            return Err(self.reject(format!(
                "input contains a non-finite value in '{col}'"
            )));
        }

        let y = self.intercept
            + self
                .coefficients
                .iter()
                .zip(vector.values())
                .map(|(c, x)| c * x)
                .sum::<f64>();

        if !y.is_finite() {
            return Err(self.reject("prediction is not finite".to_string()));
        }
        Ok(y)
    }
}
