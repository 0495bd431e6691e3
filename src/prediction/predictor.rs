use super::assembler::{assemble, FeatureVector};
use super::error::{DashboardError, Result};
use super::inputs::{HiddenDefaults, RawInputs};
use super::loader::Resources;
use super::model::Model;
use super::schema::FeatureSchema;

/// Unit label attached to every prediction.
pub const UNIT: &str = "kW";

/// Notice rendered after every prediction attempt, successful or not.
pub const DISCLAIMER: [&str; 3] = [
    "This tool provides energy consumption predictions based on historical data.",
    "It is intended for informational purposes only.",
    "For critical energy planning, consult a certified energy expert.",
];

// ---------------------------------------------------------------------------
// PredictionContext – loaded once, read-only afterwards
// ---------------------------------------------------------------------------

/// The schema, the models fitted on it and the defaults for hidden fields.
///
/// Built once from [`Resources`] and only ever borrowed immutably.
#[derive(Debug)]
pub struct PredictionContext {
    schema: FeatureSchema,
    models: Vec<(String, Box<dyn Model>)>,
    defaults: HiddenDefaults,
}

impl PredictionContext {
    pub fn new(resources: Resources, defaults: HiddenDefaults) -> Self {
        Self {
            schema: resources.schema,
            models: resources.models,
            defaults,
        }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn defaults(&self) -> &HiddenDefaults {
        &self.defaults
    }

    /// Model labels in query order.
    pub fn model_labels(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|(label, _)| label.as_str())
    }

    /// Status line naming the schema, its version and the loaded models.
    pub fn summary(&self) -> String {
        let labels: Vec<&str> = self.model_labels().collect();
        format!(
            "Schema {} v{}  |  {}",
            self.schema.name(),
            self.schema.version(),
            labels.join(", ")
        )
    }

    pub fn model_descriptions(&self) -> Vec<String> {
        self.models
            .iter()
            .map(|(label, model)| format!("{label} ← {}", model.describe()))
            .collect()
    }

    pub fn assemble(&self, raw: &RawInputs) -> Result<FeatureVector> {
        assemble(raw, &self.schema, &self.defaults)
    }

    /// Assemble once, then query every model independently.
    ///
    /// A model failure is recorded against that model only; the others still
    /// run.
    pub fn run(&self, raw: &RawInputs) -> Result<Vec<ModelPrediction>> {
        let vector = self.assemble(raw)?;
        log::debug!(
            "Assembled vector for {}: {:?}",
            self.schema,
            vector.iter().collect::<Vec<_>>()
        );

        Ok(self
            .models
            .iter()
            .map(|(label, model)| {
                let result = predict(model.as_ref(), &vector);
                if let Err(e) = &result {
                    log::warn!("{label}: {e}");
                }
                ModelPrediction {
                    label: label.clone(),
                    result,
                }
            })
            .collect())
    }
}

/// Invoke one model on one row.
pub fn predict(model: &dyn Model, vector: &FeatureVector) -> Result<f64> {
    model.predict(vector)
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ModelPrediction {
    pub label: String,
    pub result: Result<f64>,
}

impl ModelPrediction {
    /// `"12.34 kW"` on success, the error message otherwise.
    pub fn display(&self) -> String {
        match &self.result {
            Ok(v) => format_prediction(*v),
            Err(e) => e.to_string(),
        }
    }
}

pub fn format_prediction(value: f64) -> String {
    format!("{value:.2} {UNIT}")
}

/// Terminal state of one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// At least the vector was assembled; each model reports on its own.
    Predicted(Vec<ModelPrediction>),
    /// The request stopped before any model was queried.
    Failed(DashboardError),
}

/// Run a request against whatever context is available.
///
/// Without a context (resources failed to load) the request short-circuits to
/// [`Outcome::Failed`] and no model is touched.
pub fn handle_request(context: Option<&PredictionContext>, raw: &RawInputs) -> Outcome {
    let Some(ctx) = context else {
        return Outcome::Failed(DashboardError::ResourceLoad(
            "resources are not loaded; predictions are disabled".to_string(),
        ));
    };
    match ctx.run(raw) {
        Ok(predictions) => Outcome::Predicted(predictions),
        Err(e) => {
            log::warn!("Request failed: {e}");
            Outcome::Failed(e)
        }
    }
}
