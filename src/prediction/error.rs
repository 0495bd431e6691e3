use thiserror::Error;

/// Every failure a prediction request can end in.
///
/// None of these are fatal: the UI renders them and waits for the next
/// request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    /// Artifacts are missing, unreadable or inconsistent with each other.
    #[error("Error loading resources: {0}")]
    ResourceLoad(String),

    /// The assembled fields cannot satisfy the loaded feature schema.
    #[error("Schema mismatch against '{schema}': missing {missing:?}")]
    SchemaMismatch { schema: String, missing: Vec<String> },

    /// A model rejected the vector it was given.
    #[error("Prediction error ({model}): {reason}")]
    Prediction { model: String, reason: String },

    #[error("Invalid choice for {field}: '{value}' (expected one of {expected:?})")]
    InvalidChoice {
        field: &'static str,
        value: String,
        expected: [&'static str; 2],
    },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}

impl DashboardError {
    /// Fold an `anyhow` context chain into a load error, keeping every layer.
    pub fn resource_load(err: anyhow::Error) -> Self {
        DashboardError::ResourceLoad(format!("{err:#}"))
    }
}

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
