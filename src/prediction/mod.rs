//! Prediction core: schema contract, feature assembly, models, loading.
//!
//! Architecture:
//! ```text
//!  feature_names.json   linear_model.json / ridge_model.json
//!        │                        │
//!        ▼                        ▼
//!   ┌──────────────────────────────────┐
//!   │  loader   │  parse + cross-check  │ → PredictionContext (read-only)
//!   └──────────────────────────────────┘
//!        │
//!  RawInputs ──▶ ┌───────────┐
//!                │ assembler │  calendar fields, defaults, schema order
//!                └───────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ predictor │  query every model → Outcome
//!   └───────────┘
//! ```

pub mod assembler;
pub mod error;
pub mod inputs;
pub mod loader;
pub mod model;
pub mod predictor;
pub mod schema;
