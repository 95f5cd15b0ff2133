//! ADCP Deployment Predictor CLI
//!
//! Loads a what-if scenario (JSON, partial inputs allowed), applies an optional subsystem
//! preset and command-line overrides, and reports the predicted power, battery count,
//! range, velocity precision and storage.
//!
//! Order of precedence, lowest first:
//!
//! ```text
//! defaults ─► scenario file ─► --subsystem preset ─► individual flags
//! ```

use adcp_prediction::PredictionError;
use thiserror::Error;

pub mod overrides;
pub mod render;
pub mod scenario;

pub use overrides::Overrides;
pub use render::{render_text, PredictionEnvelope, Summary};
pub use scenario::load_scenario;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
