use thiserror::Error;

use crate::models::ModelError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("no ML models loaded")]
    NoModelsLoaded,

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}
