use crate::scoring::ClassifierOutput;

use super::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which signal a classifier provides.
pub enum ModelTask {
    Toxicity,
    Sentiment,
}

impl ModelTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTask::Toxicity => "toxicity",
            ModelTask::Sentiment => "sentiment",
        }
    }
}

impl std::fmt::Display for ModelTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded text-classification pipeline.
///
/// Implementations may return a single record or a list of records; callers normalize through
/// [`ClassifierOutput`].
pub trait TextClassifier: Send + Sync {
    /// Identifier of the underlying model (e.g. `unitary/toxic-bert`).
    fn model_id(&self) -> &str;

    fn classify(&self, text: &str) -> Result<ClassifierOutput, ModelError>;
}
