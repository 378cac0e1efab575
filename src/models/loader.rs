use std::sync::Arc;
use tracing::{info, warn};

use super::config::ModelConfig;
use super::error::ModelError;
use super::pipeline::{ModelTask, TextClassifier};

/// Classifier handles produced by [`load_models`].
///
/// Each handle is independent: one model failing leaves the other usable.
#[derive(Clone, Default)]
pub struct LoadedModels {
    pub toxicity: Option<Arc<dyn TextClassifier>>,
    pub sentiment: Option<Arc<dyn TextClassifier>>,
}

impl std::fmt::Debug for LoadedModels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModels")
            .field("toxicity", &self.toxicity.as_ref().map(|m| m.model_id()))
            .field("sentiment", &self.sentiment.as_ref().map(|m| m.model_id()))
            .finish()
    }
}

impl LoadedModels {
    /// No models: the service runs lexicon-only.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(
        toxicity: Option<Arc<dyn TextClassifier>>,
        sentiment: Option<Arc<dyn TextClassifier>>,
    ) -> Self {
        Self {
            toxicity,
            sentiment,
        }
    }

    /// `true` iff at least one classifier is available.
    pub fn models_loaded(&self) -> bool {
        self.toxicity.is_some() || self.sentiment.is_some()
    }

    pub fn get(&self, task: ModelTask) -> Option<&Arc<dyn TextClassifier>> {
        match task {
            ModelTask::Toxicity => self.toxicity.as_ref(),
            ModelTask::Sentiment => self.sentiment.as_ref(),
        }
    }
}

/// Best-effort load of both classifiers. Never fails; every problem is logged and leaves the
/// corresponding handle unset.
pub fn load_models(config: &ModelConfig) -> LoadedModels {
    if !config.enabled {
        info!("ML classifiers disabled by configuration, running lexicon-only");
        return LoadedModels::none();
    }

    if let Err(reason) = config.validate() {
        warn!(reason = %reason, "Invalid model configuration, running lexicon-only");
        return LoadedModels::none();
    }

    let toxicity = load_one(ModelTask::Toxicity, config);
    let sentiment = load_one(ModelTask::Sentiment, config);
    let models = LoadedModels::new(toxicity, sentiment);

    if models.models_loaded() {
        info!(
            toxicity = models.toxicity.is_some(),
            sentiment = models.sentiment.is_some(),
            "ML classifiers initialized"
        );
    } else {
        warn!("No ML classifier could be loaded, running lexicon-only");
    }

    models
}

fn load_one(task: ModelTask, config: &ModelConfig) -> Option<Arc<dyn TextClassifier>> {
    let source = config.source(task);
    match try_load(task, config) {
        Ok(model) => Some(model),
        Err(ModelError::ToolkitUnavailable { reason }) => {
            warn!(task = %task, model_id = %source.model_id, reason = %reason, "ML toolkit unavailable");
            None
        }
        Err(e) => {
            warn!(task = %task, model_id = %source.model_id, error = %e, "Failed to load classifier");
            None
        }
    }
}

#[cfg(feature = "ml")]
fn try_load(task: ModelTask, config: &ModelConfig) -> Result<Arc<dyn TextClassifier>, ModelError> {
    use super::classifier::SequenceClassifier;
    use super::hub::resolve_model_dir;

    let source = config.source(task);
    let model_dir = resolve_model_dir(source, config)?;
    let model = SequenceClassifier::load(&source.model_id, &model_dir, config.max_seq_len)?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "ml"))]
fn try_load(_task: ModelTask, _config: &ModelConfig) -> Result<Arc<dyn TextClassifier>, ModelError> {
    Err(ModelError::ToolkitUnavailable {
        reason: "built without the `ml` feature".to_string(),
    })
}
