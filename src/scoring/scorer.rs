use std::sync::Arc;
use tracing::{debug, error};

use crate::constants::{TOXIC_LABEL_MARKERS, UNKNOWN_TOXIC_LABEL_THRESHOLD};
use crate::models::{LoadedModels, ModelTask, TextClassifier};

use super::error::ScoringError;
use super::types::MlSignals;

/// Source of ML signals for the verification service.
///
/// This is the capability boundary between the lexicon-only service and the classifier-backed
/// one: [`MlScorer`] runs whatever models loaded, [`NullScorer`] stands in when none did.
pub trait SignalScorer: Send + Sync {
    /// `true` if at least one classifier is available.
    fn models_loaded(&self) -> bool;

    /// Loaded classifiers as `(task, model id)` pairs.
    fn loaded_models(&self) -> Vec<(ModelTask, String)> {
        Vec::new()
    }

    fn score(&self, text: &str) -> Result<MlSignals, ScoringError>;
}

/// Scorer used when no classifier could be loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScorer;

impl SignalScorer for NullScorer {
    fn models_loaded(&self) -> bool {
        false
    }

    fn score(&self, _text: &str) -> Result<MlSignals, ScoringError> {
        Err(ScoringError::NoModelsLoaded)
    }
}

/// Scorer backed by the toxicity and sentiment classifiers.
///
/// A failure in either classifier is logged and treated as "no signal" from that model, so a
/// call only errors when there is nothing to run.
pub struct MlScorer {
    toxicity: Option<Arc<dyn TextClassifier>>,
    sentiment: Option<Arc<dyn TextClassifier>>,
}

impl std::fmt::Debug for MlScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlScorer")
            .field("toxicity", &self.toxicity.as_ref().map(|m| m.model_id()))
            .field("sentiment", &self.sentiment.as_ref().map(|m| m.model_id()))
            .finish()
    }
}

impl MlScorer {
    pub fn new(models: LoadedModels) -> Self {
        Self {
            toxicity: models.toxicity,
            sentiment: models.sentiment,
        }
    }

    pub fn has_toxicity(&self) -> bool {
        self.toxicity.is_some()
    }

    pub fn has_sentiment(&self) -> bool {
        self.sentiment.is_some()
    }

    fn apply_toxicity(&self, text: &str, signals: &mut MlSignals) {
        let Some(model) = &self.toxicity else {
            return;
        };

        let records = match model.classify(text) {
            Ok(output) => output.into_records(),
            Err(e) => {
                error!(model_id = model.model_id(), error = %e, "Toxicity inference failed");
                return;
            }
        };

        for record in records {
            let label = record.label.to_uppercase();
            let known = TOXIC_LABEL_MARKERS
                .iter()
                .any(|marker| label.contains(marker));

            if known {
                signals.record_toxic(label.clone(), record.score);
            }

            if record.score > UNKNOWN_TOXIC_LABEL_THRESHOLD
                && !signals.toxic_categories.contains(&label)
            {
                signals.record_toxic(label, record.score);
            }
        }
    }

    fn apply_sentiment(&self, text: &str, signals: &mut MlSignals) {
        let Some(model) = &self.sentiment else {
            return;
        };

        match model.classify(text) {
            Ok(output) => {
                if let Some(record) = output.into_first() {
                    signals.sentiment_score = record.score;
                    signals.sentiment_label = record.label.to_uppercase();
                }
            }
            Err(e) => {
                error!(model_id = model.model_id(), error = %e, "Sentiment inference failed");
            }
        }
    }
}

impl SignalScorer for MlScorer {
    fn models_loaded(&self) -> bool {
        self.toxicity.is_some() || self.sentiment.is_some()
    }

    fn loaded_models(&self) -> Vec<(ModelTask, String)> {
        [
            (ModelTask::Toxicity, &self.toxicity),
            (ModelTask::Sentiment, &self.sentiment),
        ]
        .into_iter()
        .filter_map(|(task, model)| model.as_ref().map(|m| (task, m.model_id().to_string())))
        .collect()
    }

    fn score(&self, text: &str) -> Result<MlSignals, ScoringError> {
        if !self.models_loaded() {
            return Err(ScoringError::NoModelsLoaded);
        }
        if text.trim().is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "text is empty".to_string(),
            });
        }

        let mut signals = MlSignals::default();
        self.apply_toxicity(text, &mut signals);
        self.apply_sentiment(text, &mut signals);

        debug!(
            toxicity = signals.toxicity_score,
            categories = ?signals.toxic_categories,
            sentiment = signals.sentiment_score,
            sentiment_label = %signals.sentiment_label,
            "Scored text"
        );

        Ok(signals)
    }
}
