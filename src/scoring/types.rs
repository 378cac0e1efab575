use serde::{Deserialize, Serialize};

use crate::constants::NEUTRAL_SENTIMENT_LABEL;
use crate::verdict::MlDiagnostics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// One `(label, score)` prediction from a text classifier.
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Raw classifier output. Backends return either a single record or a list of records.
pub enum ClassifierOutput {
    Single(LabelScore),
    Many(Vec<LabelScore>),
}

impl ClassifierOutput {
    /// Pipeline default output: only the highest-scoring record.
    pub fn top(records: Vec<LabelScore>) -> Option<Self> {
        records
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .map(ClassifierOutput::Single)
    }

    /// Normalizes to a list of records.
    pub fn into_records(self) -> Vec<LabelScore> {
        match self {
            ClassifierOutput::Single(record) => vec![record],
            ClassifierOutput::Many(records) => records,
        }
    }

    /// Normalizes to a single record (the first of a list).
    pub fn into_first(self) -> Option<LabelScore> {
        match self {
            ClassifierOutput::Single(record) => Some(record),
            ClassifierOutput::Many(records) => records.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Signals extracted by the ML stage for one text.
pub struct MlSignals {
    /// Peak score across labels recognised as toxic.
    pub toxicity_score: f32,
    /// Upper-cased toxic labels, unique, in first-seen order.
    pub toxic_categories: Vec<String>,
    pub sentiment_score: f32,
    pub sentiment_label: String,
}

impl Default for MlSignals {
    fn default() -> Self {
        Self {
            toxicity_score: 0.0,
            toxic_categories: Vec::new(),
            sentiment_score: 0.0,
            sentiment_label: NEUTRAL_SENTIMENT_LABEL.to_string(),
        }
    }
}

impl MlSignals {
    /// Records a toxic label, raising the peak score and keeping categories unique.
    pub fn record_toxic(&mut self, label: String, score: f32) {
        self.toxicity_score = self.toxicity_score.max(score);
        if !self.toxic_categories.contains(&label) {
            self.toxic_categories.push(label);
        }
    }

    pub fn to_diagnostics(&self) -> MlDiagnostics {
        MlDiagnostics {
            toxicity_score: self.toxicity_score,
            sentiment_score: self.sentiment_score,
            sentiment_label: self.sentiment_label.clone(),
            toxic_categories: self.toxic_categories.clone(),
            ml_models_used: true,
        }
    }
}
