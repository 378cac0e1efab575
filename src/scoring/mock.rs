use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::ScoringError;
use super::scorer::SignalScorer;
use super::types::MlSignals;

#[derive(Debug, Clone)]
enum MockBehavior {
    Signals(MlSignals),
    Fail(String),
    Panic(String),
}

/// Scorer double with scripted behaviour. Counts how often it was asked to score.
#[derive(Debug)]
pub struct MockScorer {
    behavior: MockBehavior,
    calls: AtomicUsize,
}

impl MockScorer {
    /// Always returns `signals`.
    pub fn with_signals(signals: MlSignals) -> Self {
        Self::from_behavior(MockBehavior::Signals(signals))
    }

    /// Returns the given toxicity/sentiment readings with no toxic categories.
    pub fn with_scores(toxicity: f32, sentiment: f32, sentiment_label: &str) -> Self {
        Self::with_signals(MlSignals {
            toxicity_score: toxicity,
            toxic_categories: Vec::new(),
            sentiment_score: sentiment,
            sentiment_label: sentiment_label.to_string(),
        })
    }

    /// Always returns an error.
    pub fn failing(reason: &str) -> Self {
        Self::from_behavior(MockBehavior::Fail(reason.to_string()))
    }

    /// Always panics.
    pub fn panicking(message: &str) -> Self {
        Self::from_behavior(MockBehavior::Panic(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn from_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }
}

impl SignalScorer for MockScorer {
    fn models_loaded(&self) -> bool {
        true
    }

    fn score(&self, _text: &str) -> Result<MlSignals, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Signals(signals) => Ok(signals.clone()),
            MockBehavior::Fail(reason) => Err(ScoringError::ComputationFailed {
                reason: reason.clone(),
            }),
            MockBehavior::Panic(message) => panic!("{}", message),
        }
    }
}
