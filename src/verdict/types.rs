use serde::{Deserialize, Serialize};

use crate::constants::{NEUTRAL_CONFIDENCE, REASON_FAIL_OPEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Why a verdict was produced.
pub enum Category {
    Appropriate,
    InsufficientContent,
    Spam,
    HateSpeech,
    Toxic,
    OffTopic,
}

impl Category {
    /// Wire / persisted name of the category.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Appropriate => "appropriate",
            Category::InsufficientContent => "insufficient_content",
            Category::Spam => "spam",
            Category::HateSpeech => "hate_speech",
            Category::Toxic => "toxic",
            Category::OffTopic => "off_topic",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Classifier signals attached to verdicts decided with the ML stage.
pub struct MlDiagnostics {
    pub toxicity_score: f32,
    pub sentiment_score: f32,
    pub sentiment_label: String,
    pub toxic_categories: Vec<String>,
    pub ml_models_used: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Outcome of verifying one review text.
///
/// Diagnostics are flattened into the JSON object and omitted entirely when the ML stage did
/// not run.
pub struct Verdict {
    pub is_appropriate: bool,
    pub reason: String,
    pub confidence: f32,
    pub category: Category,
    #[serde(flatten)]
    pub diagnostics: Option<MlDiagnostics>,
}

impl Verdict {
    /// Accepting verdict (`category = appropriate`).
    pub fn accept(reason: impl Into<String>, confidence: f32) -> Self {
        Self {
            is_appropriate: true,
            reason: reason.into(),
            confidence: confidence.clamp(0.0, 1.0),
            category: Category::Appropriate,
            diagnostics: None,
        }
    }

    /// Rejecting verdict. `category` must not be [`Category::Appropriate`].
    pub fn reject(category: Category, reason: impl Into<String>, confidence: f32) -> Self {
        debug_assert_ne!(category, Category::Appropriate);
        Self {
            is_appropriate: false,
            reason: reason.into(),
            confidence: confidence.clamp(0.0, 1.0),
            category,
            diagnostics: None,
        }
    }

    /// Accept returned when automatic verification breaks.
    pub fn fail_open() -> Self {
        Self::accept(REASON_FAIL_OPEN, NEUTRAL_CONFIDENCE)
    }

    pub fn with_diagnostics(mut self, diagnostics: MlDiagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Returns `true` if the ML classifiers contributed to this verdict.
    pub fn ml_models_used(&self) -> bool {
        self.diagnostics
            .as_ref()
            .is_some_and(|d| d.ml_models_used)
    }

    /// Persisted moderation status for this verdict.
    pub fn status(&self) -> &'static str {
        if self.is_appropriate {
            "approved"
        } else {
            "rejected"
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}, confidence: {:.2}): {}",
            self.status().to_uppercase(),
            self.category,
            self.confidence,
            self.reason
        )
    }
}
