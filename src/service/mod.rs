//! The review verification service.
//!
//! [`ReviewVerifier::verify`] is a total function from text to [`Verdict`]:
//!
//! 1. empty or whitespace-only text is `insufficient_content`
//! 2. the lexicon filter rejects on its first matching rule
//! 3. without loaded models the lexicon's provisional verdict is final
//! 4. otherwise the ML signals go through [`combine`]
//!
//! Any failure in the ML branch, including a panic inside a classifier, is logged and answered
//! with [`Verdict::fail_open`].


use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use crate::lexicon::{Lexicon, LexiconFilter};
use crate::models::{ModelConfig, ModelTask, load_models};
use crate::scoring::{MlScorer, NullScorer, SignalScorer};
use crate::verdict::{Verdict, combine};

/// Lexicon pre-filter plus optional ML scoring. Cheap to share behind an [`Arc`].
pub struct ReviewVerifier {
    filter: LexiconFilter,
    scorer: Arc<dyn SignalScorer>,
}

impl std::fmt::Debug for ReviewVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewVerifier")
            .field("lexicon_entries", &self.filter.lexicon().len())
            .field("models_loaded", &self.scorer.models_loaded())
            .finish()
    }
}

impl ReviewVerifier {
    /// Builds the service: loads the lexicon (file or built-in) and attempts to load both
    /// classifiers. Never fails; missing capabilities are logged once here.
    pub fn new(lexicon_path: Option<&Path>, model_config: &ModelConfig) -> Self {
        let lexicon = Lexicon::load_or_builtin(lexicon_path);
        let models = load_models(model_config);

        let scorer: Arc<dyn SignalScorer> = if models.models_loaded() {
            Arc::new(MlScorer::new(models))
        } else {
            warn!("Review verification running in lexicon-only mode");
            Arc::new(NullScorer)
        };

        let verifier = Self::with_scorer(lexicon, scorer);
        info!(
            lexicon_entries = verifier.filter.lexicon().len(),
            models_loaded = verifier.models_loaded(),
            "Review verifier ready"
        );
        verifier
    }

    /// Service with an explicit scorer.
    pub fn with_scorer(lexicon: Lexicon, scorer: Arc<dyn SignalScorer>) -> Self {
        Self {
            filter: LexiconFilter::new(lexicon),
            scorer,
        }
    }

    /// Service that never runs a classifier.
    pub fn lexicon_only(lexicon: Lexicon) -> Self {
        Self::with_scorer(lexicon, Arc::new(NullScorer))
    }

    pub fn models_loaded(&self) -> bool {
        self.scorer.models_loaded()
    }

    /// Loaded classifiers as `(task, model id)` pairs.
    pub fn loaded_models(&self) -> Vec<(ModelTask, String)> {
        self.scorer.loaded_models()
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.filter.lexicon()
    }

    /// Verifies one review text. Never fails and never panics.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn verify(&self, text: &str) -> Verdict {
        let lexicon_verdict = self.filter.check(text);
        if !lexicon_verdict.is_appropriate {
            debug!(category = %lexicon_verdict.category, "Rejected by lexicon filter");
            return lexicon_verdict;
        }

        if !self.scorer.models_loaded() {
            return lexicon_verdict;
        }

        match catch_unwind(AssertUnwindSafe(|| self.scorer.score(text))) {
            Ok(Ok(signals)) => combine(&signals),
            Ok(Err(e)) => {
                error!(error = %e, "Automatic verification failed, accepting by default");
                Verdict::fail_open()
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!(panic = %message, "Automatic verification panicked, accepting by default");
                Verdict::fail_open()
            }
        }
    }
}
