//! Review verifier library crate (used by the binary and integration tests).
//!
//! Decides whether an interview review may be published. Every text goes through a lexicon
//! pre-filter; texts it accepts are scored by optional toxicity and sentiment classifiers and
//! the scores are merged into a [`Verdict`].
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`ReviewVerifier`] - The verification service (`verify(text) -> Verdict`)
//! - [`Verdict`], [`Category`] - Verification outcome
//! - [`Config`], [`ConfigError`] - Server configuration
//!
//! ## Lexicon & Scoring
//! - [`Lexicon`], [`LexiconFilter`] - Word lists and the rule-based pre-filter
//! - [`SignalScorer`], [`MlScorer`], [`MlSignals`] - Classifier signals
//! - [`ModelConfig`], [`LoadedModels`] - Classifier loading
//!
//! ## Batch
//! - [`BatchDriver`], [`ReviewStore`], [`JsonReviewStore`] - Offline verification of stored
//!   reviews
//!
//! ## Features
//! - `ml` (default): Candle classifiers and Hugging Face hub downloads. Without it the service
//!   runs lexicon-only.
//! - `metal` / `cuda`: GPU inference.
//! - `mock`: exposes [`MockScorer`] for tests.

pub mod batch;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod lexicon;
pub mod models;
pub mod scoring;
pub mod service;
pub mod verdict;

pub use batch::{
    BatchDriver, BatchFilter, BatchSummary, JsonReviewStore, ReviewRecord, ReviewStore,
    StoreError, VerdictUpdate,
};
pub use config::{Config, ConfigError};
pub use lexicon::{Lexicon, LexiconError, LexiconFilter};
pub use models::{LoadedModels, ModelConfig, ModelError, ModelSource, ModelTask, TextClassifier};
#[cfg(any(test, feature = "mock"))]
pub use scoring::MockScorer;
pub use scoring::{
    ClassifierOutput, LabelScore, MlScorer, MlSignals, NullScorer, ScoringError, SignalScorer,
};
pub use service::ReviewVerifier;
pub use verdict::{Category, MlDiagnostics, Verdict, combine};
