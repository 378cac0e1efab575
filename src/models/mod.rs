//! Optional ML classifiers.
//!
//! - [`loader`] initializes the toxicity and sentiment pipelines, each independently and
//!   best-effort.
//! - [`classifier`] is the Candle implementation of [`TextClassifier`] (feature `ml`).
//! - [`hub`] resolves model directories locally or from the Hugging Face hub (feature `ml`).

/// Candle sequence classifier (BERT / RoBERTa).
#[cfg(feature = "ml")]
pub mod classifier;
pub mod config;
/// Inference device selection.
#[cfg(feature = "ml")]
pub mod device;
mod error;
/// Model directory resolution and downloads.
#[cfg(feature = "ml")]
pub mod hub;
pub mod loader;
pub mod pipeline;
/// Tokenizer/model file helpers.
#[cfg(feature = "ml")]
pub mod utils;

#[cfg(test)]
mod tests;

#[cfg(feature = "ml")]
pub use classifier::SequenceClassifier;
pub use config::{ModelConfig, ModelSource};
pub use error::ModelError;
pub use loader::{LoadedModels, load_models};
pub use pipeline::{ModelTask, TextClassifier};
