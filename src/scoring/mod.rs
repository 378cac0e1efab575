//! ML signal extraction.
//!
//! [`SignalScorer`] is the seam between the verification service and the optional classifiers.
//! [`MlScorer`] normalizes heterogeneous classifier output (single record or list) into
//! [`MlSignals`]; that normalization stays here and never reaches the verdict combiner.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockScorer;
pub use scorer::{MlScorer, NullScorer, SignalScorer};
pub use types::{ClassifierOutput, LabelScore, MlSignals};
