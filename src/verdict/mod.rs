//! Verdict records and the ML verdict combiner.
//!
//! A [`Verdict`] is the only output of the verification service. Lexicon rejections build
//! verdicts directly; once the lexicon stage passes, [`combine`] turns classifier signals into
//! the final verdict.

pub mod combiner;
pub mod types;


pub use combiner::{combine, is_negative_label};
pub use types::{Category, MlDiagnostics, Verdict};
