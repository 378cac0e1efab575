//! Batch verification of stored reviews.
//!
//! [`BatchDriver`] reads candidates from a [`ReviewStore`], verifies each review's combined
//! text and writes the verdict fields back. [`JsonReviewStore`] keeps reviews in a JSON file.

pub mod driver;
pub mod error;
pub mod record;
pub mod store;


pub use driver::{BatchDriver, BatchSummary};
pub use error::{StoreError, StoreResult};
pub use record::{BatchFilter, ReviewRecord, VerdictUpdate};
pub use store::{JsonReviewStore, ReviewStore};
