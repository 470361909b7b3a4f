//! Pipeline errors surfaced to callers.
//!
//! Missing economic data, empty ingredient lists and malformed samples are not
//! errors; they degrade to defaults inside the pipeline.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("cannot rank an empty candidate set")]
    EmptyCandidateSet,
    #[error("no candidates found for '{dish}'")]
    NoCandidates { dish: String },
}
