use std::time;
use thiserror::Error;

/// Error produced when a search fails.
///
/// An unreachable goal is not an error for the search iterator itself;
/// only the planner turns it into [SearchError::NoResultFound].
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("No search result found")]
    NoResultFound,

    #[error("Step limit exhausted after {0} steps")]
    StepLimitExhausted(usize),

    #[error("Time limit exhausted after {0:?}")]
    TimeLimitExhausted(time::Duration),

    #[error("Cost algebra violates the law {0}")]
    AlgebraLaw(&'static str),

    #[error("Inflation factor must be finite and at least 1, got {0}")]
    InvalidEpsilon(f64),

    #[error("A search needs at least one goal state")]
    NoGoals,
}

/// Result when a search method might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
