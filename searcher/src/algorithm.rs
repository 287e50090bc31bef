//! Provides the building blocks for search algorithms

use std::default::Default;
use std::time::{Duration, Instant};

use crate::errors::{Result, SearchError};

pub mod adstar;
pub mod anytime;
pub(crate) mod factory;
pub(crate) mod frontier;
pub mod node;
pub(crate) mod updater;

/// Options which control how a planner drives a search.
///
/// Fields are set on a default value:
///
/// ```
/// let options = {
///     let mut o = searcher::SearchOptions::default();
///     o.limit = Some(10_000);
///     o
/// };
/// assert_eq!(options.epsilon_step, 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Print progress to stderr every this many steps.
    pub verbose: Option<usize>,

    /// Maximum number of search steps.
    pub limit: Option<usize>,

    /// Maximum wall clock time spent searching.
    pub time_limit: Option<Duration>,

    /// How much the inflation factor drops between anytime iterations.
    pub epsilon_step: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            verbose: None,
            limit: None,
            time_limit: None,
            epsilon_step: 0.5,
        }
    }
}

#[derive(Debug)]
struct StepLimit {
    current: usize,
    maximum: usize,
}

impl StepLimit {
    fn new(limit: usize) -> Self {
        Self {
            current: 0,
            maximum: limit,
        }
    }

    /// Account for one more step, failing once the limit is used up.
    fn increment(&mut self) -> Result<()> {
        if self.current >= self.maximum {
            return Err(SearchError::StepLimitExhausted(self.current));
        }
        self.current += 1;
        Ok(())
    }
}

#[derive(Debug)]
struct TimeLimit {
    started: Instant,
    maximum: Duration,
}

impl TimeLimit {
    fn new(limit: Duration) -> Self {
        Self {
            started: Instant::now(),
            maximum: limit,
        }
    }

    fn check(&self) -> Result<()> {
        let elapsed = self.started.elapsed();
        if elapsed >= self.maximum {
            Err(SearchError::TimeLimitExhausted(elapsed))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_limit() {
        let mut limit = StepLimit::new(2);
        assert!(limit.increment().is_ok());
        assert!(limit.increment().is_ok());
        match limit.increment() {
            Err(SearchError::StepLimitExhausted(2)) => {}
            other => panic!("Expected an exhausted limit, got {:?}", other),
        }
    }

    #[test]
    fn time_limit() {
        assert!(TimeLimit::new(Duration::from_secs(3600)).check().is_ok());
        assert!(TimeLimit::new(Duration::from_secs(0)).check().is_err());
    }
}
