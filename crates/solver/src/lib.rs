use std::time::{Duration, Instant};

use cube::{ActionId, CubeState};
use thiserror::Error;

mod bfs;
pub mod evaluation;
mod random_dfs;

pub use bfs::BreadthFirstSearcher;
pub use random_dfs::RandomDepthFirstSearcher;

pub const SEARCHERS: [&str; 2] = [BreadthFirstSearcher::NAME, RandomDepthFirstSearcher::NAME];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("unknown searcher index {index} ({available} available)")]
    UnknownSearcher { index: usize, available: usize },
    #[error("unknown searcher '{0}'")]
    UnknownSearcherName(String),
}

#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    pub time_limit: Duration,
    pub max_states: Option<u64>,
}

impl SearchBudget {
    pub fn new(time_limit: Duration) -> Self {
        Self {
            time_limit,
            max_states: None,
        }
    }

    pub fn with_max_states(mut self, max_states: Option<u64>) -> Self {
        self.max_states = max_states;
        self
    }

    pub(crate) fn start(&self) -> BudgetClock {
        BudgetClock {
            deadline: Instant::now() + self.time_limit,
            max_states: self.max_states,
        }
    }
}

pub(crate) struct BudgetClock {
    deadline: Instant,
    max_states: Option<u64>,
}

impl BudgetClock {
    pub(crate) fn exhausted(&self, explored_states: u64) -> bool {
        if let Some(max_states) = self.max_states {
            if explored_states >= max_states {
                return true;
            }
        }
        Instant::now() >= self.deadline
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub explored_states: u64,
    pub solution: Option<Vec<ActionId>>,
}

pub trait Searcher: Send {
    fn name(&self) -> &'static str;

    /// Looks for an action sequence taking `start` to the solved state within
    /// `budget`. The returned solution is in application order.
    fn search(&mut self, start: &CubeState, budget: SearchBudget) -> SearchOutcome;
}

pub fn searcher_names() -> Vec<String> {
    SEARCHERS.iter().map(|name| name.to_string()).collect()
}

pub fn searcher_by_index(index: usize) -> Result<Box<dyn Searcher>, SolverError> {
    match SEARCHERS.get(index) {
        Some(name) => searcher_by_name(name),
        None => Err(SolverError::UnknownSearcher {
            index,
            available: SEARCHERS.len(),
        }),
    }
}

pub fn searcher_by_name(name: &str) -> Result<Box<dyn Searcher>, SolverError> {
    match name {
        BreadthFirstSearcher::NAME => Ok(Box::new(BreadthFirstSearcher)),
        RandomDepthFirstSearcher::NAME => Ok(Box::new(RandomDepthFirstSearcher::default())),
        other => Err(SolverError::UnknownSearcherName(other.to_string())),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
