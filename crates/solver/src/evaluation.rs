use std::time::Duration;

use cube::CubeModel;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::{SearchBudget, Searcher};

/// Plays scrambled games against a searcher and summarises, per scrambling
/// depth, how many it solved and how long the solutions were.
#[derive(Debug, Clone)]
pub struct Evaluator {
    games: usize,
    time_limit: Duration,
    depths: Vec<usize>,
    max_states: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthReport {
    pub depth: usize,
    pub games: usize,
    pub solved: usize,
    pub mean_length: Option<f64>,
    pub median_length: Option<f64>,
}

impl DepthReport {
    pub fn share_solved(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.solved as f64 / self.games as f64
        }
    }
}

impl Evaluator {
    pub fn new(games: usize, time_limit: Duration, depths: Vec<usize>) -> Self {
        Self {
            games,
            time_limit,
            depths,
            max_states: None,
        }
    }

    pub fn with_max_states(mut self, max_states: Option<u64>) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        searcher: &mut dyn Searcher,
        rng: &mut R,
    ) -> Vec<DepthReport> {
        info!(
            searcher = searcher.name(),
            games = self.games,
            depths = ?self.depths,
            "evaluating searcher"
        );
        let budget = SearchBudget::new(self.time_limit).with_max_states(self.max_states);
        self.depths
            .iter()
            .map(|depth| {
                let mut lengths = Vec::with_capacity(self.games);
                for _ in 0..self.games {
                    let mut cube = CubeModel::new();
                    cube.scramble_with(*depth, rng);
                    if let Some(solution) = searcher.search(cube.project(), budget).solution {
                        lengths.push(solution.len());
                    }
                }
                let report = summarize(*depth, self.games, lengths);
                info!(
                    depth = report.depth,
                    share_solved = report.share_solved(),
                    mean_length = ?report.mean_length,
                    "depth evaluated"
                );
                report
            })
            .collect()
    }
}

fn summarize(depth: usize, games: usize, mut lengths: Vec<usize>) -> DepthReport {
    lengths.sort_unstable();
    let solved = lengths.len();
    let mean_length =
        (solved > 0).then(|| lengths.iter().sum::<usize>() as f64 / solved as f64);
    let median_length = (solved > 0).then(|| {
        if solved % 2 == 1 {
            lengths[solved / 2] as f64
        } else {
            (lengths[solved / 2 - 1] + lengths[solved / 2]) as f64 / 2.0
        }
    });
    DepthReport {
        depth,
        games,
        solved,
        mean_length,
        median_length,
    }
}

#[cfg(test)]
#[path = "tests/evaluation_tests.rs"]
mod tests;
