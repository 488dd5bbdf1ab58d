use cube::{catalog, ActionId, CubeState};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use crate::{SearchBudget, SearchOutcome, Searcher};

const DEFAULT_WALK_DEPTH: usize = 20;

pub struct RandomDepthFirstSearcher {
    rng: StdRng,
    walk_depth: usize,
}

impl RandomDepthFirstSearcher {
    pub const NAME: &'static str = "random_dfs";

    pub fn new(rng: StdRng, walk_depth: usize) -> Self {
        Self {
            rng,
            walk_depth: walk_depth.max(1),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), DEFAULT_WALK_DEPTH)
    }
}

impl Default for RandomDepthFirstSearcher {
    fn default() -> Self {
        Self::new(StdRng::from_entropy(), DEFAULT_WALK_DEPTH)
    }
}

impl Searcher for RandomDepthFirstSearcher {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn search(&mut self, start: &CubeState, budget: SearchBudget) -> SearchOutcome {
        if start.is_solved() {
            return SearchOutcome {
                explored_states: 1,
                solution: Some(Vec::new()),
            };
        }

        let clock = budget.start();
        let actions = catalog().len();
        let mut explored_states = 1u64;
        let mut walks = 0u64;

        loop {
            let mut state = start.clone();
            let mut path = Vec::with_capacity(self.walk_depth);
            for _ in 0..self.walk_depth {
                if clock.exhausted(explored_states) {
                    debug!(explored_states, walks, "random dfs budget exhausted");
                    return SearchOutcome {
                        explored_states,
                        solution: None,
                    };
                }
                let action = ActionId(self.rng.gen_range(0..actions) as u8);
                let Ok(next) = state.rotated(action) else {
                    continue;
                };
                state = next;
                path.push(action);
                explored_states += 1;
                if state.is_solved() {
                    return SearchOutcome {
                        explored_states,
                        solution: Some(path),
                    };
                }
            }
            walks += 1;
        }
    }
}
