use std::collections::{HashSet, VecDeque};

use cube::{catalog, ActionId, CubeState};
use tracing::debug;

use crate::{SearchBudget, SearchOutcome, Searcher};

#[derive(Debug, Default, Clone, Copy)]
pub struct BreadthFirstSearcher;

impl BreadthFirstSearcher {
    pub const NAME: &'static str = "bfs";
}

struct Node {
    state: CubeState,
    parent: Option<(usize, ActionId)>,
}

impl Searcher for BreadthFirstSearcher {
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
        let mut nodes = vec![Node {
            state: start.clone(),
            parent: None,
        }];
        let mut seen: HashSet<CubeState> = HashSet::from([start.clone()]);
        let mut frontier = VecDeque::from([0usize]);
        let mut explored_states = 1u64;

        while let Some(current) = frontier.pop_front() {
            for def in catalog().iter() {
                if clock.exhausted(explored_states) {
                    debug!(explored_states, "bfs budget exhausted");
                    return SearchOutcome {
                        explored_states,
                        solution: None,
                    };
                }
                let Ok(next) = nodes[current].state.rotated(def.id) else {
                    continue;
                };
                if seen.contains(&next) {
                    continue;
                }
                explored_states += 1;
                let solved = next.is_solved();
                let index = nodes.len();
                seen.insert(next.clone());
                nodes.push(Node {
                    state: next,
                    parent: Some((current, def.id)),
                });
                if solved {
                    return SearchOutcome {
                        explored_states,
                        solution: Some(trace_back(&nodes, index)),
                    };
                }
                frontier.push_back(index);
            }
        }

        SearchOutcome {
            explored_states,
            solution: None,
        }
    }
}

fn trace_back(nodes: &[Node], mut index: usize) -> Vec<ActionId> {
    let mut actions = Vec::new();
    while let Some((parent, action)) = nodes[index].parent {
        actions.push(action);
        index = parent;
    }
    actions.reverse();
    actions
}
