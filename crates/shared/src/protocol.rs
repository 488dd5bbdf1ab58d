use chrono::{DateTime, Utc};
use cube::{catalog, ActionId, CubeState, CATALOG_VERSION};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub fn catalog_route() -> &'static str {
    "/catalog"
}

pub fn searchers_route() -> &'static str {
    "/searchers"
}

pub fn solve_route() -> &'static str {
    "/solve"
}

/// The action vocabulary a client or solver speaks. Both sides must agree on
/// every field before action indices can be exchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogContract {
    pub version: u32,
    pub labels: Vec<String>,
}

impl CatalogContract {
    pub fn local() -> Self {
        Self {
            version: CATALOG_VERSION,
            labels: catalog().labels(),
        }
    }

    pub fn mismatch(&self, other: &CatalogContract) -> Option<String> {
        if self.version != other.version {
            return Some(format!(
                "catalog version {} does not match {}",
                self.version, other.version
            ));
        }
        if self.labels.len() != other.labels.len() {
            return Some(format!(
                "catalog has {} actions, peer has {}",
                self.labels.len(),
                other.labels.len()
            ));
        }
        self.labels
            .iter()
            .zip(&other.labels)
            .position(|(ours, theirs)| ours != theirs)
            .map(|index| {
                format!(
                    "action {index} is '{}' locally but '{}' on the peer",
                    self.labels[index], other.labels[index]
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearcherList {
    pub searchers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub request_id: Uuid,
    pub state: CubeState,
    pub time_limit_secs: f64,
    pub searcher: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_states: Option<u64>,
}

/// `solution: None` means the searcher ran out of budget. It is not a
/// transport failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResponse {
    pub request_id: Uuid,
    pub explored_states: u64,
    #[serde(default)]
    pub solution: Option<Vec<ActionId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
