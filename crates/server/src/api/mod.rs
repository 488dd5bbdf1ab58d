use std::time::Duration;

use chrono::Utc;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{CatalogContract, SearcherList, SolveRequest, SolveResponse},
};
use solver::{searcher_by_index, searcher_names, SearchBudget};
use tracing::info;

#[derive(Debug, Clone)]
pub struct SolverContext {
    pub max_time_limit_secs: f64,
    pub max_states: Option<u64>,
}

pub fn catalog_contract() -> CatalogContract {
    CatalogContract::local()
}

pub fn list_searchers() -> SearcherList {
    SearcherList {
        searchers: searcher_names(),
    }
}

pub async fn solve(ctx: &SolverContext, request: SolveRequest) -> Result<SolveResponse, ApiError> {
    let time_limit = request.time_limit_secs;
    if !time_limit.is_finite() || time_limit <= 0.0 {
        return Err(ApiError::new(
            ErrorCode::Validation,
            "time_limit_secs must be positive",
        ));
    }
    if time_limit > ctx.max_time_limit_secs {
        return Err(ApiError::new(
            ErrorCode::Validation,
            format!(
                "time_limit_secs exceeds the maximum of {}",
                ctx.max_time_limit_secs
            ),
        ));
    }

    let mut searcher = searcher_by_index(request.searcher)
        .map_err(|e| ApiError::new(ErrorCode::UnknownSearcher, e.to_string()))?;
    let time_limit = Duration::try_from_secs_f64(time_limit).map_err(|_| {
        ApiError::new(
            ErrorCode::Validation,
            "time_limit_secs is too large to represent",
        )
    })?;
    let budget = SearchBudget::new(time_limit)
        .with_max_states(effective_max_states(request.max_states, ctx.max_states));

    let request_id = request.request_id;
    let state = request.state;
    let outcome = tokio::task::spawn_blocking(move || searcher.search(&state, budget))
        .await
        .map_err(|e| internal(e.into()))?;

    info!(
        %request_id,
        searcher = request.searcher,
        explored_states = outcome.explored_states,
        solution_length = outcome.solution.as_ref().map(Vec::len),
        "search finished"
    );

    Ok(SolveResponse {
        request_id,
        explored_states: outcome.explored_states,
        solution: outcome.solution,
        finished_at: Some(Utc::now()),
    })
}

fn effective_max_states(requested: Option<u64>, cap: Option<u64>) -> Option<u64> {
    match (requested, cap) {
        (Some(requested), Some(cap)) => Some(requested.min(cap)),
        (requested, cap) => requested.or(cap),
    }
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::new(ErrorCode::Internal, err.to_string())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
