use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        catalog_route, searchers_route, solve_route, CatalogContract, SearcherList, SolveRequest,
        SolveResponse,
    },
};
use tracing::{info, warn};

mod api;
mod app_state;
mod config;

use api::{catalog_contract, list_searchers, solve, SolverContext};
use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let state = AppState {
        api: SolverContext {
            max_time_limit_secs: settings.max_time_limit_secs,
            max_states: settings.max_states,
        },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(
        %addr,
        max_time_limit_secs = settings.max_time_limit_secs,
        max_states = ?settings.max_states,
        "solver listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(catalog_route(), get(http_catalog))
        .route(searchers_route(), get(http_searchers))
        .route(solve_route(), post(http_solve))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_catalog() -> Json<CatalogContract> {
    Json(catalog_contract())
}

async fn http_searchers() -> Json<SearcherList> {
    Json(list_searchers())
}

async fn http_solve(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SolveResponse>, (StatusCode, Json<ApiError>)> {
    let request: SolveRequest = serde_json::from_slice(&body).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(
                ErrorCode::Validation,
                format!("invalid solve request: {e}"),
            )),
        )
    })?;

    let response = solve(&state.api, request).await.map_err(|e| {
        warn!(code = ?e.code, message = %e.message, "solve request rejected");
        (status_for(e.code), Json(e))
    })?;
    Ok(Json(response))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Validation | ErrorCode::UnknownSearcher => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
