use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    error::{ApiError, ApiException},
    protocol::{
        catalog_route, searchers_route, solve_route, CatalogContract, SearcherList, SolveRequest,
        SolveResponse,
    },
};
use solver::{searcher_by_index, searcher_names, SearchBudget};
use tracing::debug;
use url::Url;

use crate::Solver;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct HttpSolver {
    http: Client,
    base_url: Url,
}

impl HttpSolver {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("invalid solver url '{base_url}'"))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("failed to build http client")?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> Result<Url> {
        self.base_url
            .join(route.trim_start_matches('/'))
            .with_context(|| format!("invalid solver route '{route}'"))
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        match response.json::<ApiError>().await {
            Ok(api_error) => Err(anyhow::Error::new(ApiException::from(api_error))
                .context(format!("solver answered {status}"))),
            Err(_) => Err(anyhow!("solver answered {status}")),
        }
    }
}

#[async_trait]
impl Solver for HttpSolver {
    async fn catalog(&self) -> Result<CatalogContract> {
        let response = self.http.get(self.endpoint(catalog_route())?).send().await?;
        Self::decode(response).await
    }

    async fn searchers(&self) -> Result<SearcherList> {
        let response = self
            .http
            .get(self.endpoint(searchers_route())?)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn solve(&self, request: SolveRequest) -> Result<SolveResponse> {
        debug!(request_id = %request.request_id, base_url = %self.base_url, "posting solve request");
        let response = self
            .http
            .post(self.endpoint(solve_route())?)
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[derive(Debug, Default, Clone)]
pub struct LocalSolver;

impl LocalSolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Solver for LocalSolver {
    async fn catalog(&self) -> Result<CatalogContract> {
        Ok(CatalogContract::local())
    }

    async fn searchers(&self) -> Result<SearcherList> {
        Ok(SearcherList {
            searchers: searcher_names(),
        })
    }

    async fn solve(&self, request: SolveRequest) -> Result<SolveResponse> {
        let mut searcher = searcher_by_index(request.searcher)?;
        let time_limit = Duration::try_from_secs_f64(request.time_limit_secs)
            .with_context(|| format!("invalid time limit {}", request.time_limit_secs))?;
        let budget = SearchBudget::new(time_limit).with_max_states(request.max_states);
        let state = request.state;
        let outcome = tokio::task::spawn_blocking(move || searcher.search(&state, budget))
            .await
            .context("local search task failed")?;

        Ok(SolveResponse {
            request_id: request.request_id,
            explored_states: outcome.explored_states,
            solution: outcome.solution,
            finished_at: Some(Utc::now()),
        })
    }
}

#[cfg(test)]
#[path = "tests/solver_client_tests.rs"]
mod tests;
