use std::{fmt, sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cube::{catalog, ActionId, CubeError, CubeModel, CubeState};
use shared::protocol::{CatalogContract, SearcherList, SolveRequest, SolveResponse};
use thiserror::Error;
use tokio::{
    sync::{broadcast, Mutex, Notify},
    time::MissedTickBehavior,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

mod solver_client;
pub use solver_client::{HttpSolver, LocalSolver};

pub type SharedCube = Arc<Mutex<CubeModel>>;

const DEFAULT_ANIMATION_INTERVAL: Duration = Duration::from_millis(350);
const DEFAULT_SOLVE_GRACE: Duration = Duration::from_secs(10);

/// The external search agent. Implementations must speak the same action
/// catalog as this crate; [`SolveSession::connect`] checks that.
#[async_trait]
pub trait Solver: Send + Sync {
    async fn catalog(&self) -> Result<CatalogContract>;
    async fn searchers(&self) -> Result<SearcherList>;
    async fn solve(&self, request: SolveRequest) -> Result<SolveResponse>;
}

pub struct MissingSolver;

#[async_trait]
impl Solver for MissingSolver {
    async fn catalog(&self) -> Result<CatalogContract> {
        Err(anyhow!("solver collaborator is unavailable"))
    }

    async fn searchers(&self) -> Result<SearcherList> {
        Err(anyhow!("solver collaborator is unavailable"))
    }

    async fn solve(&self, request: SolveRequest) -> Result<SolveResponse> {
        Err(anyhow!(
            "solver collaborator is unavailable for request {}",
            request.request_id
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Loading,
    Animating,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Loading => "loading",
            SessionPhase::Animating => "animating",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub phase: SessionPhase,
    pub has_searched_for_solution: bool,
    pub has_solution: bool,
    pub explored_states: Option<u64>,
    pub solve_length: Option<usize>,
    pub last_error: Option<String>,
    pub last_response_at: Option<DateTime<Utc>>,
}

impl SessionStatus {
    fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            has_searched_for_solution: false,
            has_solution: false,
            explored_states: None,
            solve_length: None,
            last_error: None,
            last_response_at: None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SessionPhase::Idle
    }

    fn clear_outcome(&mut self) {
        self.has_searched_for_solution = false;
        self.has_solution = false;
        self.explored_states = None;
        self.solve_length = None;
        self.last_error = None;
        self.last_response_at = None;
    }
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub animation_interval: Duration,
    pub solve_grace: Duration,
    pub max_states: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            animation_interval: DEFAULT_ANIMATION_INTERVAL,
            solve_grace: DEFAULT_SOLVE_GRACE,
            max_states: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved { explored_states: u64, length: usize },
    NotFound { explored_states: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    PhaseChanged(SessionPhase),
    CubeChanged,
    ActionApplied { action: ActionId, remaining: usize },
    SolveFinished(SolveOutcome),
    Error(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is busy ({0})")]
    Busy(SessionPhase),
    #[error(transparent)]
    Cube(#[from] CubeError),
    #[error("time limit must be a positive number of seconds, got {0}")]
    InvalidTimeLimit(f64),
    #[error("unknown searcher {index} ({available} advertised)")]
    UnknownSearcher { index: usize, available: usize },
    #[error("solver unavailable: {0}")]
    SolveUnavailable(String),
    #[error("operation cancelled")]
    Cancelled,
    #[error("action catalog mismatch: {0}")]
    CatalogMismatch(String),
}

struct SessionState {
    status: SessionStatus,
    // reversed: pop() yields the next action
    queue: Vec<ActionId>,
    searchers: Option<Vec<String>>,
    in_flight: Option<Uuid>,
}

impl SessionState {
    fn ensure_idle(&self) -> Result<(), SessionError> {
        match self.status.phase {
            SessionPhase::Idle => Ok(()),
            phase => Err(SessionError::Busy(phase)),
        }
    }

    fn invalidate_solution(&mut self) {
        self.queue.clear();
        self.status.clear_outcome();
    }
}

/// Orchestrates scramble, solve and playback against a shared cube. Only one
/// operation that touches the cube or the solver may run at a time; callers
/// that arrive while another is in progress get [`SessionError::Busy`].
pub struct SolveSession {
    solver: Arc<dyn Solver>,
    cube: SharedCube,
    config: SessionConfig,
    inner: Mutex<SessionState>,
    cancel: Notify,
    events: broadcast::Sender<SessionEvent>,
}

impl SolveSession {
    pub fn new(solver: Arc<dyn Solver>, cube: SharedCube, config: SessionConfig) -> Arc<Self> {
        let (events, _) = broadcast::channel(256);
        Arc::new(Self {
            solver,
            cube,
            config,
            inner: Mutex::new(SessionState {
                status: SessionStatus::new(),
                queue: Vec::new(),
                searchers: None,
                in_flight: None,
            }),
            cancel: Notify::new(),
            events,
        })
    }

    /// Like [`SolveSession::new`], but first checks that the solver speaks
    /// this crate's action catalog and records the searchers it offers.
    pub async fn connect(
        solver: Arc<dyn Solver>,
        cube: SharedCube,
        config: SessionConfig,
    ) -> Result<Arc<Self>, SessionError> {
        let remote = solver
            .catalog()
            .await
            .map_err(|e| SessionError::SolveUnavailable(format!("{e:#}")))?;
        if let Some(reason) = CatalogContract::local().mismatch(&remote) {
            return Err(SessionError::CatalogMismatch(reason));
        }
        let searchers = solver
            .searchers()
            .await
            .map_err(|e| SessionError::SolveUnavailable(format!("{e:#}")))?
            .searchers;
        info!(?searchers, "solver connected");

        let session = Self::new(solver, cube, config);
        session.inner.lock().await.searchers = Some(searchers);
        Ok(session)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub async fn status(&self) -> SessionStatus {
        self.inner.lock().await.status.clone()
    }

    pub async fn queue(&self) -> Vec<ActionId> {
        self.inner.lock().await.queue.iter().rev().copied().collect()
    }

    pub async fn searchers(&self) -> Option<Vec<String>> {
        self.inner.lock().await.searchers.clone()
    }

    pub async fn cube_snapshot(&self) -> CubeState {
        self.cube.lock().await.snapshot()
    }

    pub async fn rotate(&self, action: ActionId) -> Result<(), SessionError> {
        let mut guard = self.inner.lock().await;
        guard.ensure_idle()?;
        self.cube.lock().await.apply_action(action)?;
        guard.invalidate_solution();
        drop(guard);

        debug!(%action, "manual rotation");
        self.emit(SessionEvent::CubeChanged);
        Ok(())
    }

    pub async fn scramble(&self, depth: usize) -> Result<Vec<ActionId>, SessionError> {
        let mut guard = self.inner.lock().await;
        guard.ensure_idle()?;
        let trace = self.cube.lock().await.scramble(depth);
        guard.invalidate_solution();
        drop(guard);

        info!(depth, "cube scrambled");
        self.emit(SessionEvent::CubeChanged);
        Ok(trace)
    }

    pub async fn reset(&self) -> Result<(), SessionError> {
        let mut guard = self.inner.lock().await;
        guard.ensure_idle()?;
        self.cube.lock().await.reset();
        guard.invalidate_solution();
        drop(guard);

        info!("cube reset");
        self.emit(SessionEvent::CubeChanged);
        Ok(())
    }

    /// Sends a snapshot of the cube to the solver and waits for its answer,
    /// at most `time_limit_secs` plus the configured grace. The session is
    /// back to idle when this returns, whatever the result.
    pub async fn solve(
        &self,
        time_limit_secs: f64,
        searcher: usize,
    ) -> Result<SolveOutcome, SessionError> {
        if !time_limit_secs.is_finite() || time_limit_secs <= 0.0 {
            return Err(SessionError::InvalidTimeLimit(time_limit_secs));
        }
        let wait = Duration::try_from_secs_f64(time_limit_secs)
            .ok()
            .and_then(|limit| limit.checked_add(self.config.solve_grace))
            .ok_or(SessionError::InvalidTimeLimit(time_limit_secs))?;

        let (request, mut cancelled) = {
            let mut guard = self.inner.lock().await;
            guard.ensure_idle()?;
            if let Some(searchers) = &guard.searchers {
                if searcher >= searchers.len() {
                    return Err(SessionError::UnknownSearcher {
                        index: searcher,
                        available: searchers.len(),
                    });
                }
            }
            let state = self.cube.lock().await.snapshot();
            guard.invalidate_solution();
            guard.status.phase = SessionPhase::Loading;
            let request = SolveRequest {
                request_id: Uuid::new_v4(),
                state,
                time_limit_secs,
                searcher,
                max_states: self.config.max_states,
            };
            guard.in_flight = Some(request.request_id);
            let mut cancelled = Box::pin(self.cancel.notified());
            cancelled.as_mut().enable();
            (request, cancelled)
        };
        self.emit(SessionEvent::PhaseChanged(SessionPhase::Loading));

        let request_id = request.request_id;
        info!(%request_id, time_limit_secs, searcher, "solve requested");

        let result = tokio::select! {
            response = tokio::time::timeout(wait, self.solver.solve(request)) => match response {
                Ok(Ok(response)) => validate_response(request_id, response),
                Ok(Err(error)) => Err(SessionError::SolveUnavailable(format!("{error:#}"))),
                Err(_) => Err(SessionError::SolveUnavailable(format!(
                    "no response within {wait:?}"
                ))),
            },
            _ = &mut cancelled => Err(SessionError::Cancelled),
        };

        self.finish_solve(request_id, result).await
    }

    async fn finish_solve(
        &self,
        request_id: Uuid,
        result: Result<SolveResponse, SessionError>,
    ) -> Result<SolveOutcome, SessionError> {
        let mut guard = self.inner.lock().await;
        guard.status.phase = SessionPhase::Idle;
        guard.in_flight = None;

        match result {
            Ok(response) => {
                let explored_states = response.explored_states;
                guard.status.has_searched_for_solution = true;
                guard.status.explored_states = Some(explored_states);
                guard.status.last_response_at = Some(response.finished_at.unwrap_or_else(Utc::now));
                let outcome = match response.solution {
                    Some(solution) => {
                        let length = solution.len();
                        guard.queue = solution.into_iter().rev().collect();
                        guard.status.has_solution = true;
                        guard.status.solve_length = Some(length);
                        SolveOutcome::Solved {
                            explored_states,
                            length,
                        }
                    }
                    None => {
                        guard.queue.clear();
                        guard.status.has_solution = false;
                        SolveOutcome::NotFound { explored_states }
                    }
                };
                drop(guard);

                info!(%request_id, ?outcome, "solve finished");
                self.emit(SessionEvent::PhaseChanged(SessionPhase::Idle));
                self.emit(SessionEvent::SolveFinished(outcome));
                Ok(outcome)
            }
            Err(error) => {
                guard.invalidate_solution();
                guard.status.last_error = Some(error.to_string());
                drop(guard);

                warn!(%request_id, %error, "solve failed");
                self.emit(SessionEvent::PhaseChanged(SessionPhase::Idle));
                self.emit(SessionEvent::Error(error.to_string()));
                Err(error)
            }
        }
    }

    pub async fn step(&self) -> Result<Option<ActionId>, SessionError> {
        let mut guard = self.inner.lock().await;
        guard.ensure_idle()?;
        let Some(action) = guard.queue.pop() else {
            return Ok(None);
        };
        if let Err(error) = self.cube.lock().await.apply_action(action) {
            guard.queue.clear();
            return Err(error.into());
        }
        let remaining = guard.queue.len();
        drop(guard);

        debug!(%action, remaining, "stepped");
        self.emit(SessionEvent::ActionApplied { action, remaining });
        Ok(Some(action))
    }

    pub async fn animate_all(&self) -> Result<usize, SessionError> {
        let mut cancelled = {
            let mut guard = self.inner.lock().await;
            guard.ensure_idle()?;
            if guard.queue.is_empty() {
                return Ok(0);
            }
            guard.status.phase = SessionPhase::Animating;
            let mut cancelled = Box::pin(self.cancel.notified());
            cancelled.as_mut().enable();
            cancelled
        };
        self.emit(SessionEvent::PhaseChanged(SessionPhase::Animating));

        let mut ticker = tokio::time::interval(self.config.animation_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut applied = 0usize;

        let result = loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = &mut cancelled => break Err(SessionError::Cancelled),
            }

            let mut guard = self.inner.lock().await;
            let Some(action) = guard.queue.pop() else {
                break Ok(applied);
            };
            if let Err(error) = self.cube.lock().await.apply_action(action) {
                guard.queue.clear();
                break Err(error.into());
            }
            applied += 1;
            let remaining = guard.queue.len();
            drop(guard);

            debug!(%action, remaining, "animated");
            self.emit(SessionEvent::ActionApplied { action, remaining });
            if remaining == 0 {
                break Ok(applied);
            }
        };

        self.inner.lock().await.status.phase = SessionPhase::Idle;
        info!(applied, "animation finished");
        self.emit(SessionEvent::PhaseChanged(SessionPhase::Idle));
        result
    }

    /// Abandons an in-flight solve or stops a running animation. Returns the
    /// phase that was interrupted, or `None` when the session was idle.
    pub async fn cancel(&self) -> Option<SessionPhase> {
        let guard = self.inner.lock().await;
        let phase = guard.status.phase;
        if phase == SessionPhase::Idle {
            return None;
        }
        // Only the operation that owns the current phase can be waiting here.
        self.cancel.notify_waiters();
        info!(%phase, request_id = ?guard.in_flight, "cancel requested");
        Some(phase)
    }

    fn emit(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }
}

fn validate_response(
    request_id: Uuid,
    response: SolveResponse,
) -> Result<SolveResponse, SessionError> {
    if response.request_id != request_id {
        return Err(SessionError::SolveUnavailable(format!(
            "response answers request {} instead of {request_id}",
            response.request_id
        )));
    }
    if let Some(solution) = &response.solution {
        if let Some(action) = solution
            .iter()
            .find(|action| action.index() >= catalog().len())
        {
            return Err(SessionError::SolveUnavailable(format!(
                "solver returned action {} outside the catalog",
                action.0
            )));
        }
    }
    Ok(response)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
