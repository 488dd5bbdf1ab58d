use crate::api::SolverContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) api: SolverContext,
}
