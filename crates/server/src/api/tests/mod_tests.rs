use super::*;
use cube::{catalog, ActionId, CubeModel};
use uuid::Uuid;

fn context() -> SolverContext {
    SolverContext {
        max_time_limit_secs: 10.0,
        max_states: None,
    }
}

fn request(state: &CubeModel, time_limit_secs: f64, searcher: usize) -> SolveRequest {
    SolveRequest {
        request_id: Uuid::new_v4(),
        state: state.snapshot(),
        time_limit_secs,
        searcher,
        max_states: None,
    }
}

#[tokio::test]
async fn bfs_request_returns_applicable_solution() {
    let mut cube = CubeModel::new();
    cube.apply_sequence(&[ActionId(2), ActionId(9)]).expect("scramble");
    let req = request(&cube, 5.0, 0);
    let request_id = req.request_id;

    let response = solve(&context(), req).await.expect("solve");
    assert_eq!(response.request_id, request_id);
    assert!(response.finished_at.is_some());
    let solution = response.solution.expect("solution");
    cube.apply_sequence(&solution).expect("apply");
    assert!(cube.is_solved());
}

#[tokio::test]
async fn exhausted_budget_is_not_an_error() {
    let mut cube = CubeModel::new();
    cube.apply_sequence(&[ActionId(0), ActionId(4), ActionId(8), ActionId(11)])
        .expect("scramble");
    let mut req = request(&cube, 5.0, 0);
    req.max_states = Some(20);

    let response = solve(&context(), req).await.expect("solve");
    assert_eq!(response.solution, None);
    assert_eq!(response.explored_states, 20);
}

#[tokio::test]
async fn rejects_non_positive_and_oversized_time_limits() {
    let cube = CubeModel::new();
    for limit in [0.0, -1.0, f64::NAN, 11.0] {
        let err = solve(&context(), request(&cube, limit, 0))
            .await
            .expect_err("invalid limit");
        assert_eq!(err.code, ErrorCode::Validation, "limit {limit}");
    }
}

#[tokio::test]
async fn rejects_time_limit_beyond_duration_range() {
    let ctx = SolverContext {
        max_time_limit_secs: 1e30,
        max_states: None,
    };
    let err = solve(&ctx, request(&CubeModel::new(), 1e29, 0))
        .await
        .expect_err("unrepresentable limit");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[tokio::test]
async fn rejects_unknown_searcher() {
    let err = solve(&context(), request(&CubeModel::new(), 1.0, 7))
        .await
        .expect_err("unknown searcher");
    assert_eq!(err.code, ErrorCode::UnknownSearcher);
}

#[test]
fn server_cap_bounds_requested_state_budget() {
    assert_eq!(effective_max_states(None, None), None);
    assert_eq!(effective_max_states(Some(5), None), Some(5));
    assert_eq!(effective_max_states(None, Some(9)), Some(9));
    assert_eq!(effective_max_states(Some(50), Some(9)), Some(9));
}

#[test]
fn advertised_lists_match_local_vocabulary() {
    assert_eq!(catalog_contract().labels.len(), catalog().len());
    assert_eq!(list_searchers().searchers, vec!["bfs", "random_dfs"]);
}
