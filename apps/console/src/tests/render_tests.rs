use super::*;
use chrono::{TimeZone, Utc};
use client_core::SessionPhase;
use cube::{ActionId, CubeModel};

#[test]
fn solved_net_lays_out_faces_in_a_cross() {
    let net = render_net(&CubeState::solved());
    let lines: Vec<&str> = net.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "      T T T");
    assert_eq!(lines[4], "L L L F F F R R R B B B");
    assert_eq!(lines[8], "      D D D");
}

#[test]
fn front_turn_shows_left_colour_on_top_edge() {
    let mut cube = CubeModel::new();
    cube.apply_action(ActionId(0)).expect("front turn");
    let net = render_net(cube.project());
    let lines: Vec<&str> = net.lines().collect();
    assert_eq!(lines[2], "      L L L");
    assert_eq!(lines[6], "      R R R");
}

fn idle_status() -> SessionStatus {
    SessionStatus {
        phase: SessionPhase::Idle,
        has_searched_for_solution: false,
        has_solution: false,
        explored_states: None,
        solve_length: None,
        last_error: None,
        last_response_at: None,
    }
}

#[test]
fn status_line_reports_outcome() {
    assert_eq!(describe_status(&idle_status()), "phase=idle solution=none");

    let solved = SessionStatus {
        has_searched_for_solution: true,
        has_solution: true,
        explored_states: Some(120),
        solve_length: Some(3),
        last_response_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single(),
        ..idle_status()
    };
    assert_eq!(
        describe_status(&solved),
        "phase=idle solution=3 actions explored=120 answered_at=03:04:05"
    );

    let failed = SessionStatus {
        phase: SessionPhase::Loading,
        last_error: Some("timed out".to_string()),
        ..idle_status()
    };
    assert_eq!(
        describe_status(&failed),
        "phase=loading solution=none last_error=\"timed out\""
    );
}
