use super::*;
use crate::domain::{Direction, Face};
use rand::{rngs::StdRng, SeedableRng};

fn colour_counts(state: &CubeState) -> [usize; 6] {
    let mut counts = [0; 6];
    for (_, grid) in state.faces() {
        for facelet in grid {
            counts[facelet.index()] += 1;
        }
    }
    counts
}

#[test]
fn new_cube_is_solved() {
    let cube = CubeModel::new();
    assert!(cube.is_solved());
    assert_eq!(
        cube.project().to_string(),
        "FFFFFFFFFBBBBBBBBBTTTTTTTTTDDDDDDDDDLLLLLLLLLRRRRRRRRR"
    );
}

#[test]
fn every_action_followed_by_its_inverse_restores_state() {
    let mut cube = CubeModel::new();
    cube.scramble_with(20, &mut StdRng::seed_from_u64(7));
    for def in catalog().iter() {
        let before = cube.snapshot();
        cube.apply_action(def.id).expect("apply");
        cube.apply_action(catalog().inverse(def.id).expect("inverse"))
            .expect("apply inverse");
        assert_eq!(cube.project(), &before, "{} round trip", def.label);
    }
}

#[test]
fn four_quarter_turns_are_identity() {
    for def in catalog().iter() {
        let mut cube = CubeModel::new();
        cube.apply_action(ActionId(3)).expect("setup");
        let before = cube.snapshot();
        cube.apply_action(def.id).expect("apply");
        assert_ne!(cube.project(), &before, "{} must move facelets", def.label);
        for _ in 0..3 {
            cube.apply_action(def.id).expect("apply");
        }
        assert_eq!(cube.project(), &before, "{}^4", def.label);
    }
}

#[test]
fn turns_preserve_colour_counts_and_centres() {
    let mut cube = CubeModel::new();
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        cube.scramble_with(1, &mut rng);
        assert_eq!(colour_counts(cube.project()), [9; 6]);
        for (face, grid) in cube.project().faces() {
            assert_eq!(grid[4], face);
        }
    }
}

#[test]
fn front_clockwise_moves_top_row_onto_right_face() {
    let mut cube = CubeModel::new();
    cube.apply_action(catalog().find(Face::Front, Direction::Clockwise))
        .expect("apply");
    let state = cube.project();

    assert!(state.face(Face::Front).iter().all(|f| *f == Face::Front));
    assert!(state.face(Face::Back).iter().all(|f| *f == Face::Back));
    // The left column of the right face now carries the top colour.
    let right = state.face(Face::Right);
    assert_eq!([right[0], right[3], right[6]], [Face::Top; 3]);
    // The bottom row of the top face now carries the left colour.
    let top = state.face(Face::Top);
    assert_eq!([top[6], top[7], top[8]], [Face::Left; 3]);
    // Seen from below with the front on top, the first row of the down face
    // borders the front layer.
    let down = state.face(Face::Down);
    assert_eq!([down[0], down[1], down[2]], [Face::Right; 3]);
}

#[test]
fn opposite_faces_commute() {
    let mut a = CubeModel::new();
    a.apply_sequence(&[ActionId(0), ActionId(2)]).expect("apply");
    let mut b = CubeModel::new();
    b.apply_sequence(&[ActionId(2), ActionId(0)]).expect("apply");
    assert_eq!(a, b);

    let mut c = CubeModel::new();
    c.apply_sequence(&[ActionId(4), ActionId(0)]).expect("apply");
    assert_ne!(a, c);
}

#[test]
fn invalid_action_leaves_state_unchanged() {
    let mut cube = CubeModel::new();
    cube.apply_action(ActionId(1)).expect("apply");
    let before = cube.snapshot();
    let err = cube.apply_action(ActionId(12)).expect_err("invalid");
    assert_eq!(err, CubeError::InvalidAction { index: 12, len: 12 });
    assert_eq!(cube.project(), &before);
}

#[test]
fn apply_sequence_stops_at_first_invalid_action() {
    let mut cube = CubeModel::new();
    let err = cube
        .apply_sequence(&[ActionId(0), ActionId(99), ActionId(1)])
        .expect_err("invalid");
    assert!(matches!(err, CubeError::InvalidAction { index: 99, .. }));

    let mut expected = CubeModel::new();
    expected.apply_action(ActionId(0)).expect("apply");
    assert_eq!(cube, expected);
}

#[test]
fn reset_is_idempotent() {
    let mut cube = CubeModel::new();
    cube.scramble(12);
    cube.reset();
    let once = cube.snapshot();
    cube.reset();
    assert_eq!(cube.project(), &once);
    assert!(cube.is_solved());
}

#[test]
fn scramble_zero_is_a_no_op() {
    let mut cube = CubeModel::new();
    cube.apply_action(ActionId(6)).expect("apply");
    let before = cube.snapshot();
    assert!(cube.scramble(0).is_empty());
    assert_eq!(cube.project(), &before);
}

#[test]
fn scramble_trace_has_requested_length_and_replays() {
    let mut cube = CubeModel::new();
    let trace = cube.scramble_with(25, &mut StdRng::seed_from_u64(3));
    assert_eq!(trace.len(), 25);
    assert!(trace.iter().all(|action| action.index() < catalog().len()));

    let mut replay = CubeModel::new();
    replay.apply_sequence(&trace).expect("replay");
    assert_eq!(replay, cube);
}

#[test]
fn undoing_a_scramble_in_reverse_solves_the_cube() {
    let mut cube = CubeModel::new();
    let trace = cube.scramble_with(8, &mut StdRng::seed_from_u64(21));
    let undo: Vec<ActionId> = trace
        .iter()
        .rev()
        .map(|action| catalog().inverse(*action).expect("inverse"))
        .collect();
    cube.apply_sequence(&undo).expect("undo");
    assert!(cube.is_solved());
}

#[test]
fn state_text_round_trips_and_validates() {
    let mut cube = CubeModel::new();
    cube.scramble_with(10, &mut StdRng::seed_from_u64(5));
    let text = cube.project().to_string();
    let parsed: CubeState = text.parse().expect("parse");
    assert_eq!(&parsed, cube.project());

    let json = serde_json::to_string(cube.project()).expect("json");
    assert_eq!(json, format!("\"{text}\""));
    let decoded: CubeState = serde_json::from_str(&json).expect("decode");
    assert_eq!(CubeModel::from_state(decoded), cube);
}

#[test]
fn malformed_states_are_rejected() {
    assert!(matches!(
        "FFF".parse::<CubeState>(),
        Err(CubeError::InvalidState(_))
    ));

    let solved = CubeState::solved().to_string();
    let mut unknown = solved.clone();
    unknown.replace_range(0..1, "X");
    assert!(unknown.parse::<CubeState>().is_err());

    let mut counts = solved.clone();
    counts.replace_range(0..1, "B");
    assert!(counts.parse::<CubeState>().is_err());

    // Swap two centres: counts stay valid but centres move.
    let mut centres: Vec<char> = solved.chars().collect();
    centres.swap(4, 13);
    let centres: String = centres.into_iter().collect();
    assert!(centres.parse::<CubeState>().is_err());

    assert!(serde_json::from_str::<CubeState>("\"FFF\"").is_err());
}
