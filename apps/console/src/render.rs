use client_core::SessionStatus;
use cube::{CubeState, Face};

const FACE_WIDTH: usize = 6;

pub fn render_net(state: &CubeState) -> String {
    let mut lines = Vec::with_capacity(9);
    let indent = " ".repeat(FACE_WIDTH);
    for row in 0..3 {
        lines.push(format!("{indent}{}", face_row(state, Face::Top, row)));
    }
    for row in 0..3 {
        let band: Vec<String> = [Face::Left, Face::Front, Face::Right, Face::Back]
            .into_iter()
            .map(|face| face_row(state, face, row))
            .collect();
        lines.push(band.join(" "));
    }
    for row in 0..3 {
        lines.push(format!("{indent}{}", face_row(state, Face::Down, row)));
    }
    lines.join("\n")
}

fn face_row(state: &CubeState, face: Face, row: usize) -> String {
    state.face(face)[row * 3..row * 3 + 3]
        .iter()
        .map(|facelet| facelet.letter().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn describe_status(status: &SessionStatus) -> String {
    let mut parts = vec![format!("phase={}", status.phase)];
    if status.has_searched_for_solution {
        match status.solve_length {
            Some(length) if status.has_solution => parts.push(format!("solution={length} actions")),
            _ => parts.push("solution=not found".to_string()),
        }
    } else {
        parts.push("solution=none".to_string());
    }
    if let Some(explored) = status.explored_states {
        parts.push(format!("explored={explored}"));
    }
    if let Some(at) = status.last_response_at {
        parts.push(format!("answered_at={}", at.format("%H:%M:%S")));
    }
    if let Some(error) = &status.last_error {
        parts.push(format!("last_error=\"{error}\""));
    }
    parts.join(" ")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
