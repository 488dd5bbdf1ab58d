use std::{fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{catalog, ActionId, Face},
    error::CubeError,
};

pub const FACELETS_PER_FACE: usize = 9;
pub const FACELET_COUNT: usize = FACELETS_PER_FACE * 6;
const CENTER: usize = 4;

/// Owned snapshot of all 54 facelets. Each facelet records the face whose
/// colour it carries. Serialised as 54 face letters, face by face in
/// [`Face::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CubeState {
    faces: [[Face; FACELETS_PER_FACE]; 6],
}

impl CubeState {
    pub fn solved() -> Self {
        Self {
            faces: Face::ALL.map(|face| [face; FACELETS_PER_FACE]),
        }
    }

    pub fn face(&self, face: Face) -> &[Face; FACELETS_PER_FACE] {
        &self.faces[face.index()]
    }

    pub fn faces(&self) -> impl Iterator<Item = (Face, &[Face; FACELETS_PER_FACE])> {
        Face::ALL.into_iter().zip(self.faces.iter())
    }

    pub fn is_solved(&self) -> bool {
        self.faces
            .iter()
            .all(|grid| grid.iter().all(|facelet| *facelet == grid[CENTER]))
    }

    pub fn rotated(&self, action: ActionId) -> Result<Self, CubeError> {
        let mut next = self.clone();
        next.apply(action)?;
        Ok(next)
    }

    pub(crate) fn apply(&mut self, action: ActionId) -> Result<(), CubeError> {
        let perm = catalog().permutation(action)?;
        let before = self.faces;
        for (target, source) in perm.iter().enumerate() {
            let source = *source as usize;
            self.faces[target / FACELETS_PER_FACE][target % FACELETS_PER_FACE] =
                before[source / FACELETS_PER_FACE][source % FACELETS_PER_FACE];
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), CubeError> {
        let mut counts = [0usize; 6];
        for grid in &self.faces {
            for facelet in grid {
                counts[facelet.index()] += 1;
            }
        }
        if let Some(face) = Face::ALL
            .into_iter()
            .find(|face| counts[face.index()] != FACELETS_PER_FACE)
        {
            return Err(CubeError::InvalidState(format!(
                "colour {face} appears {} times, expected {FACELETS_PER_FACE}",
                counts[face.index()]
            )));
        }
        if let Some((face, grid)) = self.faces().find(|(face, grid)| grid[CENTER] != *face) {
            return Err(CubeError::InvalidState(format!(
                "centre of face {face} carries colour {}",
                grid[CENTER]
            )));
        }
        Ok(())
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::solved()
    }
}

impl fmt::Display for CubeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for grid in &self.faces {
            for facelet in grid {
                write!(f, "{}", facelet.letter())?;
            }
        }
        Ok(())
    }
}

impl FromStr for CubeState {
    type Err = CubeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = raw.trim().chars().collect();
        if letters.len() != FACELET_COUNT {
            return Err(CubeError::InvalidState(format!(
                "expected {FACELET_COUNT} facelets, got {}",
                letters.len()
            )));
        }
        let mut faces = [[Face::Front; FACELETS_PER_FACE]; 6];
        for (index, letter) in letters.into_iter().enumerate() {
            let face = Face::from_letter(letter).ok_or_else(|| {
                CubeError::InvalidState(format!("unknown facelet '{letter}' at {index}"))
            })?;
            faces[index / FACELETS_PER_FACE][index % FACELETS_PER_FACE] = face;
        }
        let state = Self { faces };
        state.validate()?;
        Ok(state)
    }
}

impl TryFrom<String> for CubeState {
    type Error = CubeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CubeState> for String {
    fn from(value: CubeState) -> Self {
        value.to_string()
    }
}

/// Single source of truth for cube geometry. Every mutation goes through
/// the methods here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CubeModel {
    state: CubeState,
}

impl CubeModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: CubeState) -> Self {
        Self { state }
    }

    pub fn apply_action(&mut self, action: ActionId) -> Result<(), CubeError> {
        self.state.apply(action)
    }

    /// Applies `actions` in order. Stops at the first invalid action; the
    /// actions before it stay applied.
    pub fn apply_sequence(&mut self, actions: &[ActionId]) -> Result<(), CubeError> {
        for action in actions {
            self.state.apply(*action)?;
        }
        Ok(())
    }

    /// Random walk of `depth` independent, uniformly drawn actions. Returns
    /// the trace in the order it was applied.
    pub fn scramble(&mut self, depth: usize) -> Vec<ActionId> {
        self.scramble_with(depth, &mut rand::thread_rng())
    }

    pub fn scramble_with<R: Rng + ?Sized>(&mut self, depth: usize, rng: &mut R) -> Vec<ActionId> {
        let actions = catalog().len();
        let mut trace = Vec::new();
        for _ in 0..depth {
            let action = ActionId(rng.gen_range(0..actions) as u8);
            if self.state.apply(action).is_ok() {
                trace.push(action);
            }
        }
        trace
    }

    pub fn reset(&mut self) {
        self.state = CubeState::solved();
    }

    pub fn project(&self) -> &CubeState {
        &self.state
    }

    pub fn snapshot(&self) -> CubeState {
        self.state.clone()
    }

    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }
}

#[cfg(test)]
#[path = "tests/model_tests.rs"]
mod tests;
