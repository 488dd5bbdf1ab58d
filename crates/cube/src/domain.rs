use std::{fmt, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::{error::CubeError, geometry, model::FACELET_COUNT};

/// Bumped whenever the order or meaning of catalog entries changes.
pub const CATALOG_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Face {
    Front,
    Back,
    Top,
    Down,
    Left,
    Right,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Top,
        Face::Down,
        Face::Left,
        Face::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Top => 'T',
            Face::Down => 'D',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Face::ALL
            .into_iter()
            .find(|face| face.letter() == letter.to_ascii_uppercase())
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Index into the action catalog. This is the identity used on the wire and
/// in the action queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionId(pub u8);

impl ActionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match catalog().get(*self) {
            Ok(def) => write!(f, "{}", def.label),
            Err(_) => write!(f, "#{}", self.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDef {
    pub id: ActionId,
    pub face: Face,
    pub direction: Direction,
    pub label: &'static str,
}

const LABELS: [&str; 12] = ["F", "F'", "B", "B'", "T", "T'", "D", "D'", "L", "L'", "R", "R'"];

/// The fixed, ordered catalog of quarter turns. Entry `2 * face` turns that
/// face clockwise, entry `2 * face + 1` counter-clockwise.
pub struct ActionCatalog {
    actions: Vec<ActionDef>,
    permutations: Vec<[u8; FACELET_COUNT]>,
}

static CATALOG: OnceLock<ActionCatalog> = OnceLock::new();

pub fn catalog() -> &'static ActionCatalog {
    CATALOG.get_or_init(ActionCatalog::build)
}

impl ActionCatalog {
    fn build() -> Self {
        let mut actions = Vec::with_capacity(LABELS.len());
        let mut permutations = Vec::with_capacity(LABELS.len());
        for face in Face::ALL {
            for direction in [Direction::Clockwise, Direction::CounterClockwise] {
                let index = actions.len();
                actions.push(ActionDef {
                    id: ActionId(index as u8),
                    face,
                    direction,
                    label: LABELS[index],
                });
                permutations.push(geometry::turn_permutation(face, direction));
            }
        }
        Self {
            actions,
            permutations,
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDef> {
        self.actions.iter()
    }

    pub fn get(&self, action: ActionId) -> Result<&ActionDef, CubeError> {
        self.actions
            .get(action.index())
            .ok_or(CubeError::InvalidAction {
                index: action.index(),
                len: self.actions.len(),
            })
    }

    pub fn inverse(&self, action: ActionId) -> Result<ActionId, CubeError> {
        self.get(action)?;
        Ok(ActionId(action.0 ^ 1))
    }

    pub fn find(&self, face: Face, direction: Direction) -> ActionId {
        let offset = match direction {
            Direction::Clockwise => 0,
            Direction::CounterClockwise => 1,
        };
        ActionId((face.index() * 2 + offset) as u8)
    }

    pub fn parse(&self, text: &str) -> Result<ActionId, CubeError> {
        let text = text.trim();
        if let Ok(index) = text.parse::<usize>() {
            let action = u8::try_from(index)
                .map(ActionId)
                .map_err(|_| CubeError::InvalidAction {
                    index,
                    len: self.len(),
                })?;
            self.get(action)?;
            return Ok(action);
        }
        self.actions
            .iter()
            .find(|def| def.label.eq_ignore_ascii_case(text))
            .map(|def| def.id)
            .ok_or_else(|| CubeError::UnknownLabel(text.to_string()))
    }

    pub fn labels(&self) -> Vec<String> {
        self.actions.iter().map(|def| def.label.to_string()).collect()
    }

    pub(crate) fn permutation(&self, action: ActionId) -> Result<&[u8; FACELET_COUNT], CubeError> {
        self.get(action)?;
        Ok(&self.permutations[action.index()])
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
