pub mod domain;
pub mod error;
mod geometry;
pub mod model;

pub use domain::{catalog, ActionCatalog, ActionDef, ActionId, Direction, Face, CATALOG_VERSION};
pub use error::CubeError;
pub use model::{CubeModel, CubeState, FACELETS_PER_FACE, FACELET_COUNT};
