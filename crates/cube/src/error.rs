use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubeError {
    #[error("action index {index} is outside the action catalog (size {len})")]
    InvalidAction { index: usize, len: usize },
    #[error("unknown action label '{0}'")]
    UnknownLabel(String),
    #[error("invalid cube state: {0}")]
    InvalidState(String),
}
