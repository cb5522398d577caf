use thiserror::Error;

/// Errors produced by the recommendation engine
///
/// An empty or fully-filtered catalog is not an error; the engine returns an
/// empty list for it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
