use thiserror::Error;

#[derive(Error, Debug)]
pub enum MaptyError {
    /// Bad user input. The form stays open.
    #[error("invalid workout: {0}")]
    Validation(String),
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    /// The persisted snapshot could not be read back.
    #[error("corrupt workout snapshot: {0}")]
    CorruptData(String),
    #[error("no workout with id {0}")]
    NotFound(String),
    #[error("duplicate workout id {0}")]
    DuplicateId(String),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("encoding workouts: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type Result<T, E = MaptyError> = std::result::Result<T, E>;
