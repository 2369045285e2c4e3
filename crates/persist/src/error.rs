use std::io;

pub type PersistResult<T> = Result<T, PersistError>;

#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("failed to serialize or deserialize {0}")]
    SerializationError(String),

    #[error("{0}")]
    IO(#[from] io::Error),
}

impl From<serde_json::Error> for PersistError {
    fn from(error: serde_json::Error) -> Self {
        PersistError::SerializationError(error.to_string())
    }
}
