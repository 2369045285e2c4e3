use crate::{http::RequestError, Collection};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    Request(#[from] RequestError),

    #[error("failed to serialize or deserialize record: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("invalid store url '{0}'")]
    InvalidUrl(String),

    #[error("{collection} record '{id}' does not exist")]
    NotFound { collection: Collection, id: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
