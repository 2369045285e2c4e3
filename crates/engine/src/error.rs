use novelhub_core::prelude::{Role, ValidationErrors};
use novelhub_persist::PersistError;
use novelhub_store::{Collection, StoreError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("no record in {collection} with id '{id}'")]
    NotFound { collection: Collection, id: String },

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("login required")]
    LoginRequired,

    #[error("{path} requires role {}", roles(.required))]
    Forbidden { path: String, required: Vec<Role> },

    #[error("{0}")]
    Store(StoreError),

    #[error("{0}")]
    Persist(#[from] PersistError),

    /// The tail was already pointed at a chapter that could not be created.
    #[error("chapter '{tail_id}' links to a chapter that was not created, relink the novel: {source}")]
    PartialWrite { tail_id: String, source: StoreError },
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { collection, id } => Error::NotFound { collection, id },
            error => Error::Store(error),
        }
    }
}

impl Error {
    pub(crate) fn not_found(collection: Collection, id: &str) -> Self {
        Error::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

fn roles(required: &[Role]) -> String {
    required
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(" or ")
}
