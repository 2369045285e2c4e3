mod config;
mod error;
mod file;
mod snapshot;

pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use error::{PersistError, PersistResult};
pub use file::create_parent_all;
pub use snapshot::SessionSnapshot;
