use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::PersistResult,
    file::{read_json_or_default, write_json},
};

pub const DEFAULT_CONFIG_PATH: &str = "novelhub.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub store_url: String,
    pub session_path: PathBuf,
    /// Push favorite changes to the store after saving them locally.
    pub sync_favorites: bool,
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = PathBuf::from("data");
        Self {
            store_url: String::from("http://localhost:9999"),
            session_path: base_dir.join("session.json"),
            sync_favorites: true,
        }
    }
}

impl Config {
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Fields missing from the file keep their defaults.
    pub fn open(path: &Path) -> PersistResult<Self> {
        read_json_or_default(path)
    }

    pub fn save(&self, path: &Path) -> PersistResult<()> {
        write_json(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fill_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("novelhub.json");
        std::fs::write(&path, r#"{ "store_url": "http://store.local:3000" }"#).unwrap();

        let config = Config::open(&path).unwrap();
        assert_eq!(config.store_url, "http://store.local:3000");
        assert_eq!(config.session_path, Path::new("data/session.json"));
        assert!(config.sync_favorites);
    }

    #[test]
    fn should_use_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::open(&dir.path().join("missing.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn should_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("novelhub.json");
        let config = Config {
            sync_favorites: false,
            ..Config::new()
        };

        config.save(&path).unwrap();
        assert_eq!(Config::open(&path).unwrap(), config);
    }
}
