use std::path::Path;

use log::debug;
use novelhub_core::prelude::User;
use serde::{Deserialize, Serialize};

use crate::{
    error::PersistResult,
    file::{read_json_or_default, write_json},
};

/// What survives between runs: the logged in user and at most one favorite
/// requested while logged out.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub pending_favorite: Option<String>,
}

impl SessionSnapshot {
    /// A missing file is an empty session.
    pub fn open(path: &Path) -> PersistResult<Self> {
        let snapshot: SessionSnapshot = read_json_or_default(path)?;
        debug!(
            "opened session at {} (user: {:?}, pending: {:?})",
            path.display(),
            snapshot.user.as_ref().map(|u| u.user_name.as_str()),
            snapshot.pending_favorite
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> PersistResult<()> {
        write_json(path, self)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.pending_favorite.is_none()
    }
}

#[cfg(test)]
mod tests {
    use novelhub_core::prelude::Role;

    use super::*;

    #[test]
    fn should_open_missing_file_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = SessionSnapshot::open(&dir.path().join("session.json")).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn should_restore_saved_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("session.json");

        let mut user = User::new("alice".into(), "a@b.io".into(), "secret1".into(), Role::Reader);
        user.id = String::from("u1");
        user.favorites = vec![String::from("n1")];

        let snapshot = SessionSnapshot {
            user: Some(user),
            pending_favorite: Some(String::from("n5")),
        };
        snapshot.save(&path).unwrap();

        assert_eq!(SessionSnapshot::open(&path).unwrap(), snapshot);
    }

    #[test]
    fn should_fail_on_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(SessionSnapshot::open(&path).is_err());
    }
}
