use std::path::PathBuf;

use log::{debug, info};
use novelhub_core::prelude::User;
use novelhub_persist::{PersistResult, SessionSnapshot};

/// The one authoritative copy of who is logged in. Every change is written
/// through to the snapshot file before it is visible to callers.
#[derive(Debug, Default)]
pub struct Session {
    path: Option<PathBuf>,
    snapshot: SessionSnapshot,
}

impl Session {
    pub fn load(path: PathBuf) -> PersistResult<Self> {
        let snapshot = SessionSnapshot::open(&path)?;
        Ok(Session {
            path: Some(path),
            snapshot,
        })
    }

    /// A session that is never written anywhere.
    pub fn in_memory() -> Self {
        Default::default()
    }

    #[inline]
    pub fn current_user(&self) -> Option<&User> {
        self.snapshot.user.as_ref()
    }

    #[inline]
    pub fn pending_favorite(&self) -> Option<&str> {
        self.snapshot.pending_favorite.as_deref()
    }

    pub fn set_user(&mut self, user: User) -> PersistResult<()> {
        debug!("session user is now '{}'", user.user_name);
        self.snapshot.user = Some(user);
        self.save()
    }

    /// Forget the user and any pending intent.
    pub fn clear(&mut self) -> PersistResult<()> {
        if let Some(user) = self.snapshot.user.take() {
            info!("logged out '{}'", user.user_name);
        }
        self.snapshot.pending_favorite = None;
        self.save()
    }

    /// Remember a favorite requested while logged out. Only the latest one
    /// is kept.
    pub fn stash_pending(&mut self, novel_id: &str) -> PersistResult<()> {
        if let Some(previous) = self.snapshot.pending_favorite.as_deref() {
            debug!("pending favorite '{previous}' replaced by '{novel_id}'");
        }
        self.snapshot.pending_favorite = Some(novel_id.to_string());
        self.save()
    }

    /// Not saved until the next write.
    pub fn take_pending(&mut self) -> Option<String> {
        self.snapshot.pending_favorite.take()
    }

    fn save(&self) -> PersistResult<()> {
        match &self.path {
            Some(path) => self.snapshot.save(path),
            None => Ok(()),
        }
    }
}
