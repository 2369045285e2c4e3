//! The service layer. [`App`] owns the store handle and the one session,
//! and every user-facing operation goes through it.

mod auth;
mod chapters;
pub mod error;
mod favorites;
mod ids;
mod novels;
mod session;
mod users;

use log::{debug, warn};
use novelhub_core::prelude::*;
use novelhub_store::{Collection, DataStore};
use serde_json::{json, Value};

pub use auth::ProfileUpdate;
pub use chapters::ChapterView;
pub use error::{Error, Result};
pub use favorites::FavoriteToggle;
pub use ids::{new_id, today, CHAPTER_PREFIX, NOVEL_PREFIX};
pub use novels::{NovelDetail, Standing};
pub use session::Session;
pub use users::UserEdit;

pub struct App<S> {
    store: S,
    session: Session,
    policy: Policy,
    sync_favorites: bool,
}

impl<S: DataStore> App<S> {
    pub fn new(store: S, session: Session) -> Self {
        App {
            store,
            session,
            policy: Policy::default(),
            sync_favorites: true,
        }
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = policy;
        self
    }

    /// Whether favorite and profile changes are pushed to the store after
    /// being saved to the session.
    pub fn with_sync_favorites(mut self, sync: bool) -> Self {
        self.sync_favorites = sync;
        self
    }

    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn guard(&self, path: &str) -> Access {
        self.policy.check(self.current_user(), path)
    }

    /// The session user, if the policy lets them onto `path`.
    pub fn require(&self, path: &str) -> Result<&User> {
        match self.guard(path) {
            Access::Allow => self.current_user().ok_or(Error::LoginRequired),
            Access::RedirectToLogin => Err(Error::LoginRequired),
            Access::Forbidden { required } => Err(Error::Forbidden {
                path: path.to_string(),
                required,
            }),
        }
    }

    pub fn home_route(&self) -> &'static str {
        novelhub_core::policy::home_route(self.current_user())
    }

    /// Save the user to the session, then push `fields` of it to the store
    /// when syncing is on. The push is best effort: a failure is logged and
    /// the local copy stays authoritative.
    fn commit_user(&mut self, user: User, fields: Value) -> Result<User> {
        self.session.set_user(user.clone())?;

        if self.sync_favorites && !user.id.is_empty() {
            match self.store.patch(Collection::Users, &user.id, &fields) {
                Ok(_) => debug!("synced '{}' to the store", user.user_name),
                Err(e) => warn!("failed to sync '{}' to the store: {e}", user.user_name),
            }
        }

        Ok(user)
    }

    fn commit_favorites(&mut self, user: User) -> Result<User> {
        let fields = json!({ "favorites": &user.favorites });
        self.commit_user(user, fields)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use novelhub_store::{Collection, MemoryStore};
    use serde_json::json;

    pub fn store() -> MemoryStore {
        MemoryStore::new()
            .with_records(
                Collection::Users,
                vec![
                    json!({ "id": "u1", "userName": "reader", "email": "r@x.io", "pwd": "secret1", "role": "reader", "favorites": ["n1", "n2"] }),
                    json!({ "id": "u2", "userName": "manager", "email": "m@x.io", "pwd": "secret2", "role": "manager" }),
                    json!({ "id": "u3", "userName": "admin", "email": "a@x.io", "pwd": "secret3", "roles": "Admin" }),
                    json!({ "id": "u4", "userName": "fan", "email": "f@x.io", "pwd": "secret4", "role": "reader", "favourites": ["n5"] }),
                ],
            )
            .with_records(
                Collection::Novels,
                vec![
                    json!({ "id": "n1", "novelName": "First Light", "author": "A", "genres": ["Fantasy"], "rate": 4.5, "views": 300 }),
                    json!({ "id": "n2", "novelName": "Second Wind", "author": "B", "genres": ["Drama"], "rate": 3.0 }),
                    json!({ "id": "n5", "novelName": "Fifth Door", "author": "C", "genres": ["Horror", "Fantasy"] }),
                    json!({ "id": "n100", "novelName": "The Long War", "author": "D", "totalChapters": 3 }),
                ],
            )
            .with_records(
                Collection::Chapters,
                vec![
                    json!({ "id": "c1", "novelId": "n100", "chapterNumber": 1, "title": "Dawn", "prevChapterId": null, "nextChapterId": "c2" }),
                    json!({ "id": "c2", "novelId": "n100", "chapterNumber": 2, "title": "Siege", "prevChapterId": "c1", "nextChapterId": "c3" }),
                    json!({ "id": "c3", "novelId": "n100", "chapterNumber": 3, "title": "Fall", "prevChapterId": "c2", "nextChapterId": null }),
                ],
            )
    }
}
