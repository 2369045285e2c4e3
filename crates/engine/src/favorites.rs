use log::info;
use novelhub_core::{favorites, prelude::*};
use novelhub_store::{Collection, DataStore, DataStoreExt};

use crate::{App, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteToggle {
    Added,
    Removed,
    /// Nobody is logged in. The novel is kept as the pending intent and
    /// added on the next login.
    LoginRequired,
}

impl From<Toggle> for FavoriteToggle {
    fn from(toggle: Toggle) -> Self {
        match toggle {
            Toggle::Added => FavoriteToggle::Added,
            Toggle::Removed => FavoriteToggle::Removed,
        }
    }
}

impl<S: DataStore> App<S> {
    pub fn toggle_favorite(&mut self, novel_id: &str) -> Result<FavoriteToggle> {
        let Some(mut user) = self.current_user().cloned() else {
            self.session.stash_pending(novel_id)?;
            info!("kept '{novel_id}' as pending favorite until login");
            return Ok(FavoriteToggle::LoginRequired);
        };

        let toggle = favorites::toggle(&mut user.favorites, novel_id);
        info!("{toggle:?} '{novel_id}' for '{}'", user.user_name);

        self.commit_favorites(user)?;
        Ok(toggle.into())
    }

    /// Returns whether the novel was a favorite.
    pub fn remove_favorite(&mut self, novel_id: &str) -> Result<bool> {
        let mut user = self.current_user().cloned().ok_or(Error::LoginRequired)?;

        if !favorites::remove(&mut user.favorites, novel_id) {
            return Ok(false);
        }

        info!("removed '{novel_id}' from favorites of '{}'", user.user_name);
        self.commit_favorites(user)?;
        Ok(true)
    }

    /// The session user's favorites in their stored order. Ids with no
    /// matching novel are skipped.
    pub fn favorites(&self) -> Result<Vec<Novel>> {
        let user = self.current_user().ok_or(Error::LoginRequired)?;
        let novels = self.store.fetch_all::<Novel>(Collection::Novels, &[])?;

        Ok(user
            .favorites
            .iter()
            .filter_map(|id| novels.iter().find(|n| &n.id == id).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use novelhub_store::{MemoryStore, Method};

    use super::*;
    use crate::{fixtures, Session};

    fn reader(store: &MemoryStore) -> App<&MemoryStore> {
        let mut app = App::new(store, Session::in_memory());
        app.login("reader", "secret1").unwrap();
        app
    }

    #[test]
    fn should_restore_favorites_after_double_toggle() {
        let store = fixtures::store();
        let mut app = reader(&store);

        assert_eq!(app.toggle_favorite("n2").unwrap(), FavoriteToggle::Removed);
        assert_eq!(app.current_user().unwrap().favorites, vec!["n1"]);

        assert_eq!(app.toggle_favorite("n2").unwrap(), FavoriteToggle::Added);
        assert_eq!(app.current_user().unwrap().favorites, vec!["n1", "n2"]);

        let stored: User = store.fetch(Collection::Users, "u1").unwrap().unwrap();
        assert_eq!(stored.favorites, vec!["n1", "n2"]);
        assert_eq!(store.writes().len(), 2);
    }

    #[test]
    fn should_keep_one_pending_intent_when_anonymous() {
        let store = fixtures::store();
        let mut app = App::new(&store, Session::in_memory());

        assert_eq!(app.toggle_favorite("n1").unwrap(), FavoriteToggle::LoginRequired);
        assert_eq!(app.toggle_favorite("n5").unwrap(), FavoriteToggle::LoginRequired);
        assert_eq!(app.session().pending_favorite(), Some("n5"));
        assert!(store.writes().is_empty());
    }

    #[test]
    fn should_swallow_sync_failures() {
        let store = fixtures::store();
        let mut app = reader(&store);

        store.fail_next(Method::Patch, Collection::Users);
        assert_eq!(app.toggle_favorite("n5").unwrap(), FavoriteToggle::Added);
        assert!(app.current_user().unwrap().is_favorite("n5"));

        let stored: User = store.fetch(Collection::Users, "u1").unwrap().unwrap();
        assert!(!stored.is_favorite("n5"));
    }

    #[test]
    fn should_not_sync_when_disabled() {
        let store = fixtures::store();
        let mut app = reader(&store).with_sync_favorites(false);

        app.toggle_favorite("n1").unwrap();
        assert!(store.writes().is_empty());
    }

    #[test]
    fn should_remove_and_list_favorites() {
        let store = fixtures::store();
        let mut app = reader(&store);
        app.toggle_favorite("gone").unwrap();

        let titles = app.favorites().unwrap().into_iter().map(|n| n.title).collect::<Vec<_>>();
        assert_eq!(titles, vec!["First Light", "Second Wind"]);

        assert!(app.remove_favorite("n1").unwrap());
        assert!(!app.remove_favorite("n1").unwrap());
        assert_eq!(app.current_user().unwrap().favorites, vec!["n2", "gone"]);
    }
}
