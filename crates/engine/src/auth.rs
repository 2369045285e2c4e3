use log::{debug, info};
use novelhub_core::{
    favorites::merge_pending,
    prelude::*,
    validate::{validate_login, RegisterForm},
};
use novelhub_store::{Collection, DataStore, DataStoreExt};
use serde_json::json;

use crate::{App, Error, Result};

/// Profile page edits. `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub user_name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub password: Option<String>,
}

impl<S: DataStore> App<S> {
    /// Plaintext equality lookup on name and password. A favorite requested
    /// while logged out is merged into the fresh record.
    pub fn login(&mut self, user_name: &str, password: &str) -> Result<User> {
        validate_login(user_name, password)?;

        let mut user = self
            .store
            .fetch_all::<User>(Collection::Users, &[("userName", user_name), ("pwd", password)])?
            .into_iter()
            .next()
            .ok_or(Error::InvalidCredentials)?;

        info!("logged in '{}' as {}", user.user_name, user.role);

        if let Some(novel_id) = self.session.take_pending() {
            if merge_pending(&mut user.favorites, &novel_id) {
                debug!("added pending favorite '{novel_id}'");
                return self.commit_favorites(user);
            }
        }

        self.session.set_user(user.clone())?;
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session.clear()?;
        Ok(())
    }

    /// New accounts are always readers and are not logged in.
    pub fn register(&mut self, form: &RegisterForm) -> Result<User> {
        form.validate()?;
        self.ensure_user_name_free(&form.user_name)?;

        let user = User::new(
            form.user_name.clone(),
            form.email.clone(),
            form.password.clone(),
            Role::Reader,
        );
        let user = self.store.insert(Collection::Users, &user)?;

        info!("registered '{}'", user.user_name);
        Ok(user)
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<User> {
        let mut user = self.current_user().cloned().ok_or(Error::LoginRequired)?;

        if update.user_name.trim().is_empty() {
            return Err(ValidationErrors::single("userName", "Username cannot be empty.").into());
        }

        user.user_name = update.user_name;
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(avatar) = update.avatar {
            user.avatar = Some(avatar).filter(|a| !a.trim().is_empty());
        }
        if let Some(password) = update.password {
            user.password = password;
        }

        let fields = json!({
            "userName": &user.user_name,
            "email": &user.email,
            "avatar": &user.avatar,
            "pwd": &user.password,
            "favorites": &user.favorites,
        });
        self.commit_user(user, fields)
    }

    pub(crate) fn ensure_user_name_free(&self, user_name: &str) -> Result<()> {
        let taken = self.store.list(Collection::Users, &[("userName", user_name)])?;
        if taken.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::single("userName", "Username already exists").into())
        }
    }
}
