use log::info;
use novelhub_core::{catalog, prelude::*, validate::CreateUserForm};
use novelhub_store::{Collection, DataStore, DataStoreExt};

use crate::{App, Error, Result};

/// An admin edit of an account. A missing or blank password keeps the
/// current one.
#[derive(Debug, Clone)]
pub struct UserEdit {
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub password: Option<String>,
}

impl<S: DataStore> App<S> {
    pub fn users(&self, text: Option<&str>, role: Option<Role>) -> Result<Vec<User>> {
        let users: Vec<User> = self.store.fetch_all(Collection::Users, &[])?;
        Ok(catalog::search_users(&users, text, role)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn create_user(&mut self, form: &CreateUserForm) -> Result<User> {
        form.validate()?;
        self.ensure_user_name_free(&form.user_name)?;

        let user = User::new(
            form.user_name.clone(),
            form.email.clone(),
            form.password.clone(),
            form.role.unwrap_or_default(),
        );
        let user = self.store.insert(Collection::Users, &user)?;

        info!("created {} '{}'", user.role, user.user_name);
        Ok(user)
    }

    /// Full replace of the account. Favorites and avatar are carried over.
    pub fn edit_user(&mut self, user_id: &str, edit: UserEdit) -> Result<User> {
        let current: User = self
            .store
            .fetch(Collection::Users, user_id)?
            .ok_or_else(|| Error::not_found(Collection::Users, user_id))?;

        let password = edit
            .password
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| current.password.clone());

        CreateUserForm {
            user_name: edit.user_name.clone(),
            email: edit.email.clone(),
            password: password.clone(),
            role: Some(edit.role),
        }
        .validate()?;

        if edit.user_name != current.user_name {
            self.ensure_user_name_free(&edit.user_name)?;
        }

        let user = User {
            user_name: edit.user_name,
            email: edit.email,
            password,
            role: edit.role,
            ..current
        };
        let user = self.store.put(Collection::Users, user_id, &user)?;
        info!("updated user '{}' ({user_id})", user.user_name);

        if self.current_user().map_or(false, |u| u.id == user.id) {
            self.session.set_user(user.clone())?;
        }

        Ok(user)
    }

    pub fn delete_user(&mut self, user_id: &str) -> Result<()> {
        self.store.delete(Collection::Users, user_id)?;
        info!("deleted user '{user_id}'");
        Ok(())
    }
}
