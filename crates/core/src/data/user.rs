use log::debug;
use serde::{Deserialize, Serialize};

use super::{deserialize_id, Role};

pub const DEFAULT_AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", from = "UserRecord")]
pub struct User {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_name: String,
    pub email: String,
    #[serde(rename = "pwd")]
    pub password: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub favorites: Vec<String>,
}

/// The shape user records have in the store. Older records keep favorites
/// under `favourites` and some were registered with the role under `roles`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    #[serde(default, deserialize_with = "deserialize_id")]
    id: String,
    #[serde(default)]
    user_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    pwd: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    roles: Option<String>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    favorites: Option<Vec<String>>,
    #[serde(default)]
    favourites: Option<Vec<String>>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let role = match record.role.or(record.roles) {
            Some(role) => role.parse().unwrap_or_else(|_| {
                debug!("user '{}' has unknown role '{role}'", record.user_name);
                Role::default()
            }),
            None => Role::default(),
        };

        User {
            id: record.id,
            user_name: record.user_name,
            email: record.email,
            password: record.pwd,
            role,
            avatar: record.avatar.filter(|avatar| !avatar.trim().is_empty()),
            favorites: record.favorites.or(record.favourites).unwrap_or_default(),
        }
    }
}

impl User {
    pub fn new(user_name: String, email: String, password: String, role: Role) -> Self {
        User {
            id: String::new(),
            user_name,
            email,
            password,
            role,
            avatar: None,
            favorites: vec![],
        }
    }

    #[inline]
    pub fn is_favorite(&self, novel_id: &str) -> bool {
        self.favorites.iter().any(|id| id == novel_id)
    }

    /// Resolve the avatar into something displayable. Absolute urls and
    /// root-relative paths are kept, bare relative paths are joined onto
    /// `public_base`, and a missing avatar falls back to a generated one.
    pub fn avatar_url(&self, public_base: &str) -> String {
        let Some(raw) = self.avatar.as_deref() else {
            return self.generated_avatar();
        };

        if raw.starts_with("https://") || raw.starts_with("http://") || raw.starts_with('/') {
            return raw.to_string();
        }

        let base = public_base.strip_suffix('/').unwrap_or(public_base);
        format!("{base}/{}", raw.trim_start_matches('/'))
    }

    fn generated_avatar(&self) -> String {
        let name = if self.user_name.is_empty() {
            "User"
        } else {
            &self.user_name
        };
        let name: String = url::form_urlencoded::byte_serialize(name.as_bytes()).collect();
        format!("{DEFAULT_AVATAR_SERVICE}?name={name}&background=0D6EFD&color=fff&size=64")
    }
}
