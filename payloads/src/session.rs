//! The authenticated user session shared by every request.
//!
//! The console keeps the secret key and the user profile in persistent
//! browser storage. Those values are read once at start-up into a
//! [`Session`], which is then handed to the [`crate::APIClient`].

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Header carrying the secret key on every authenticated request.
pub const SECRET_KEY_HEADER: &str = "secret_key";

/// Persistent storage key holding the secret key.
pub const SECRET_KEY_STORAGE_KEY: &str = "secretKey";

/// Persistent storage key holding the user profile as JSON.
pub const USER_STORAGE_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    secret_key: Option<Arc<SecretString>>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn new(secret_key: impl Into<String>, user: Option<UserProfile>) -> Self {
        Self {
            secret_key: non_empty_secret(secret_key.into()),
            user,
        }
    }

    /// A session without credentials. Every authenticated request made with
    /// it fails locally.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a session from the raw values found in persistent storage.
    ///
    /// A user blob that doesn't parse is dropped rather than failing the
    /// whole session; the key alone is enough to talk to the backend.
    pub fn from_stored(
        secret_key: Option<String>,
        user_json: Option<&str>,
    ) -> Self {
        let user = user_json.and_then(|json| {
            serde_json::from_str::<UserProfile>(json)
                .inspect_err(|e| {
                    tracing::warn!("Ignoring unreadable stored user: {e}")
                })
                .ok()
        });
        Self {
            secret_key: secret_key.and_then(non_empty_secret),
            user,
        }
    }

    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref().map(|key| key.expose_secret())
    }

    pub fn is_authenticated(&self) -> bool {
        self.secret_key.is_some()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|user| user.id)
    }
}

fn non_empty_secret(key: String) -> Option<Arc<SecretString>> {
    if key.trim().is_empty() {
        None
    } else {
        Some(Arc::new(SecretString::from(key)))
    }
}
