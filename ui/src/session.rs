//! The signed-in session, as left in local storage by the login flow.

use payloads::Session;
use payloads::session::{SECRET_KEY_STORAGE_KEY, USER_STORAGE_KEY};

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Read the secret key and user profile once. Anything missing or
/// unreadable yields an anonymous session, whose requests then fail
/// locally.
pub fn load_session() -> Session {
    let Some(storage) = local_storage() else {
        tracing::warn!("Local storage unavailable, continuing signed out");
        return Session::anonymous();
    };
    let secret_key = storage.get_item(SECRET_KEY_STORAGE_KEY).ok().flatten();
    let user = storage.get_item(USER_STORAGE_KEY).ok().flatten();

    let session = Session::from_stored(secret_key, user.as_deref());
    if !session.is_authenticated() {
        tracing::warn!("No secret key stored, requests will be refused");
    }
    session
}
