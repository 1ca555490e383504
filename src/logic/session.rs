//! Session Identity
//!
//! Client-generated token scoping prediction history. Generated once,
//! then read back from local storage on every run. There is no server
//! round-trip; the backend only uses it as a filter key.

use uuid::{Uuid, Version};

use super::storage::LocalStore;
use crate::constants::SESSION_KEY;

/// Return the stored session token, generating and persisting one if absent
pub fn session_id(store: &dyn LocalStore) -> String {
    if let Some(id) = store.get_item(SESSION_KEY).filter(|id| !id.is_empty()) {
        if !is_session_token(&id) {
            log::debug!("Stored session token is not a v4 UUID, keeping it as-is");
        }
        return id;
    }

    let id = generate_token();
    if let Err(e) = store.set_item(SESSION_KEY, &id) {
        // Token still usable for this run
        log::warn!("Could not persist session token: {}", e);
    }
    log::info!("New session: {}", id);
    id
}

/// Forget the stored token so the next run starts a fresh session
pub fn reset(store: &dyn LocalStore) -> Result<(), super::storage::StorageError> {
    store.remove_item(SESSION_KEY)?;
    log::info!("Session token cleared");
    Ok(())
}

/// Random version-4 UUID in hyphenated lowercase form
pub fn generate_token() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

/// Whether `token` has the shape of a version-4 UUID
pub fn is_session_token(token: &str) -> bool {
    Uuid::try_parse(token)
        .map(|id| id.get_version() == Some(Version::Random))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::storage::MemoryStore;

    #[test]
    fn test_session_id_is_idempotent() {
        let store = MemoryStore::new();

        let first = session_id(&store);
        let second = session_id(&store);

        assert_eq!(first, second);
        assert_eq!(store.get_item(SESSION_KEY), Some(first));
    }

    #[test]
    fn test_generated_token_is_v4_shaped() {
        let store = MemoryStore::new();
        let token = session_id(&store);

        assert!(is_session_token(&token));
        assert_eq!(token.len(), 36);
        assert_eq!(&token[14..15], "4");
        assert!(matches!(&token[19..20], "8" | "9" | "a" | "b"));
    }

    #[test]
    fn test_stored_token_is_returned_verbatim() {
        let store = MemoryStore::new();
        store.set_item(SESSION_KEY, "3f0c2a7e-1b2d-4c3e-9f00-0123456789ab").unwrap();

        assert_eq!(session_id(&store), "3f0c2a7e-1b2d-4c3e-9f00-0123456789ab");
    }

    #[test]
    fn test_reset_generates_new_token() {
        let store = MemoryStore::new();
        let before = session_id(&store);
        reset(&store).unwrap();
        let after = session_id(&store);

        assert_ne!(before, after);
    }

    #[test]
    fn test_rejects_non_v4_shapes() {
        assert!(!is_session_token("not-a-uuid"));
        // version 1
        assert!(!is_session_token("c232ab00-9414-11ec-b3c8-9f6bdeced846"));
    }
}
