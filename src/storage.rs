//! Local Persistence Helpers
//!
//! JSON blobs under string keys in the browser's localStorage. Every failure
//! (missing storage, quota, corrupt JSON) is logged as a warning and degrades
//! to a no-op or the supplied default; callers never see an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::Storage;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Serialize `value` under `key`. Failures degrade to a no-op.
pub fn save_to_storage<T: Serialize>(key: &str, value: &T) {
    let Some(storage) = local_storage() else {
        return;
    };

    match serde_json::to_string(value) {
        Ok(json) => {
            if let Err(e) = storage.set_item(key, &json) {
                web_sys::console::warn_1(
                    &format!("Failed to save to localStorage: {e:?}").into(),
                );
            }
        }
        Err(e) => {
            web_sys::console::warn_1(&format!("Failed to serialize {key}: {e}").into());
        }
    }
}

/// Load and deserialize the value under `key`, or return `default` when the
/// key is absent or the stored blob is corrupt.
pub fn load_from_storage<T: DeserializeOwned>(key: &str, default: T) -> T {
    let Some(storage) = local_storage() else {
        return default;
    };

    match storage.get_item(key) {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => value,
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("Failed to load from localStorage: {e}").into(),
                );
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            web_sys::console::warn_1(&format!("Failed to load from localStorage: {e:?}").into());
            default
        }
    }
}

/// Remove the value under `key`, if any.
pub fn remove_from_storage(key: &str) {
    let Some(storage) = local_storage() else {
        return;
    };

    if let Err(e) = storage.remove_item(key) {
        web_sys::console::warn_1(&format!("Failed to remove from localStorage: {e:?}").into());
    }
}
