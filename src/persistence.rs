use std::collections::HashMap;

use thiserror::Error;

pub const USER_ID_KEY: &str = "user_id";
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("reading '{key}' failed: {message}")]
    Read { key: String, message: String },
    #[error("writing '{key}' failed: {message}")]
    Write { key: String, message: String },
}

/// String key-value store with the semantics of `window.localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store for host builds and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::JsValue;
    use web_sys::Storage;

    use super::{KeyValueStore, StoreError};

    /// `window.localStorage`, or nothing when the page has no access to it
    /// (sandboxed iframes, storage disabled by the user).
    pub struct BrowserStorage {
        inner: Option<Storage>,
    }

    impl BrowserStorage {
        pub fn local() -> Self {
            let inner = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
            if inner.is_none() {
                log::warn!("window.localStorage is not available");
            }
            Self { inner }
        }

        fn storage(&self) -> Result<&Storage, StoreError> {
            self.inner.as_ref().ok_or(StoreError::Unavailable)
        }
    }

    impl KeyValueStore for BrowserStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.storage()?
                .get_item(key)
                .map_err(|err| StoreError::Read {
                    key: key.to_string(),
                    message: js_message(&err),
                })
        }

        fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.storage()?
                .set_item(key, value)
                .map_err(|err| StoreError::Write {
                    key: key.to_string(),
                    message: js_message(&err),
                })
        }
    }

    fn js_message(value: &JsValue) -> String {
        value.as_string().unwrap_or_else(|| format!("{value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_overwrites_existing_value() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_item(THEME_KEY), Ok(None));

        store.set_item(THEME_KEY, "dark").expect("write should succeed");
        store.set_item(THEME_KEY, "light").expect("write should succeed");

        assert_eq!(store.get_item(THEME_KEY), Ok(Some("light".to_string())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn store_errors_name_the_key() {
        let err = StoreError::Write {
            key: USER_ID_KEY.to_string(),
            message: "QuotaExceededError".to_string(),
        };
        assert_eq!(err.to_string(), "writing 'user_id' failed: QuotaExceededError");
    }
}
