use std::{cell::RefCell, collections::HashMap, rc::Rc};
use web_sys::{Storage, Window};

/// Durable string key-value storage shared by the session and lockout state.
///
/// Implementations never fail towards the caller: an unavailable backend reads
/// as empty and silently drops writes.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[cfg(target_arch = "wasm32")]
pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "No window object".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn window() -> Result<Window, String> {
    Err("No window object".to_string())
}

pub fn local_storage() -> Result<Storage, String> {
    window()?
        .local_storage()
        .map_err(|_| "No localStorage".to_string())?
        .ok_or_else(|| "No localStorage".to_string())
}

/// `window.localStorage`, resolved on every call so a storage that appears or
/// disappears at runtime is picked up.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        let storage = match local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                log::debug!("storage read of {} skipped: {}", key, err);
                return None;
            }
        };
        storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match local_storage() {
            Ok(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("failed to persist {}", key);
                }
            }
            Err(err) => log::debug!("storage write of {} skipped: {}", key, err),
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// In-process storage. Clones share the same map, which lets tests simulate a
/// process restart by building a fresh store over the same instance.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Storage that is switched off entirely (private mode, quota, policy).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl KeyValueStore for UnavailableStorage {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, _key: &str, _value: &str) {}

    fn remove(&self, _key: &str) {}
}

pub fn get_i64(store: &dyn KeyValueStore, key: &str) -> Option<i64> {
    store.get(key).and_then(|raw| raw.trim().parse().ok())
}

pub fn get_u32(store: &dyn KeyValueStore, key: &str) -> Option<u32> {
    store.get(key).and_then(|raw| raw.trim().parse().ok())
}
