//! The signed-in session: bearer token plus display name, persisted in
//! browser storage and owned by the application root.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_NAME_KEY: &str = "userName";

/// String key/value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`. Every access is best-effort: a browser that
/// denies storage behaves like an empty store.
#[derive(Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                tracing::warn!(key, "local storage rejected write");
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

type ExpiryHook = Rc<dyn Fn()>;

/// Handle to the session. Clones share the same store and expiry hook.
#[derive(Clone)]
pub struct Session {
    store: Rc<dyn KeyValueStore>,
    on_expired: Rc<RefCell<Option<ExpiryHook>>>,
}

impl Session {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            on_expired: Rc::new(RefCell::new(None)),
        }
    }

    pub fn browser() -> Self {
        Self::new(Rc::new(LocalStore))
    }

    pub fn in_memory() -> Self {
        Self::new(Rc::new(MemoryStore::default()))
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn user_name(&self) -> Option<String> {
        self.store.get(USER_NAME_KEY)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn begin(&self, token: &str, user_name: &str) {
        self.store.set(AUTH_TOKEN_KEY, token);
        self.store.set(USER_NAME_KEY, user_name);
        tracing::info!(user = user_name, "session started");
    }

    /// Local sign-out; the backend keeps no session to tear down.
    pub fn end(&self) {
        self.store.remove(AUTH_TOKEN_KEY);
        self.store.remove(USER_NAME_KEY);
        tracing::info!("session ended");
    }

    /// The backend rejected our token: forget it and notify the app shell.
    pub fn expire(&self) {
        self.end();
        tracing::warn!("session expired, returning to login");
        let hook = self.on_expired.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    pub fn set_expiry_hook(&self, hook: impl Fn() + 'static) {
        *self.on_expired.borrow_mut() = Some(Rc::new(hook));
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("user_name", &self.user_name())
            .finish()
    }
}
