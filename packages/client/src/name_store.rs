//! Remembered display name.
//!
//! The server assigns a fresh default name on every connection. The client
//! keeps the last name the user chose and re-applies it after each `init`.

use crate::state::ClientState;

/// Must be `Sync` because sessions hold `&dyn NameStore` across awaits.
pub trait NameStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&mut self, name: &str);
}

/// In-process store, seeded from `--name`
#[derive(Debug, Clone, Default)]
pub struct MemoryNameStore {
    name: Option<String>,
}

impl MemoryNameStore {
    pub fn new(initial: Option<String>) -> Self {
        let name = initial
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Self { name }
    }
}

impl NameStore for MemoryNameStore {
    fn load(&self) -> Option<String> {
        self.name.clone()
    }

    fn save(&mut self, name: &str) {
        let name = name.trim();
        if !name.is_empty() {
            self.name = Some(name.to_string());
        }
    }
}

/// Name to send with `set-name` so the server matches the remembered one
pub fn name_to_apply(state: &ClientState, store: &dyn NameStore) -> Option<String> {
    let wanted = store.load()?;
    match state.current_user() {
        Some(user) if user.name == wanted => None,
        Some(_) => Some(wanted),
        None => None,
    }
}
