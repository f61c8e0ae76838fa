//! Persistent token storage
//!
//! The session token is the only thing the client persists. It lives under a
//! single `token` key in a small JSON key/value file, the terminal stand-in
//! for browser local storage. No key means logged out.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key holding the bearer token
pub const TOKEN_KEY: &str = "token";

/// Storage for the single session token.
///
/// Implementations never fail: when the medium is missing or broken, reads
/// report no token and writes are dropped.
pub trait TokenStore: Send + Sync {
    /// Current token, if one is stored
    fn get(&self) -> Option<String>;

    /// Replace the stored token
    fn set(&self, token: &str);

    /// Forget the stored token
    fn remove(&self);

    /// Whether a storage medium backs this store
    fn is_available(&self) -> bool {
        true
    }
}

/// File-backed key/value storage
#[derive(Debug)]
pub struct LocalStorage {
    path: Option<PathBuf>,
}

impl LocalStorage {
    /// Storage backed by the file at `path` (created on first write)
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Storage with no backing medium
    pub fn unavailable() -> Self {
        Self { path: None }
    }

    /// Storage at `path` when known, otherwise unavailable storage
    pub fn at(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::open(path),
            None => {
                log::warn!("No storage location available; session will not persist");
                Self::unavailable()
            }
        }
    }

    fn read_entries(path: &Path) -> Map<String, Value> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                log::warn!("Failed to read storage {}: {}", path.display(), e);
                return Map::new();
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                log::warn!("Ignoring corrupt storage file {}", path.display());
                Map::new()
            }
        }
    }

    fn write_entries(path: &Path, entries: &Map<String, Value>) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(path, contents)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Map<String, Value>)) {
        let Some(path) = self.path.as_deref() else {
            return;
        };

        let mut entries = Self::read_entries(path);
        apply(&mut entries);

        if let Err(e) = Self::write_entries(path, &entries) {
            log::warn!("Failed to write storage {}: {}", path.display(), e);
        }
    }
}

impl TokenStore for LocalStorage {
    fn get(&self) -> Option<String> {
        let path = self.path.as_deref()?;
        match Self::read_entries(path).remove(TOKEN_KEY) {
            Some(Value::String(token)) => Some(token),
            _ => None,
        }
    }

    fn set(&self, token: &str) {
        self.update(|entries| {
            entries.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        });
    }

    fn remove(&self) {
        // Nothing to do when the file was never written
        if self.path.as_deref().is_some_and(|p| !p.exists()) {
            return;
        }
        self.update(|entries| {
            entries.remove(TOKEN_KEY);
        });
    }

    fn is_available(&self) -> bool {
        self.path.is_some()
    }
}

/// In-memory store for tests and throwaway sessions
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn set(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn remove(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}
