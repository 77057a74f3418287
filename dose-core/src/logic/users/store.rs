//! User Store - JSON snapshot of username → password
//!
//! The whole mapping is read, modified and rewritten on every signup.
//! Passwords are stored verbatim; there is no hashing and no rate limiting.
//!
//! ## Failure policy
//! - Missing or corrupt file → empty mapping
//! - Failed write → logged, never returned to the caller

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Username → password
pub type UserMap = BTreeMap<String, String>;

// ============================================================================
// ERRORS
// ============================================================================

/// Why a signup was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    /// Username is already taken
    AlreadyExists(String),
}

impl std::fmt::Display for SignupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists(name) => write!(f, "User already exists: {}", name),
        }
    }
}

impl std::error::Error for SignupError {}

/// Why a login was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Unknown username or wrong password
    InvalidCredentials,
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid credentials"),
        }
    }
}

impl std::error::Error for LoginError {}

// ============================================================================
// STORE
// ============================================================================

/// File-backed user store
pub struct UserStore {
    file_path: PathBuf,
    /// Serializes read/modify/write cycles within this process
    write_lock: Mutex<()>,
}

impl UserStore {
    /// Open the store, creating parent directories and an empty `{}` file if absent
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let file_path = path.into();

        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    log::warn!("Cannot create user store directory {}: {}", parent.display(), e);
                }
            }
        }

        let store = Self {
            file_path,
            write_lock: Mutex::new(()),
        };

        if !store.file_path.exists() {
            store.save(&UserMap::new());
            log::info!("User store created at {}", store.file_path.display());
        }

        store
    }

    /// Path of the backing file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Current mapping; never fails
    pub fn load(&self) -> UserMap {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("User store unreadable ({}), treating as empty", e);
                return UserMap::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("User store corrupt ({}), treating as empty", e);
            UserMap::new()
        })
    }

    /// Overwrite the snapshot with `users`. Failures are logged only.
    pub fn save(&self, users: &UserMap) {
        if let Err(e) = self.write_snapshot(users) {
            log::error!("Error saving users to {}: {}", self.file_path.display(), e);
        }
    }

    fn write_snapshot(&self, users: &UserMap) -> std::io::Result<()> {
        let content = serde_json::to_string(users)?;

        // Write next to the target then rename so readers never see a half file
        let tmp_path = self.file_path.with_extension("json.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.file_path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp_path);
        })
    }

    /// Insert a new user and persist the snapshot
    pub fn register(&self, username: &str, password: &str) -> Result<(), SignupError> {
        let _guard = self.write_lock.lock();

        let mut users = self.load();
        if users.contains_key(username) {
            log::info!("Signup rejected, username taken: {}", username);
            return Err(SignupError::AlreadyExists(username.to_string()));
        }

        users.insert(username.to_string(), password.to_string());
        self.save(&users);

        log::info!("New user registered: {}", username);
        Ok(())
    }

    /// Exact match of the stored password
    pub fn authenticate(&self, username: &str, password: &str) -> Result<(), LoginError> {
        match self.load().get(username) {
            Some(stored) if stored == password => Ok(()),
            _ => {
                log::info!("Login failed for {}", username);
                Err(LoginError::InvalidCredentials)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, UserStore) {
        let dir = TempDir::new().unwrap();
        let store = UserStore::open(dir.path().join("Logs").join("users.json"));
        (dir, store)
    }

    #[test]
    fn test_open_creates_empty_file() {
        let (_dir, store) = temp_store();
        assert!(store.file_path().exists());
        assert_eq!(fs::read_to_string(store.file_path()).unwrap(), "{}");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_open_keeps_existing_users() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, r#"{"alice":"secret"}"#).unwrap();

        let store = UserStore::open(&path);
        assert_eq!(store.load().get("alice").map(String::as_str), Some("secret"));
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        fs::write(store.file_path(), "not json at all").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        fs::remove_file(store.file_path()).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_register_then_authenticate() {
        let (_dir, store) = temp_store();
        store.register("alice", "pw1").unwrap();

        assert!(store.authenticate("alice", "pw1").is_ok());
        assert_eq!(store.authenticate("alice", "wrong"), Err(LoginError::InvalidCredentials));
        assert_eq!(store.authenticate("bob", "pw1"), Err(LoginError::InvalidCredentials));
    }

    #[test]
    fn test_duplicate_register_does_not_mutate() {
        let (_dir, store) = temp_store();
        store.register("alice", "original").unwrap();
        let before = fs::read_to_string(store.file_path()).unwrap();

        let result = store.register("alice", "changed");
        assert_eq!(result, Err(SignupError::AlreadyExists("alice".to_string())));

        assert_eq!(fs::read_to_string(store.file_path()).unwrap(), before);
        assert!(store.authenticate("alice", "original").is_ok());
    }

    #[test]
    fn test_save_overwrites_snapshot() {
        let (_dir, store) = temp_store();
        store.register("alice", "a").unwrap();

        let mut users = UserMap::new();
        users.insert("bob".to_string(), "b".to_string());
        store.save(&users);

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("bob"));
    }

    #[test]
    fn test_failed_write_is_not_propagated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        fs::create_dir(&path).unwrap();

        // A directory where the snapshot should be: every write fails
        let store = UserStore::open(&path);
        assert_eq!(store.register("alice", "pw"), Ok(()));

        assert!(store.load().is_empty());
        assert_eq!(store.authenticate("alice", "pw"), Err(LoginError::InvalidCredentials));
        assert!(!dir.path().join("users.json.tmp").exists());
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");

        UserStore::open(&path).register("carol", "pw").unwrap();
        assert!(UserStore::open(&path).authenticate("carol", "pw").is_ok());
    }
}
