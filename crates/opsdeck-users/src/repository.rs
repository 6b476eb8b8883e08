//! Storage for the user collection
//!
//! The directory reads the whole collection once and writes it back wholesale
//! after every change. There is no merging: the last save wins.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::UserStoreResult;
use crate::model::User;

/// File name used by [`JsonFileUserRepository::with_defaults`]
pub const USERS_FILE_NAME: &str = "users.json";

/// Repository trait for loading and saving the user collection
pub trait UserRepository: Send + Sync {
    /// Load every stored user; an empty store yields an empty list
    fn load(&self) -> UserStoreResult<Vec<User>>;

    /// Replace the stored collection with `users`
    fn save(&self, users: &[User]) -> UserStoreResult<()>;
}

/// JSON file backed user repository
#[derive(Debug, Clone)]
pub struct JsonFileUserRepository {
    path: PathBuf,
}

impl JsonFileUserRepository {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Repository at `<base>/users.json`
    pub fn with_defaults<P: AsRef<Path>>(base_path: P) -> Self {
        Self::new(base_path.as_ref().join(USERS_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserRepository for JsonFileUserRepository {
    fn load(&self) -> UserStoreResult<Vec<User>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "User store missing, starting empty");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let users: Vec<User> = serde_json::from_str(&content)?;
        info!(path = %self.path.display(), count = users.len(), "Loaded users");
        Ok(users)
    }

    fn save(&self, users: &[User]) -> UserStoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(users)?;
        std::fs::write(&self.path, content)?;
        info!(path = %self.path.display(), count = users.len(), "Saved users");
        Ok(())
    }
}

/// In-memory user repository (for testing)
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    saves: AtomicUsize,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of times [`UserRepository::save`] has been called
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored collection
    pub fn stored(&self) -> Vec<User> {
        self.users.read().clone()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn load(&self) -> UserStoreResult<Vec<User>> {
        Ok(self.users.read().clone())
    }

    fn save(&self, users: &[User]) -> UserStoreResult<()> {
        *self.users.write() = users.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::seed_users;
    use tempfile::TempDir;

    #[test]
    fn test_file_repository_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileUserRepository::with_defaults(dir.path());

        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_repository_round_trip_creates_parents() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileUserRepository::new(dir.path().join("nested/store/users.json"));
        let users = seed_users();

        repo.save(&users).unwrap();

        assert!(repo.path().exists());
        assert_eq!(repo.load().unwrap(), users);
    }

    #[test]
    fn test_file_repository_rejects_corrupt_json() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileUserRepository::with_defaults(dir.path());
        std::fs::write(repo.path(), "{not json").unwrap();

        assert!(repo.load().is_err());
    }

    #[test]
    fn test_in_memory_last_save_wins() {
        let repo = InMemoryUserRepository::new();
        let users = seed_users();

        repo.save(&users).unwrap();
        repo.save(&users[..2]).unwrap();

        assert_eq!(repo.load().unwrap().len(), 2);
        assert_eq!(repo.save_count(), 2);
    }
}
