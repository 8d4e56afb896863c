//! High score storage backends
//!
//! The stored value is a single base-10 integer in plain text.
//! - `FileStorage`: native, file replaced via write-then-rename
//! - `LocalStorage`: browser, one LocalStorage key
//! - `MemoryStorage`: shared in-process cell (tests, headless runs)

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Errors from a storage backend
#[derive(Debug)]
pub enum PersistError {
    /// Filesystem failure
    Io(std::io::Error),
    /// No storage available (e.g. LocalStorage disabled)
    Unavailable,
    /// The backend refused the write
    Rejected(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "I/O error: {}", e),
            PersistError::Unavailable => write!(f, "Storage unavailable"),
            PersistError::Rejected(reason) => write!(f, "Write rejected: {}", reason),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(error: std::io::Error) -> Self {
        PersistError::Io(error)
    }
}

/// Where the high score text lives
pub trait ScoreStorage: fmt::Debug {
    /// Current contents, `None` if nothing has been stored yet
    fn read(&self) -> Result<Option<String>, PersistError>;

    /// Replace the contents
    fn write(&mut self, contents: &str) -> Result<(), PersistError>;
}

/// Plain text file on disk
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ScoreStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistError> {
        // Readers only ever see the old file or the complete new one
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = std::path::PathBuf::from(tmp);
        std::fs::write(&tmp, contents)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Browser LocalStorage under a fixed key
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorage {
    key: &'static str,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub const HIGH_SCORE_KEY: &'static str = "flappy_highscore";

    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStorage for LocalStorage {
    fn read(&self) -> Result<Option<String>, PersistError> {
        Self::storage()?
            .get_item(self.key)
            .map_err(|e| PersistError::Rejected(format!("{:?}", e)))
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(self.key, contents)
            .map_err(|e| PersistError::Rejected(format!("{:?}", e)))
    }
}

/// In-memory storage; clones share the same cell
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    contents: Rc<RefCell<Option<String>>>,
    fail_writes: Rc<RefCell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: &str) -> Self {
        let storage = Self::new();
        *storage.contents.borrow_mut() = Some(contents.to_string());
        storage
    }

    /// What is currently stored
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        *self.fail_writes.borrow_mut() = fail;
    }
}

impl ScoreStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, PersistError> {
        Ok(self.contents())
    }

    fn write(&mut self, contents: &str) -> Result<(), PersistError> {
        if *self.fail_writes.borrow() {
            return Err(PersistError::Rejected("writes disabled".to_string()));
        }
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_clones_share_contents() {
        let storage = MemoryStorage::new();
        let mut writer = storage.clone();
        assert_eq!(storage.read().unwrap(), None);
        writer.write("42").unwrap();
        assert_eq!(storage.contents().as_deref(), Some("42"));

        storage.set_fail_writes(true);
        assert!(matches!(writer.write("43"), Err(PersistError::Rejected(_))));
        assert_eq!(storage.contents().as_deref(), Some("42"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_storage_round_trip() {
        let dir = std::env::temp_dir().join(format!("flappy-persist-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("highscore.txt");
        let _ = std::fs::remove_file(&path);

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.read().unwrap(), None);
        storage.write("17").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("17"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "17");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_storage_write_failure_is_reported() {
        let path = std::env::temp_dir()
            .join(format!("flappy-missing-dir-{}", std::process::id()))
            .join("highscore.txt");
        let mut storage = FileStorage::new(path);
        assert!(matches!(storage.write("1"), Err(PersistError::Io(_))));
    }
}
