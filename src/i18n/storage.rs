use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;

/// Durable key-value slot holding the last chosen language code.
pub trait LanguageStore {
    /// Returns the stored code, if any. Read failures are treated as "nothing stored".
    fn load(&self) -> Option<String>;

    fn save(&self, code: &str) -> Result<()>;
}

/// Stores the language code as the sole content of a file.
#[derive(Debug, Clone)]
pub struct FileLanguageStore {
    path: PathBuf,
}

impl FileLanguageStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileLanguageStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LanguageStore for FileLanguageStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .filter(|code| !code.is_empty())
    }

    fn save(&self, code: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, code)?;
        Ok(())
    }
}

/// In-memory store, for tests and for callers that do not persist the choice.
#[derive(Debug, Default)]
pub struct MemoryLanguageStore {
    value: Mutex<Option<String>>,
}

impl MemoryLanguageStore {
    pub fn with_value(code: &str) -> Self {
        MemoryLanguageStore {
            value: Mutex::new(Some(code.to_string())),
        }
    }
}

impl LanguageStore for MemoryLanguageStore {
    fn load(&self) -> Option<String> {
        self.value.lock().ok().and_then(|value| value.clone())
    }

    fn save(&self, code: &str) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| "language store lock poisoned")?;
        *value = Some(code.to_string());
        Ok(())
    }
}
