use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::debug;
use crate::error::{Error, Result};

/// A JSON file holding an array of records.
///
/// Appends from the same process are serialized. Every write goes to a temporary file
/// next to the target that then replaces it, so readers never observe a half written
/// array.
#[derive(Debug)]
pub struct JsonArrayStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonArrayStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        JsonArrayStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `record` and returns the number of records now stored.
    pub fn append<T: Serialize>(&self, record: &T) -> Result<usize> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Msg(format!("store {} is poisoned", self.path.display())))?;

        let mut records = self.read_values()?;
        records.push(serde_json::to_value(record)?);
        self.write_values(&records)?;

        debug!(
            "[records] {} now holds {} records",
            self.path.display(),
            records.len()
        );
        Ok(records.len())
    }

    /// Every stored record.
    pub fn records<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.read_values()?
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(Error::from))
            .collect()
    }

    fn read_values(&self) -> Result<Vec<Value>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Array(values) => Ok(values),
            _ => Err(Error::JsonError(format!(
                "{} does not hold a JSON array",
                self.path.display()
            ))),
        }
    }

    fn write_values(&self, records: &[Value]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut file, records)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path)?;
        Ok(())
    }
}
