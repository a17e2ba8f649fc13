use crate::domain::ports::KeyValueStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_storage_key;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// In-process store, mostly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
    flushes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Directory-backed store keeping each key in `<base_path>/<key>.json`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    dirty: Vec<PathBuf>,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            dirty: Vec::new(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key("storage.key", key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.key_path(key)?;
        match fs::read_to_string(&full_path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let full_path = self.key_path(key)?;
        fs::create_dir_all(&self.base_path)?;

        // 先寫暫存檔再 rename，避免留下半寫入的檔案
        let tmp_path = full_path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &full_path)?;

        if !self.dirty.contains(&full_path) {
            self.dirty.push(full_path);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let full_path = self.key_path(key)?;
        match fs::remove_file(&full_path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.dirty.retain(|path| path != &full_path);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // a path leaves the dirty list only once it has been synced
        while let Some(path) = self.dirty.first() {
            File::open(path)?.sync_all()?;
            self.dirty.remove(0);
        }
        Ok(())
    }
}
