use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::{Map, Value};

use crate::error::{ProserError, Result};

/// Key-value persistence used to keep results across invocations.
pub trait SessionState {
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn update(&mut self, key: &str, value: Value) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

pub fn default_state_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "proser").map(|dirs| dirs.data_local_dir().join("state.json"))
}

/// All keys live in one JSON object on disk, rewritten on every change.
#[derive(Debug, Clone)]
pub struct JsonFileState {
    path: PathBuf,
}

impl JsonFileState {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| self.persistence(e))?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&raw).map_err(|e| self.persistence(e))
    }

    fn save(&self, entries: &Map<String, Value>) -> Result<()> {
        // create the data directory if it doesn't exist yet
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.persistence(e))?;
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| self.persistence(e))?;
        fs::write(&self.path, json).map_err(|e| self.persistence(e))
    }

    fn persistence(&self, err: impl std::fmt::Display) -> ProserError {
        ProserError::Persistence(format!("{}: {}", self.path.display(), err))
    }
}

impl SessionState for JsonFileState {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load()?.remove(key))
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value);
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// In-process state, for embedding hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryState {
    entries: HashMap<String, Value>,
    read_only: bool,
    writes: usize,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state whose writes always fail with `Persistence`.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn check_writable(&self, key: &str) -> Result<()> {
        if self.read_only {
            return Err(ProserError::Persistence(format!(
                "state is read-only, cannot write {key}"
            )));
        }
        Ok(())
    }
}

impl SessionState for MemoryState {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn update(&mut self, key: &str, value: Value) -> Result<()> {
        self.check_writable(key)?;
        self.entries.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check_writable(key)?;
        self.entries.remove(key);
        Ok(())
    }
}
