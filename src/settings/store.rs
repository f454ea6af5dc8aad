//! Key/value settings storage with deferred writes.
//!
//! `set` only updates memory and marks the store dirty; the file is written
//! once the write delay has passed (`flush_if_due`) or on `flush`. Readers see
//! their own writes immediately, the disk copy is eventually consistent.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

const SETTINGS_DIR: &str = "message-navigator";
const SETTINGS_FILENAME: &str = "settings.json";

/// Delay between the last `set` and the file write
pub const DEFAULT_WRITE_DELAY: Duration = Duration::from_millis(1000);

/// Host settings storage as seen by the navigator
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&mut self, key: &str, value: Value);

    /// Persist deferred writes whose delay has elapsed. Returns whether a
    /// write happened. Stores without persistence have nothing to do.
    fn flush_if_due(&mut self, _now: Instant) -> Result<bool> {
        Ok(false)
    }
}

/// In-memory store (tests and hosts without persistence)
#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: HashMap<String, Value>,
    writes: usize,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.writes += 1;
        self.values.insert(key.to_string(), value);
    }
}

/// Platform config location: `<config_dir>/message-navigator/settings.json`
pub fn default_settings_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Failed to get platform config directory")?;
    Ok(base.join(SETTINGS_DIR).join(SETTINGS_FILENAME))
}

/// JSON file backed store with debounced, atomic writes
#[derive(Debug)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
    values: Map<String, Value>,
    write_delay: Duration,
    write_due: Option<Instant>,
}

impl JsonFileSettingsStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() { read_settings_file(&path)? } else { Map::new() };

        tracing::debug!(path = %path.display(), keys = values.len(), "Opened settings store");
        Ok(Self { path, values, write_delay: DEFAULT_WRITE_DELAY, write_due: None })
    }

    pub fn with_write_delay(mut self, delay: Duration) -> Self {
        self.write_delay = delay;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.write_due.is_some()
    }

    /// Write pending changes now (temp file + rename)
    pub fn flush(&mut self) -> Result<()> {
        if self.write_due.is_none() {
            return Ok(());
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).context("Failed to create settings directory")?;
        }

        let json = serde_json::to_string_pretty(&self.values)
            .context("Failed to serialize settings")?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, json).context("Failed to write settings temp file")?;
        fs::rename(&temp, &self.path).context("Failed to rename settings temp file")?;

        self.write_due = None;
        tracing::debug!(path = %self.path.display(), "Settings written");
        Ok(())
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
        self.write_due = Some(Instant::now() + self.write_delay);
    }

    fn flush_if_due(&mut self, now: Instant) -> Result<bool> {
        match self.write_due {
            Some(due) if now >= due => {
                self.flush()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

// Pending writes are not lost when the host shuts down
impl Drop for JsonFileSettingsStore {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "Failed to write settings on exit"
            );
        }
    }
}

fn read_settings_file(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?
    {
        Value::Object(map) => Ok(map),
        _ => bail!("Settings file is not a JSON object: {}", path.display()),
    }
}
