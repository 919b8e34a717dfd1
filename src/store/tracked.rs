// Tracked-forecast store.
// Keeps forecast snapshots keyed by location and date, persisted as one JSON object.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::weather::Forecast;

/// Build the tracking key for a location and date, e.g. `new york|2025-03-24`.
pub fn tracking_key(location: &str, date: NaiveDate) -> String {
    format!(
        "{}|{}",
        location.trim().to_lowercase(),
        date.format("%Y-%m-%d")
    )
}

/// A forecast snapshot saved for later updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntry {
    pub key: String,
    pub forecast: Forecast,
    pub created_at: DateTime<Utc>,
    /// Discord user id of whoever asked for tracking.
    #[serde(default)]
    pub requested_by: Option<String>,
    /// Channel the request came from.
    #[serde(default)]
    pub channel_id: Option<u64>,
}

impl TrackedEntry {
    pub fn new(key: impl Into<String>, forecast: Forecast) -> Self {
        Self {
            key: key.into(),
            forecast,
            created_at: Utc::now(),
            requested_by: None,
            channel_id: None,
        }
    }

    pub fn requested_by(mut self, requester: impl Into<String>) -> Self {
        self.requested_by = Some(requester.into());
        self
    }

    pub fn in_channel(mut self, channel_id: Option<u64>) -> Self {
        self.channel_id = channel_id;
        self
    }
}

/// File-backed map of tracking key to [`TrackedEntry`].
///
/// Every mutation is staged on a copy and only replaces the in-memory map
/// once the file write succeeds.
#[derive(Debug)]
pub struct TrackedStore {
    path: PathBuf,
    entries: BTreeMap<String, TrackedEntry>,
}

impl TrackedStore {
    /// Load the store from `path`. A missing or unreadable file yields an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => parse_entries(&path, &contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No tracked forecasts file yet");
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "Could not read tracked forecasts: {}", e);
                BTreeMap::new()
            }
        };

        tracing::info!(count = entries.len(), "Loaded tracked forecasts");
        Self { path, entries }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&TrackedEntry> {
        self.entries.get(key)
    }

    /// All entries, ordered by key.
    pub fn list(&self) -> Vec<&TrackedEntry> {
        self.entries.values().collect()
    }

    /// Insert or overwrite `entry` under its own key.
    pub fn add(&mut self, entry: TrackedEntry) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        next.insert(entry.key.clone(), entry);
        self.commit(next)
    }

    /// Remove the entry for a location and date. Returns whether one existed.
    pub fn remove(&mut self, location: &str, date: NaiveDate) -> Result<bool, StoreError> {
        let key = tracking_key(location, date);
        if !self.entries.contains_key(&key) {
            return Ok(false);
        }

        let mut next = self.entries.clone();
        next.remove(&key);
        self.commit(next)?;
        Ok(true)
    }

    /// Replace the forecast of existing entries with fresh data. Unknown keys are ignored.
    pub fn refresh(&mut self, updates: Vec<(String, Forecast)>) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        let mut changed = false;
        for (key, forecast) in updates {
            if let Some(entry) = next.get_mut(&key) {
                entry.forecast = forecast;
                changed = true;
            }
        }

        if !changed {
            return Ok(());
        }
        self.commit(next)
    }

    /// Remove and return entries dated before `today`.
    pub fn prune_before(&mut self, today: NaiveDate) -> Result<Vec<TrackedEntry>, StoreError> {
        let (past, kept): (BTreeMap<_, _>, BTreeMap<_, _>) = self
            .entries
            .clone()
            .into_iter()
            .partition(|(_, entry)| entry.forecast.date < today);

        if past.is_empty() {
            return Ok(Vec::new());
        }

        self.commit(kept)?;
        Ok(past.into_values().collect())
    }

    /// Remove every entry and persist an empty object.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.commit(BTreeMap::new())
    }

    fn commit(&mut self, next: BTreeMap<String, TrackedEntry>) -> Result<(), StoreError> {
        write_entries(&self.path, &next)?;
        self.entries = next;
        Ok(())
    }
}

/// Parse file contents, skipping entries that no longer deserialize.
fn parse_entries(path: &Path, contents: &str) -> BTreeMap<String, TrackedEntry> {
    if contents.trim().is_empty() {
        return BTreeMap::new();
    }

    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(contents) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), "Malformed tracked forecasts file: {}", e);
            return BTreeMap::new();
        }
    };

    raw.into_iter()
        .filter_map(|(key, value)| match serde_json::from_value::<TrackedEntry>(value) {
            Ok(mut entry) => {
                entry.key = key.clone();
                Some((key, entry))
            }
            Err(e) => {
                tracing::warn!(%key, "Skipping unreadable tracked forecast: {}", e);
                None
            }
        })
        .collect()
}

/// Write the whole map as JSON.
fn write_entries(path: &Path, entries: &BTreeMap<String, TrackedEntry>) -> Result<(), StoreError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(entries)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}
