//! Preferences persistence
//!
//! Saves and loads [`Preferences`] through a [`KeyValueStorage`] under the
//! fixed key [`PREFERENCES_KEY`]. The stored record is JSON and is always
//! overwritten wholesale.
//!
//! # File Location
//!
//! [`FileStorage::user_config`] keeps one `<key>.json` file per key in the
//! user's configuration directory, e.g.
//! `~/.config/chessboard/chessboard_prefs_v3.json`, and falls back to the
//! working directory when no config directory can be resolved.
//!
//! # Error Handling
//!
//! Both load and save handle errors gracefully:
//! - Load failures fall back to default preferences
//! - Stored fields that no longer parse are dropped and take their defaults
//! - Save failures are logged but don't interrupt play

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::core::error::CoreResult;
use crate::core::resources::Preferences;

/// Storage key of the preferences record
pub const PREFERENCES_KEY: &str = "chessboard_prefs_v3";

/// A string-keyed store for small text records
pub trait KeyValueStorage {
    /// Stored value, `None` when the key was never written
    fn get(&self, key: &str) -> CoreResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()>;
}

/// Stores each key as a JSON file in one directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage in the user's configuration directory
    pub fn user_config() -> Self {
        match ProjectDirs::from("com", "chessboard", "chessboard") {
            Some(proj_dirs) => Self::new(proj_dirs.config_dir()),
            // Fallback to current directory
            None => Self::new("."),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory store, optionally refusing every access
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose reads and writes all fail
    pub fn unavailable() -> Self {
        Self {
            entries: HashMap::new(),
            unavailable: true,
        }
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn check(&self) -> CoreResult<()> {
        if self.unavailable {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "storage disabled").into());
        }
        Ok(())
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> CoreResult<()> {
        self.check()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Load preferences, merging whatever is stored over the defaults
pub fn load_preferences(storage: &dyn KeyValueStorage) -> Preferences {
    let raw = match storage.get(PREFERENCES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("[SETTINGS] No stored preferences. Using defaults.");
            return Preferences::default();
        }
        Err(e) => {
            warn!("[SETTINGS] Failed to read preferences: {}. Using defaults.", e);
            return Preferences::default();
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(stored) => {
            let prefs = merge_over_defaults(stored);
            info!("[SETTINGS] Loaded preferences {:?}", prefs);
            prefs
        }
        Err(e) => {
            warn!("[SETTINGS] Failed to parse stored preferences: {}. Using defaults.", e);
            Preferences::default()
        }
    }
}

/// Overlay stored fields one at a time, skipping any that no longer parse
fn merge_over_defaults(stored: Value) -> Preferences {
    let Value::Object(fields) = stored else {
        warn!("[SETTINGS] Stored preferences are not an object. Using defaults.");
        return Preferences::default();
    };
    let Ok(mut merged) = serde_json::to_value(Preferences::default()) else {
        return Preferences::default();
    };

    for (key, value) in fields {
        let mut candidate = merged.clone();
        candidate[key.as_str()] = value;
        if serde_json::from_value::<Preferences>(candidate.clone()).is_ok() {
            merged = candidate;
        } else {
            warn!("[SETTINGS] Ignoring invalid stored field '{}'", key);
        }
    }

    serde_json::from_value(merged).unwrap_or_default()
}

/// Write the full preferences record; failures are logged and ignored
pub fn save_preferences(storage: &mut dyn KeyValueStorage, prefs: &Preferences) {
    let json = match serde_json::to_string_pretty(prefs) {
        Ok(json) => json,
        Err(e) => {
            error!("[SETTINGS] Failed to serialize preferences: {}", e);
            return;
        }
    };
    match storage.set(PREFERENCES_KEY, &json) {
        Ok(()) => info!("[SETTINGS] Saved preferences"),
        Err(e) => error!("[SETTINGS] Failed to save preferences: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resources::{BoardTheme, PieceStyle};

    #[test]
    fn test_missing_record_gives_defaults() {
        assert_eq!(load_preferences(&MemoryStorage::new()), Preferences::default());
    }

    #[test]
    fn test_corrupt_record_gives_defaults() {
        let storage = MemoryStorage::new().with_entry(PREFERENCES_KEY, "{not json");
        assert_eq!(load_preferences(&storage), Preferences::default());
    }

    #[test]
    fn test_invalid_field_is_dropped_and_others_kept() {
        let storage = MemoryStorage::new()
            .with_entry(PREFERENCES_KEY, r#"{"pieceStyle":"letters","theme":"marble"}"#);
        let prefs = load_preferences(&storage);
        assert_eq!(prefs.piece_style, PieceStyle::Letters);
        assert_eq!(prefs.theme, BoardTheme::Tournament);
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let prefs = Preferences {
            piece_style: PieceStyle::Minimal,
            theme: BoardTheme::Purple,
            pre_fullscreen_square_size: Some(72),
        };
        save_preferences(&mut storage, &prefs);
        assert_eq!(load_preferences(&storage), prefs);
    }

    #[test]
    fn test_unavailable_storage_is_tolerated() {
        let mut storage = MemoryStorage::unavailable();
        save_preferences(&mut storage, &Preferences::default());
        assert_eq!(load_preferences(&storage), Preferences::default());
    }

    #[test]
    fn test_file_storage_missing_key() {
        let dir = std::env::temp_dir().join(format!("chessboard-prefs-{}", std::process::id()));
        let mut storage = FileStorage::new(&dir);
        assert!(storage.get("absent").unwrap().is_none());
        storage.set("present", "{}").unwrap();
        assert_eq!(storage.get("present").unwrap().as_deref(), Some("{}"));
        let _ = fs::remove_dir_all(&dir);
    }
}
