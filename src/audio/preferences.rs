use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use serde_json::{Map, Value};
use tracing::warn;

use crate::audio::{error::PreferenceError, traits::PreferenceStore};

const VOLUME_KEY: &str = "volume";
const MUTED_KEY: &str = "muted";
const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    pub volume: f32,
    pub muted: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            volume: 1.0,
            muted: false,
        }
    }
}

/// Preferences kept as a small JSON object on disk.
///
/// Each key is read on its own, so a bad `volume` does not throw away a
/// good `muted` and vice versa.
pub struct JsonPreferenceStore {
    path: PathBuf,
}

impl JsonPreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `preferences.json` inside `data_dir`.
    pub fn in_data_dir(data_dir: Option<PathBuf>) -> Result<Self, PreferenceError> {
        data_dir
            .map(|dir| Self::new(dir.join(PREFERENCES_FILE)))
            .ok_or(PreferenceError::NoDataDir)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl PreferenceStore for JsonPreferenceStore {
    fn load(&self) -> Result<Preferences, PreferenceError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_str(&raw)?;
        let defaults = Preferences::default();

        let volume = value
            .get(VOLUME_KEY)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .map(|v| (v as f32).clamp(0.0, 1.0))
            .unwrap_or(defaults.volume);
        let muted = value
            .get(MUTED_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(defaults.muted);

        Ok(Preferences { volume, muted })
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut object = Map::new();
        object.insert(VOLUME_KEY.to_string(), Value::from(preferences.volume));
        object.insert(MUTED_KEY.to_string(), Value::from(preferences.muted));

        let body = serde_json::to_string_pretty(&Value::Object(object))?;
        fs::write(&self.path, body)?;
        Ok(())
    }
}

/// The on-disk store when a data directory is known, otherwise an in-memory
/// store that lives as long as the session.
pub fn open_store(data_dir: Option<PathBuf>) -> Box<dyn PreferenceStore> {
    match JsonPreferenceStore::in_data_dir(data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "preferences_kept_in_memory");
            Box::new(MemoryPreferenceStore::new())
        }
    }
}

impl PreferenceStore for Box<dyn PreferenceStore> {
    fn load(&self) -> Result<Preferences, PreferenceError> {
        (**self).load()
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        (**self).save(preferences)
    }
}

#[derive(Clone, Default)]
pub struct MemoryPreferenceStore {
    inner: Arc<Mutex<Option<Preferences>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(preferences: Preferences) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(preferences))),
        }
    }

    pub fn stored(&self) -> Option<Preferences> {
        self.inner.lock().ok().and_then(|guard| *guard)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Preferences, PreferenceError> {
        Ok(self.stored().unwrap_or_default())
    }

    fn save(&self, preferences: &Preferences) -> Result<(), PreferenceError> {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(*preferences);
        }
        Ok(())
    }
}
