use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("Invalid value {value:?} for {var}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    pub playlist_path: Option<PathBuf>,
    pub volume_step: f32,
    pub seek_step_secs: u64,
    pub position_tick: Duration,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            playlist_path: None,
            volume_step: 0.05,
            seek_step_secs: 5,
            position_tick: Duration::from_secs(1),
        }
    }
}

impl AudioConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds a config from any variable lookup; unset variables keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let playlist_path = lookup("JUKEBOX_PLAYLIST")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let volume_step: f32 = parse_var(&lookup, "JUKEBOX_VOLUME_STEP")?
            .unwrap_or(defaults.volume_step);
        if !(volume_step > 0.0 && volume_step <= 1.0) {
            return Err(ConfigError {
                var: "JUKEBOX_VOLUME_STEP",
                value: volume_step.to_string(),
            });
        }

        let seek_step_secs =
            parse_var(&lookup, "JUKEBOX_SEEK_STEP_SECS")?.unwrap_or(defaults.seek_step_secs);

        let tick_ms: u64 = parse_var(&lookup, "JUKEBOX_TICK_MS")?
            .unwrap_or(defaults.position_tick.as_millis() as u64);
        if tick_ms == 0 {
            return Err(ConfigError {
                var: "JUKEBOX_TICK_MS",
                value: tick_ms.to_string(),
            });
        }

        Ok(Self {
            playlist_path,
            volume_step,
            seek_step_secs,
            position_tick: Duration::from_millis(tick_ms),
        })
    }

    pub fn with_playlist(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.playlist_path = path;
        }
        self
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError { var, value: raw }),
    }
}
