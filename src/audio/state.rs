use std::time::Duration;

use crate::audio::{playlist::Track, preferences::Preferences};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
}

/// The mutable transport state owned by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    pub current_track_index: usize,
    pub playback_state: PlaybackState,
    pub position: Duration,
    pub duration: Duration,
    pub volume: f32,
    pub muted: bool,
}

impl PlaybackSession {
    pub fn new(preferences: Preferences) -> Self {
        Self {
            current_track_index: 0,
            playback_state: PlaybackState::Idle,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume: preferences.volume.clamp(0.0, 1.0),
            muted: preferences.muted,
        }
    }

    pub fn effective_gain(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            volume: self.volume,
            muted: self.muted,
        }
    }

    /// Clamps a seek target in seconds to `[0, duration]`.
    pub fn clamp_position(&self, seconds: f64) -> Duration {
        if !seconds.is_finite() || seconds <= 0.0 {
            return if seconds == f64::INFINITY {
                self.duration
            } else {
                Duration::ZERO
            };
        }
        if seconds >= self.duration.as_secs_f64() {
            return self.duration;
        }
        Duration::from_secs_f64(seconds)
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.duration.is_zero() {
            0.0
        } else {
            (self.position.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(Preferences::default())
    }
}

/// What presentation consumers see: the session plus the track it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub session: PlaybackSession,
    pub track: Option<Track>,
    pub playlist_len: usize,
}

impl SessionSnapshot {
    pub fn is_playing(&self) -> bool {
        self.session.playback_state == PlaybackState::Playing
    }

    pub fn is_loading(&self) -> bool {
        self.session.playback_state == PlaybackState::Loading
    }
}
