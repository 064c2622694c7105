use std::time::Duration;

use crate::audio::{error::AudioError, playlist::Track};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    TrackLoading(usize),
    TrackStarted(Track, usize),
    TrackEnded(usize),
    LoadFailed { index: usize, error: AudioError },
    SeekRejected { requested: Duration, restored: Duration },
    PlaybackProgress(Duration),
    PreferencesUnavailable(String),
}
