#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use flume::{Receiver, Sender};
use jukebox::{
    audio::{
        config::AudioConfig,
        controller::SessionController,
        error::{AudioError, PreferenceError},
        playlist::{Playlist, Track},
        preferences::{MemoryPreferenceStore, Preferences},
        traits::{
            AudioBackend, DecodeResource, Generation, PreferenceStore, ResourceEvent,
            ResourceSignal,
        },
    },
    event::events::Event,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceLog {
    pub url: String,
    pub generation: Generation,
    pub playing: bool,
    pub stopped: bool,
    pub unloaded: bool,
    pub volume: f32,
    pub position: Duration,
    pub seeks: Vec<Duration>,
}

struct LoadRecord {
    signals: Sender<ResourceSignal>,
    log: Arc<Mutex<ResourceLog>>,
}

#[derive(Default)]
struct MockState {
    loads: Vec<LoadRecord>,
    fail_loads: bool,
    reject_seeks: bool,
    overlapping_loads: usize,
}

/// Scripted backend: loads never complete on their own, the test decides
/// when each resource becomes ready, ends or fails.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_loads(&self, fail: bool) {
        self.state.lock().unwrap().fail_loads = fail;
    }

    pub fn reject_seeks(&self, reject: bool) {
        self.state.lock().unwrap().reject_seeks = reject;
    }

    pub fn load_count(&self) -> usize {
        self.state.lock().unwrap().loads.len()
    }

    pub fn resource(&self, n: usize) -> ResourceLog {
        self.state.lock().unwrap().loads[n].log.lock().unwrap().clone()
    }

    /// Resources that have not been unloaded.
    pub fn live_resources(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .loads
            .iter()
            .filter(|l| !l.log.lock().unwrap().unloaded)
            .count()
    }

    /// Loads that started while an earlier resource was still live.
    pub fn overlapping_loads(&self) -> usize {
        self.state.lock().unwrap().overlapping_loads
    }

    pub fn set_position(&self, n: usize, position: Duration) {
        self.state.lock().unwrap().loads[n].log.lock().unwrap().position = position;
    }

    pub fn ready(&self, n: usize, duration_secs: u64) {
        self.signal(
            n,
            ResourceEvent::Ready {
                duration: Duration::from_secs(duration_secs),
            },
        );
    }

    pub fn end(&self, n: usize) {
        self.signal(n, ResourceEvent::Ended);
    }

    pub fn fail(&self, n: usize, error: AudioError) {
        self.signal(n, ResourceEvent::Failed(error));
    }

    pub fn report_position(&self, n: usize, position: Duration) {
        self.set_position(n, position);
        self.signal(n, ResourceEvent::Position(position));
    }

    pub fn signal(&self, n: usize, event: ResourceEvent) {
        let state = self.state.lock().unwrap();
        let record = &state.loads[n];
        let generation = record.log.lock().unwrap().generation;
        record
            .signals
            .send(ResourceSignal::new(generation, event))
            .unwrap();
    }
}

impl AudioBackend for MockBackend {
    fn load(
        &mut self,
        url: &str,
        generation: Generation,
        signals: Sender<ResourceSignal>,
    ) -> Result<Box<dyn DecodeResource>, AudioError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_loads {
            return Err(AudioError::DecodingError(format!("cannot decode {url}")));
        }

        if state.loads.iter().any(|l| !l.log.lock().unwrap().unloaded) {
            state.overlapping_loads += 1;
        }

        let log = Arc::new(Mutex::new(ResourceLog {
            url: url.to_string(),
            generation,
            volume: 1.0,
            ..ResourceLog::default()
        }));
        state.loads.push(LoadRecord {
            signals,
            log: log.clone(),
        });

        Ok(Box::new(MockResource {
            log,
            backend: self.state.clone(),
        }))
    }
}

struct MockResource {
    log: Arc<Mutex<ResourceLog>>,
    backend: Arc<Mutex<MockState>>,
}

impl DecodeResource for MockResource {
    fn play(&mut self) {
        self.log.lock().unwrap().playing = true;
    }

    fn pause(&mut self) {
        self.log.lock().unwrap().playing = false;
    }

    fn stop(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.playing = false;
        log.stopped = true;
    }

    fn unload(&mut self) {
        self.log.lock().unwrap().unloaded = true;
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        if self.backend.lock().unwrap().reject_seeks {
            return Err(AudioError::SeekRejected("format is not seekable".to_string()));
        }
        let mut log = self.log.lock().unwrap();
        log.position = position;
        log.seeks.push(position);
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) {
        self.log.lock().unwrap().volume = gain;
    }

    fn position(&self) -> Duration {
        self.log.lock().unwrap().position
    }
}

pub struct FailingPreferenceStore;

impl PreferenceStore for FailingPreferenceStore {
    fn load(&self) -> Result<Preferences, PreferenceError> {
        Err(PreferenceError::NoDataDir)
    }

    fn save(&self, _preferences: &Preferences) -> Result<(), PreferenceError> {
        Err(PreferenceError::NoDataDir)
    }
}

pub fn track(name: &str) -> Track {
    Track {
        id: name.to_lowercase(),
        title: name.to_string(),
        artist: "The Pipelines".to_string(),
        audio_url: format!("https://cdn.example.com/{}.mp3", name.to_lowercase()),
        thumbnail: None,
    }
}

pub fn playlist(names: &[&str]) -> Arc<Playlist> {
    Arc::new(Playlist::new(names.iter().map(|n| track(n)).collect()).unwrap())
}

pub struct Harness {
    pub controller: SessionController,
    pub backend: MockBackend,
    pub preferences: MemoryPreferenceStore,
    pub events: Receiver<Event>,
}

impl Harness {
    pub fn new(names: &[&str]) -> Self {
        Self::with_preferences(names, MemoryPreferenceStore::new())
    }

    pub fn with_preferences(names: &[&str], preferences: MemoryPreferenceStore) -> Self {
        let backend = MockBackend::new();
        let (event_tx, events) = flume::unbounded();
        let controller = SessionController::new(
            backend.clone(),
            playlist(names),
            preferences.clone(),
            event_tx,
            &AudioConfig::default(),
        );
        Self {
            controller,
            backend,
            preferences,
            events,
        }
    }

    /// Plays `index` and lets the freshly loaded resource report ready.
    pub fn play_ready(&mut self, index: usize, duration_secs: u64) {
        self.controller.play(Some(index)).unwrap();
        self.ready_latest(duration_secs);
    }

    pub fn ready_latest(&mut self, duration_secs: u64) {
        let latest = self.backend.load_count() - 1;
        self.backend.ready(latest, duration_secs);
        self.controller.process_pending();
    }

    pub fn drain_events(&self) -> Vec<Event> {
        self.events.drain().collect()
    }
}
