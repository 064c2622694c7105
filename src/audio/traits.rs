use crate::audio::{
    error::{AudioError, PreferenceError},
    preferences::Preferences,
};
use async_trait::async_trait;
use flume::Sender;
use std::time::Duration;

/// Identifies one decode resource. Bumped every time a resource is
/// superseded, so signals from older resources can be told apart.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent {
    Ready { duration: Duration },
    Ended,
    Position(Duration),
    Failed(AudioError),
    Tick,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSignal {
    pub generation: Generation,
    pub event: ResourceEvent,
}

impl ResourceSignal {
    pub fn new(generation: Generation, event: ResourceEvent) -> Self {
        Self { generation, event }
    }
}

#[async_trait]
pub trait AudioSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AudioError>;
}

/// Decode-and-output primitive. `load` must not block: the returned
/// resource reports readiness, completion and failure through `signals`,
/// tagged with `generation`.
pub trait AudioBackend: Send {
    fn load(
        &mut self,
        url: &str,
        generation: Generation,
        signals: Sender<ResourceSignal>,
    ) -> Result<Box<dyn DecodeResource>, AudioError>;
}

pub trait DecodeResource: Send {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn unload(&mut self);
    fn seek(&mut self, position: Duration) -> Result<(), AudioError>;
    fn set_volume(&mut self, gain: f32);
    fn position(&self) -> Duration;
}

pub trait PreferenceStore: Send {
    fn load(&self) -> Result<Preferences, PreferenceError>;
    fn save(&self, preferences: &Preferences) -> Result<(), PreferenceError>;
}
