use std::{
    io::Cursor,
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use flume::Sender;
use rodio::{Decoder, Sink, Source, mixer::Mixer};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::audio::{
    error::AudioError,
    traits::{AudioBackend, AudioSource, DecodeResource, Generation, ResourceEvent, ResourceSignal},
};

const END_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Decode/output primitive on top of rodio. Each loaded track gets its own
/// sink on the shared mixer, so releasing a track never disturbs the next.
pub struct RodioBackend {
    mixer: Mixer,
    source: Arc<dyn AudioSource>,
}

impl RodioBackend {
    pub fn new(mixer: Mixer, source: Arc<dyn AudioSource>) -> Self {
        Self { mixer, source }
    }
}

impl AudioBackend for RodioBackend {
    fn load(
        &mut self,
        url: &str,
        generation: Generation,
        signals: Sender<ResourceSignal>,
    ) -> Result<Box<dyn DecodeResource>, AudioError> {
        let sink = Arc::new(Sink::connect_new(&self.mixer));
        sink.pause();

        let released = Arc::new(AtomicBool::new(false));
        let task = tokio::spawn(drive_resource(
            self.source.clone(),
            url.to_string(),
            generation,
            sink.clone(),
            released.clone(),
            signals,
        ));

        Ok(Box::new(RodioResource {
            sink,
            released,
            task: Some(task),
        }))
    }
}

pub struct RodioResource {
    sink: Arc<Sink>,
    released: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl DecodeResource for RodioResource {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn stop(&mut self) {
        self.released.store(true, Ordering::SeqCst);
        self.sink.stop();
    }

    fn unload(&mut self) {
        self.released.store(true, Ordering::SeqCst);
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.sink.stop();
    }

    fn seek(&mut self, position: Duration) -> Result<(), AudioError> {
        self.sink
            .try_seek(position)
            .map_err(|e| AudioError::SeekRejected(e.to_string()))
    }

    fn set_volume(&mut self, gain: f32) {
        self.sink.set_volume(gain);
    }

    fn position(&self) -> Duration {
        self.sink.get_pos()
    }
}

impl Drop for RodioResource {
    fn drop(&mut self) {
        self.unload();
    }
}

/// Fetches and decodes the track, hands it to the sink, then watches the
/// sink until it drains. Nothing is reported once the resource is released.
async fn drive_resource(
    source: Arc<dyn AudioSource>,
    url: String,
    generation: Generation,
    sink: Arc<Sink>,
    released: Arc<AtomicBool>,
    signals: Sender<ResourceSignal>,
) {
    let report = |event: ResourceEvent| {
        let _ = signals.send(ResourceSignal::new(generation, event));
    };

    let bytes = match source.fetch(&url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            report(ResourceEvent::Failed(e));
            return;
        }
    };

    let hint = extension_hint(&url);
    let decoder = match tokio::task::spawn_blocking(move || decode(bytes, hint)).await {
        Ok(Ok(decoder)) => decoder,
        Ok(Err(e)) => {
            report(ResourceEvent::Failed(e));
            return;
        }
        Err(e) => {
            report(ResourceEvent::Failed(AudioError::DecodingError(e.to_string())));
            return;
        }
    };

    if released.load(Ordering::SeqCst) {
        debug!(generation, "rodio_resource_released_before_ready");
        return;
    }

    let duration = decoder.total_duration().unwrap_or_default();
    sink.append(decoder);
    info!(
        generation,
        url = url.as_str(),
        duration_ms = duration.as_millis() as u64,
        "rodio_resource_ready"
    );
    report(ResourceEvent::Ready { duration });

    let mut interval = tokio::time::interval(END_POLL_INTERVAL);
    loop {
        interval.tick().await;
        if released.load(Ordering::SeqCst) {
            return;
        }
        if sink.empty() {
            report(ResourceEvent::Ended);
            return;
        }
    }
}

fn decode(bytes: Vec<u8>, hint: Option<String>) -> Result<Decoder<Cursor<Vec<u8>>>, AudioError> {
    let byte_len = bytes.len() as u64;
    let mut builder = Decoder::builder()
        .with_data(Cursor::new(bytes))
        .with_byte_len(byte_len)
        .with_seekable(true);
    if let Some(hint) = hint.as_deref() {
        builder = builder.with_hint(hint);
    }
    builder
        .build()
        .map_err(|e| AudioError::DecodingError(e.to_string()))
}

fn extension_hint(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
