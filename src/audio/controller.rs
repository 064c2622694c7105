use flume::{Receiver, Sender};
use std::{sync::Arc, time::Duration};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::audio::{
    commands::SessionCommand,
    config::AudioConfig,
    error::AudioError,
    playlist::Playlist,
    preferences::Preferences,
    state::{PlaybackSession, PlaybackState, SessionSnapshot},
    ticker::PositionTicker,
    traits::{AudioBackend, DecodeResource, Generation, PreferenceStore, ResourceEvent, ResourceSignal},
};
use crate::event::events::Event;

/// Single authority over transport state and the one live decode resource.
///
/// Every resource the controller hands out is tagged with a generation.
/// Superseding a resource (new track, stop, teardown) stops and unloads it
/// before bumping the generation, so signals that arrive afterwards for the
/// old resource are recognised as stale and dropped.
pub struct SessionController {
    backend: Box<dyn AudioBackend>,
    playlist: Arc<Playlist>,
    preferences: Box<dyn PreferenceStore>,
    session: PlaybackSession,
    resource: Option<Box<dyn DecodeResource>>,
    generation: Generation,
    ticker: PositionTicker,
    signal_tx: Sender<ResourceSignal>,
    signal_rx: Receiver<ResourceSignal>,
    event_tx: Sender<Event>,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl SessionController {
    pub fn new(
        backend: impl AudioBackend + 'static,
        playlist: Arc<Playlist>,
        preferences: impl PreferenceStore + 'static,
        event_tx: Sender<Event>,
        config: &AudioConfig,
    ) -> Self {
        let stored = match preferences.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "session_preferences_unavailable");
                let _ = event_tx.send(Event::PreferencesUnavailable(e.to_string()));
                Preferences::default()
            }
        };

        let session = PlaybackSession::new(stored);
        let (signal_tx, signal_rx) = flume::unbounded();
        let (snapshot_tx, _) = watch::channel(SessionSnapshot {
            session: session.clone(),
            track: playlist.get(0).cloned(),
            playlist_len: playlist.len(),
        });

        info!(
            tracks = playlist.len(),
            volume = session.volume,
            muted = session.muted,
            "session_created"
        );

        Self {
            backend: Box::new(backend),
            playlist,
            preferences: Box::new(preferences),
            session,
            resource: None,
            generation: 0,
            ticker: PositionTicker::new(config.position_tick),
            signal_tx,
            signal_rx,
            event_tx,
            snapshot_tx,
        }
    }

    pub fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Play { index, reply } => {
                let result = self.play(index);
                match reply {
                    Some(reply) => {
                        let _ = reply.send(result);
                    }
                    None => {
                        if let Err(e) = result {
                            warn!(error = %e, "session_play_failed");
                        }
                    }
                }
            }
            SessionCommand::Pause => self.pause(),
            SessionCommand::TogglePlayPause => self.toggle_play_pause(),
            SessionCommand::SkipBack => self.skip_back(),
            SessionCommand::SkipForward => self.skip_forward(),
            SessionCommand::Seek(seconds) => self.seek(seconds),
            SessionCommand::SeekBy(delta) => self.seek_by(delta),
            SessionCommand::SetVolume(volume) => self.set_volume(volume),
            SessionCommand::ChangeVolume(delta) => self.change_volume(delta),
            SessionCommand::ToggleMute => self.toggle_mute(),
            SessionCommand::Stop => self.stop(),
            SessionCommand::Shutdown => self.shutdown(),
        }
    }

    /// Starts `index`, or resumes/starts the current track when `index` is
    /// `None`. An out-of-range index is rejected without touching the session.
    pub fn play(&mut self, index: Option<usize>) -> Result<(), AudioError> {
        let len = self.playlist.len();
        if let Some(index) = index
            && index >= len
        {
            return Err(AudioError::InvalidTrackIndex { index, len });
        }

        if index.is_none() {
            match self.session.playback_state {
                PlaybackState::Playing | PlaybackState::Loading => return Ok(()),
                PlaybackState::Paused if self.resource.is_some() => {
                    self.resume();
                    return Ok(());
                }
                _ => {}
            }
        }

        let index = index.unwrap_or(self.session.current_track_index);
        self.load_track(index)
    }

    pub fn pause(&mut self) {
        if self.session.playback_state != PlaybackState::Playing {
            return;
        }

        self.ticker.stop();
        if let Some(resource) = self.resource.as_mut() {
            resource.pause();
            self.session.position = resource.position().min(self.session.duration);
        }
        self.session.playback_state = PlaybackState::Paused;
        debug!(index = self.session.current_track_index, "session_paused");
        self.publish();
    }

    pub fn toggle_play_pause(&mut self) {
        if self.session.playback_state == PlaybackState::Playing {
            self.pause();
        } else if let Err(e) = self.play(None) {
            warn!(error = %e, "session_play_failed");
        }
    }

    pub fn skip_forward(&mut self) {
        let next = self.playlist.next_index(self.session.current_track_index);
        if let Err(e) = self.play(Some(next)) {
            warn!(error = %e, index = next, "session_skip_failed");
        }
    }

    pub fn skip_back(&mut self) {
        let previous = self
            .playlist
            .previous_index(self.session.current_track_index);
        if let Err(e) = self.play(Some(previous)) {
            warn!(error = %e, index = previous, "session_skip_failed");
        }
    }

    /// Moves the live resource to `seconds`, clamped to the track. The new
    /// position is published before the resource answers; a rejected seek
    /// restores the previous position.
    pub fn seek(&mut self, seconds: f64) {
        if self.resource.is_none() {
            debug!(seconds, "session_seek_without_resource");
            return;
        }

        let target = self.session.clamp_position(seconds);
        let previous = self.session.position;
        self.session.position = target;
        self.publish();

        let outcome = match self.resource.as_mut() {
            Some(resource) => resource.seek(target),
            None => Ok(()),
        };

        if let Err(e) = outcome {
            warn!(
                error = %e,
                requested_ms = target.as_millis() as u64,
                restored_ms = previous.as_millis() as u64,
                "session_seek_rejected"
            );
            self.session.position = previous;
            self.emit(Event::SeekRejected {
                requested: target,
                restored: previous,
            });
            self.publish();
        }
    }

    pub fn seek_by(&mut self, delta_secs: f64) {
        self.seek(self.session.position.as_secs_f64() + delta_secs);
    }

    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };

        self.session.volume = volume;
        if volume > 0.0 {
            self.session.muted = false;
        }
        self.apply_gain();
        self.persist_preferences();
        self.publish();
    }

    pub fn change_volume(&mut self, delta: f32) {
        self.set_volume(self.session.volume + delta);
    }

    pub fn toggle_mute(&mut self) {
        self.session.muted = !self.session.muted;
        self.apply_gain();
        self.persist_preferences();
        self.publish();
    }

    pub fn stop(&mut self) {
        self.supersede();
        self.reset_transport();
        self.publish();
    }

    /// Session teardown. Releases the live resource; the controller stays
    /// usable but idle.
    pub fn shutdown(&mut self) {
        self.supersede();
        self.reset_transport();
        info!("session_shutdown");
        self.publish();
    }

    pub fn handle_signal(&mut self, signal: ResourceSignal) {
        if signal.generation != self.generation || self.resource.is_none() {
            debug!(
                signal_generation = signal.generation,
                current_generation = self.generation,
                event = ?signal.event,
                "session_stale_signal_discarded"
            );
            return;
        }

        match signal.event {
            ResourceEvent::Ready { duration } => self.on_ready(duration),
            ResourceEvent::Ended => self.on_ended(),
            ResourceEvent::Position(position) => self.on_position(position),
            ResourceEvent::Failed(error) => self.on_failed(error),
            ResourceEvent::Tick => self.on_tick(),
        }
    }

    /// Drains signals that are already queued. The async service uses the
    /// receiver directly; this is for driving the controller by hand.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(signal) = self.signal_rx.try_recv() {
            self.handle_signal(signal);
            handled += 1;
        }
        handled
    }

    pub fn signals(&self) -> Receiver<ResourceSignal> {
        self.signal_rx.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.session.clone(),
            track: self.playlist.get(self.session.current_track_index).cloned(),
            playlist_len: self.playlist.len(),
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn playlist(&self) -> &Arc<Playlist> {
        &self.playlist
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn has_live_resource(&self) -> bool {
        self.resource.is_some()
    }

    pub fn is_sampling(&self) -> bool {
        self.ticker.is_running()
    }

    fn load_track(&mut self, index: usize) -> Result<(), AudioError> {
        let track = self
            .playlist
            .get(index)
            .cloned()
            .ok_or(AudioError::InvalidTrackIndex {
                index,
                len: self.playlist.len(),
            })?;

        let generation = self.supersede();
        self.session.current_track_index = index;
        self.session.position = Duration::ZERO;
        self.session.duration = Duration::ZERO;
        self.session.playback_state = PlaybackState::Loading;

        info!(
            index,
            generation,
            id = track.id.as_str(),
            url = track.audio_url.as_str(),
            "session_track_loading"
        );

        match self
            .backend
            .load(&track.audio_url, generation, self.signal_tx.clone())
        {
            Ok(mut resource) => {
                resource.set_volume(self.session.effective_gain());
                resource.play();
                self.resource = Some(resource);
                self.emit(Event::TrackLoading(index));
                self.publish();
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, index, "session_load_failed");
                self.reset_transport();
                self.emit(Event::LoadFailed {
                    index,
                    error: error.clone(),
                });
                self.publish();
                Err(error)
            }
        }
    }

    fn resume(&mut self) {
        if let Some(resource) = self.resource.as_mut() {
            resource.play();
        }
        self.session.playback_state = PlaybackState::Playing;
        self.ticker.start(self.generation, self.signal_tx.clone());
        debug!(index = self.session.current_track_index, "session_resumed");
        self.publish();
    }

    /// Stops sampling, stops and unloads the live resource, then moves to a
    /// fresh generation. Returns the new generation.
    fn supersede(&mut self) -> Generation {
        self.ticker.stop();
        if let Some(mut resource) = self.resource.take() {
            resource.stop();
            resource.unload();
            debug!(generation = self.generation, "session_resource_released");
        }
        self.generation += 1;
        self.generation
    }

    fn reset_transport(&mut self) {
        self.session.playback_state = PlaybackState::Idle;
        self.session.position = Duration::ZERO;
        self.session.duration = Duration::ZERO;
    }

    fn on_ready(&mut self, duration: Duration) {
        self.session.duration = duration;
        self.session.position = self.session.position.min(duration);

        if self.session.playback_state != PlaybackState::Loading {
            self.publish();
            return;
        }

        self.session.playback_state = PlaybackState::Playing;
        self.ticker.start(self.generation, self.signal_tx.clone());

        let index = self.session.current_track_index;
        info!(
            index,
            generation = self.generation,
            duration_ms = duration.as_millis() as u64,
            "session_track_started"
        );
        if let Some(track) = self.playlist.get(index).cloned() {
            self.emit(Event::TrackStarted(track, index));
        }
        self.publish();
    }

    fn on_ended(&mut self) {
        let index = self.session.current_track_index;
        let next = self.playlist.next_index(index);
        info!(index, next, "session_track_ended");
        self.emit(Event::TrackEnded(index));

        if let Err(e) = self.play(Some(next)) {
            warn!(error = %e, index = next, "session_auto_advance_failed");
        }
    }

    fn on_position(&mut self, position: Duration) {
        if self.session.playback_state != PlaybackState::Playing {
            return;
        }
        self.session.position = position.min(self.session.duration);
        self.publish();
    }

    fn on_failed(&mut self, error: AudioError) {
        let index = self.session.current_track_index;
        warn!(error = %error, index, generation = self.generation, "session_resource_failed");
        self.supersede();
        self.reset_transport();
        self.emit(Event::LoadFailed { index, error });
        self.publish();
    }

    fn on_tick(&mut self) {
        if self.session.playback_state != PlaybackState::Playing {
            return;
        }
        let Some(resource) = self.resource.as_ref() else {
            return;
        };

        self.session.position = resource.position().min(self.session.duration);
        self.emit(Event::PlaybackProgress(self.session.position));
        self.publish();
    }

    fn apply_gain(&mut self) {
        let gain = self.session.effective_gain();
        if let Some(resource) = self.resource.as_mut() {
            resource.set_volume(gain);
        }
    }

    fn persist_preferences(&mut self) {
        if let Err(e) = self.preferences.save(&self.session.preferences()) {
            warn!(error = %e, "session_preferences_save_failed");
            self.emit(Event::PreferencesUnavailable(e.to_string()));
        }
    }

    fn emit(&self, event: Event) {
        let _ = self.event_tx.send(event);
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.supersede();
    }
}
