use std::sync::Arc;

use color_eyre::eyre::{OptionExt, Result};
use flume::Receiver;
use ratatui::Frame;
use rodio::OutputStream;
use tracing::info;

use crate::{
    audio::{
        config::AudioConfig,
        controller::SessionController,
        playback::RodioBackend,
        playlist::Playlist,
        preferences::open_store,
        state::SessionSnapshot,
        system::{AudioSystem, SessionHandle},
        util::open_output_stream,
    },
    event::events::Event,
    http::AudioFetcher,
    util::log::project_data_dir,
};

use super::{tui, util::handler::EventHandler};

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App {
    pub event_rx: Receiver<Event>,
    pub session: SessionHandle,
    pub snapshot: SessionSnapshot,
    pub playlist: Arc<Playlist>,
    pub config: AudioConfig,
    pub cursor: usize,
    pub status: Option<Status>,
    pub has_focus: bool,
    pub should_quit: bool,
    audio_system: Option<AudioSystem>,
    _stream: OutputStream,
}

impl App {
    pub async fn new(config: AudioConfig) -> Result<Self> {
        let playlist_path = config
            .playlist_path
            .clone()
            .ok_or_eyre("no playlist given: pass a path or set JUKEBOX_PLAYLIST")?;
        let playlist = Arc::new(Playlist::load(&playlist_path)?);
        info!(
            path = %playlist_path.display(),
            tracks = playlist.len(),
            "playlist_loaded"
        );

        let stream = open_output_stream()?;
        let fetcher = Arc::new(AudioFetcher::new()?);
        let backend = RodioBackend::new(stream.mixer().clone(), fetcher);
        let preferences = open_store(project_data_dir());

        let (event_tx, event_rx) = flume::unbounded();
        let controller =
            SessionController::new(backend, playlist.clone(), preferences, event_tx, &config);
        let audio_system = AudioSystem::spawn(controller);
        let session = audio_system.handle();
        let snapshot = session.snapshot();

        Ok(Self {
            event_rx,
            session,
            snapshot,
            playlist,
            config,
            cursor: 0,
            status: None,
            has_focus: true,
            should_quit: false,
            audio_system: Some(audio_system),
            _stream: stream,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        while !self.should_quit {
            self.snapshot = self.session.snapshot();
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        tui.exit()?;
        if let Some(audio_system) = self.audio_system.take() {
            audio_system.shutdown().await;
        }
        Ok(())
    }

    fn ui(&self, frame: &mut Frame) {
        if self.has_focus {
            frame.render_widget(self, frame.area());
        }
    }
}
