use std::time::Duration;

use tracing::{info, warn};

use crate::{
    audio::error::AudioError,
    event::events::Event,
    ui::{
        app::{App, Status},
        input::InputHandler,
        message::AppMessage,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<()> {
        if let Some(evt) = tui.next().await {
            Self::handle_event(app, evt, tui).await?;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_audio_event(app, evt);
        }

        Ok(())
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<()> {
        match evt {
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => {
                if let Some(message) = InputHandler::handle_key(key) {
                    Self::handle_message(app, message).await;
                }
            }
            TerminalEvent::Tick | TerminalEvent::Resize(_, _) => {}
        }

        Ok(())
    }

    pub async fn handle_message(app: &mut App, message: AppMessage) {
        let session = app.session.clone();
        let seek_step = app.config.seek_step_secs as f64;
        let volume_step = app.config.volume_step;

        let result = match message {
            AppMessage::Quit => {
                app.should_quit = true;
                Ok(())
            }
            AppMessage::TogglePlayPause => session.toggle_play_pause(),
            AppMessage::NextTrack => session.skip_forward(),
            AppMessage::PreviousTrack => session.skip_back(),
            AppMessage::Stop => session.stop(),
            AppMessage::SeekForward => session.seek_by(seek_step),
            AppMessage::SeekBackward => session.seek_by(-seek_step),
            AppMessage::SeekToTenth(tenth) => {
                let duration = app.snapshot.session.duration;
                session.seek(tenth_of(duration, tenth))
            }
            AppMessage::VolumeUp => session.change_volume(volume_step),
            AppMessage::VolumeDown => session.change_volume(-volume_step),
            AppMessage::ToggleMute => session.toggle_mute(),
            AppMessage::CursorUp => {
                app.cursor = app.playlist.previous_index(app.cursor);
                Ok(())
            }
            AppMessage::CursorDown => {
                app.cursor = app.playlist.next_index(app.cursor);
                Ok(())
            }
            AppMessage::PlaySelected => session.play(Some(app.cursor)).await,
        };

        if let Err(e) = result {
            warn!(error = %e, ?message, "command_failed");
            app.status = Some(Status::Error(e.to_string()));
        }
    }

    pub fn handle_audio_event(app: &mut App, evt: Event) {
        match evt {
            Event::TrackLoading(index) => {
                app.cursor = index;
                if let Some(track) = app.playlist.get(index) {
                    app.status = Some(Status::Info(format!("Loading {}", track.title)));
                }
            }
            Event::TrackStarted(track, index) => {
                info!(index, title = track.title.as_str(), "now_playing");
                app.status = None;
            }
            Event::LoadFailed { index, error } => {
                app.status = Some(Status::Error(load_failure_message(app, index, &error)));
            }
            Event::SeekRejected { restored, .. } => {
                app.status = Some(Status::Error(format!(
                    "Seek not supported here, staying at {}",
                    crate::ui::components::progress::format_time(restored)
                )));
            }
            Event::PreferencesUnavailable(reason) => {
                app.status = Some(Status::Error(format!(
                    "Volume settings will not be saved: {reason}"
                )));
            }
            Event::TrackEnded(_) | Event::PlaybackProgress(_) => {}
        }
    }
}

fn load_failure_message(app: &App, index: usize, error: &AudioError) -> String {
    match app.playlist.get(index) {
        Some(track) => format!("Could not play {}: {error}", track.title),
        None => format!("Could not play track {}: {error}", index + 1),
    }
}

fn tenth_of(duration: Duration, tenth: u32) -> f64 {
    duration.as_secs_f64() * f64::from(tenth.min(10)) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenths_split_the_track() {
        let duration = Duration::from_secs(200);
        assert_eq!(tenth_of(duration, 0), 0.0);
        assert_eq!(tenth_of(duration, 5), 100.0);
        assert_eq!(tenth_of(duration, 42), 200.0);
    }
}
