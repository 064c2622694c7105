use flume::{Receiver, Sender};
use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info};

use crate::audio::{
    commands::SessionCommand, controller::SessionController, error::AudioError,
    state::SessionSnapshot, traits::ResourceSignal,
};

/// Runs a [`SessionController`] on its own task. Commands and resource
/// signals are handled one at a time, which is what keeps "at most one live
/// resource" true when callers sit on other tasks.
pub struct AudioSystem {
    handle: SessionHandle,
    task: JoinHandle<()>,
}

impl AudioSystem {
    pub fn spawn(controller: SessionController) -> Self {
        let (command_tx, command_rx) = flume::unbounded();
        let snapshot = controller.subscribe();
        let signals = controller.signals();

        let task = tokio::spawn(run_session(controller, command_rx, signals));

        Self {
            handle: SessionHandle {
                commands: command_tx,
                snapshot,
            },
            task,
        }
    }

    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub async fn shutdown(self) {
        let _ = self.handle.commands.send(SessionCommand::Shutdown);
        if let Err(e) = self.task.await {
            debug!(error = %e, "audio_system_task_join_failed");
        }
    }
}

async fn run_session(
    mut controller: SessionController,
    commands: Receiver<SessionCommand>,
    signals: Receiver<ResourceSignal>,
) {
    info!("audio_system_started");
    loop {
        tokio::select! {
            command = commands.recv_async() => match command {
                Ok(SessionCommand::Shutdown) | Err(_) => break,
                Ok(command) => controller.handle_command(command),
            },
            Ok(signal) = signals.recv_async() => controller.handle_signal(signal),
        }
    }
    controller.shutdown();
    info!("audio_system_stopped");
}

/// Cloneable command surface plus the reactive snapshot feed. Consumers
/// never touch the session directly.
#[derive(Clone)]
pub struct SessionHandle {
    commands: Sender<SessionCommand>,
    snapshot: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Resolves once the track is being loaded (or the request was
    /// rejected). Readiness and late load failures arrive on the event feed.
    pub async fn play(&self, index: Option<usize>) -> Result<(), AudioError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(SessionCommand::Play {
            index,
            reply: Some(reply_tx),
        })?;
        reply_rx.await.map_err(|_| AudioError::SessionClosed)?
    }

    pub fn pause(&self) -> Result<(), AudioError> {
        self.send(SessionCommand::Pause)
    }

    pub fn toggle_play_pause(&self) -> Result<(), AudioError> {
        self.send(SessionCommand::TogglePlayPause)
    }

    pub fn skip_back(&self) -> Result<(), AudioError> {
        self.send(SessionCommand::SkipBack)
    }

    pub fn skip_forward(&self) -> Result<(), AudioError> {
        self.send(SessionCommand::SkipForward)
    }

    pub fn seek(&self, seconds: f64) -> Result<(), AudioError> {
        self.send(SessionCommand::Seek(seconds))
    }

    pub fn seek_by(&self, delta_secs: f64) -> Result<(), AudioError> {
        self.send(SessionCommand::SeekBy(delta_secs))
    }

    pub fn set_volume(&self, volume: f32) -> Result<(), AudioError> {
        self.send(SessionCommand::SetVolume(volume))
    }

    pub fn change_volume(&self, delta: f32) -> Result<(), AudioError> {
        self.send(SessionCommand::ChangeVolume(delta))
    }

    pub fn toggle_mute(&self) -> Result<(), AudioError> {
        self.send(SessionCommand::ToggleMute)
    }

    pub fn stop(&self) -> Result<(), AudioError> {
        self.send(SessionCommand::Stop)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot.clone()
    }

    fn send(&self, command: SessionCommand) -> Result<(), AudioError> {
        self.commands
            .send(command)
            .map_err(|_| AudioError::SessionClosed)
    }
}
