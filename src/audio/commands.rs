use tokio::sync::oneshot;

use crate::audio::error::AudioError;

pub type Reply = oneshot::Sender<Result<(), AudioError>>;

#[derive(Debug)]
pub enum SessionCommand {
    Play {
        index: Option<usize>,
        reply: Option<Reply>,
    },
    Pause,
    TogglePlayPause,
    SkipBack,
    SkipForward,
    Seek(f64),
    SeekBy(f64),
    SetVolume(f32),
    ChangeVolume(f32),
    ToggleMute,
    Stop,
    Shutdown,
}
