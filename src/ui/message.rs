#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Quit,

    // Transport
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    Stop,
    SeekForward,
    SeekBackward,
    SeekToTenth(u32),
    VolumeUp,
    VolumeDown,
    ToggleMute,

    // Playlist cursor
    CursorUp,
    CursorDown,
    PlaySelected,
}
