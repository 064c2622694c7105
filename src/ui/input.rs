use crate::ui::message::AppMessage;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(AppMessage::Quit),
            (KeyCode::Char(' '), _) => Some(AppMessage::TogglePlayPause),
            (KeyCode::Char('n'), _) => Some(AppMessage::NextTrack),
            (KeyCode::Char('p'), _) => Some(AppMessage::PreviousTrack),
            (KeyCode::Char('s'), _) => Some(AppMessage::Stop),
            (KeyCode::Right, _) => Some(AppMessage::SeekForward),
            (KeyCode::Left, _) => Some(AppMessage::SeekBackward),
            (KeyCode::Char('+'), _) | (KeyCode::Char('='), _) => Some(AppMessage::VolumeUp),
            (KeyCode::Char('-'), _) => Some(AppMessage::VolumeDown),
            (KeyCode::Char('m'), _) => Some(AppMessage::ToggleMute),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Some(AppMessage::CursorUp),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Some(AppMessage::CursorDown),
            (KeyCode::Enter, _) => Some(AppMessage::PlaySelected),
            (KeyCode::Char(digit), _) => digit.to_digit(10).map(AppMessage::SeekToTenth),
            _ => None,
        }
    }
}
