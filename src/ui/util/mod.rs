pub mod handler;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::audio::state::PlaybackState;

pub fn state_icon(state: PlaybackState) -> &'static str {
    match state {
        PlaybackState::Idle => "■",
        PlaybackState::Loading => "…",
        PlaybackState::Playing => "▶",
        PlaybackState::Paused => "⏸",
    }
}

/// Cuts `text` to at most `width` terminal columns, ending in `…` when cut.
pub fn fit_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
