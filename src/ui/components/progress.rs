use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Style, Stylize},
    symbols::{self, border},
    text::ToSpan,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::{
    audio::state::SessionSnapshot,
    ui::util::{fit_to_width, state_icon},
    util::colors,
};

pub struct ProgressWidget<'a> {
    snapshot: &'a SessionSnapshot,
}

impl<'a> ProgressWidget<'a> {
    pub fn new(snapshot: &'a SessionSnapshot) -> Self {
        Self { snapshot }
    }
}

impl Widget for ProgressWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.snapshot.session;

        let track_info = match &self.snapshot.track {
            Some(track) => format!(
                "{}  {} by {}",
                state_icon(session.playback_state),
                track.title,
                track.artist
            ),
            None => "No track".to_string(),
        };
        let track_info = fit_to_width(&track_info, area.width.saturating_sub(4) as usize);

        let label = if self.snapshot.is_loading() {
            "loading".to_string()
        } else {
            format!(
                "{} / {}",
                format_time(session.position),
                format_time(session.duration)
            )
        };

        Gauge::default()
            .block(
                Block::default()
                    .title_top(track_info)
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_set(border::Set {
                        top_right: symbols::line::ROUNDED.horizontal_down,
                        bottom_right: symbols::line::ROUNDED.horizontal_up,
                        ..symbols::border::ROUNDED
                    }),
            )
            .ratio(session.progress_ratio())
            .label(label.to_span().fg(colors::TEXT))
            .gauge_style(Style::default().fg(colors::ACCENT).bg(colors::SURFACE))
            .use_unicode(true)
            .render(area, buf);
    }
}

/// `m:ss`, minutes unpadded.
pub fn format_time(time: Duration) -> String {
    let total_seconds = time.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}
