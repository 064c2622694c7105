use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    symbols::{self, border},
    text::Span,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::util::colors;

pub struct VolumeWidget {
    volume: f32,
    muted: bool,
}

impl VolumeWidget {
    pub fn new(volume: f32, muted: bool) -> Self {
        Self { volume, muted }
    }
}

impl Widget for VolumeWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (ratio, label, fg) = if self.muted {
            (0.0, Span::raw("muted").fg(colors::MUTED), colors::MUTED)
        } else {
            (
                f64::from(self.volume.clamp(0.0, 1.0)),
                Span::raw(format!("{:.0}%", self.volume * 100.0)).fg(colors::TEXT),
                colors::ACCENT,
            )
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::Set {
                top_left: symbols::line::ROUNDED.horizontal_down,
                bottom_left: symbols::line::ROUNDED.horizontal_up,
                ..symbols::border::ROUNDED
            });

        Gauge::default()
            .block(block)
            .gauge_style(Style::new().fg(fg).bg(colors::SURFACE))
            .ratio(ratio)
            .label(label)
            .render(area, buf);
    }
}
