use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::{
    audio::{playlist::Playlist, state::PlaybackState},
    ui::util::{fit_to_width, state_icon},
    util::colors,
};

pub struct PlaylistWidget<'a> {
    playlist: &'a Playlist,
    current: usize,
    cursor: usize,
    state: PlaybackState,
}

impl<'a> PlaylistWidget<'a> {
    pub fn new(playlist: &'a Playlist, current: usize, cursor: usize, state: PlaybackState) -> Self {
        Self {
            playlist,
            current,
            cursor,
            state,
        }
    }
}

impl Widget for PlaylistWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .playlist
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let marker = if i == self.current {
                    state_icon(self.state)
                } else {
                    " "
                };
                let line = fit_to_width(
                    &format!("{marker} {:>2}. {} by {}", i + 1, track.title, track.artist),
                    width,
                );
                let style = if i == self.current {
                    Style::default()
                        .fg(colors::ACCENT)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors::TEXT)
                };
                ListItem::new(line).style(style)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(colors::ACCENT_DIM))
            .highlight_symbol("› ");
        let mut state = ListState::default().with_selected(Some(self.cursor));
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
