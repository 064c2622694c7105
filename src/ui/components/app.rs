use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    ui::{
        app::{App, Status},
        components::{controls::VolumeWidget, playlist::PlaylistWidget, progress::ProgressWidget},
    },
    util::colors,
};

const HELP: &str = "space play/pause · n/p next/prev · ←/→ seek · 0-9 jump · +/- volume · m mute · q quit";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        buf.set_style(area, Style::new().bg(colors::SURFACE));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(3),
            ])
            .split(area);

        let session = &self.snapshot.session;
        let counter = format!(
            " {} / {} ",
            session.current_track_index + 1,
            self.snapshot.playlist_len
        );

        let playlist_block = Block::new()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title_top(" jukebox ")
            .title_top(Line::from(counter).right_aligned())
            .title_bottom(Line::from(HELP).fg(colors::MUTED))
            .title_alignment(Alignment::Center);
        let playlist_area = playlist_block.inner(chunks[0]);
        playlist_block.render(chunks[0], buf);

        PlaylistWidget::new(
            &self.playlist,
            session.current_track_index,
            self.cursor,
            session.playback_state,
        )
        .render(playlist_area, buf);

        let status = match &self.status {
            Some(Status::Info(text)) => Line::from(format!(" {text}")).fg(colors::TEXT),
            Some(Status::Error(text)) => Line::from(format!(" {text}")).fg(colors::ERROR),
            None => Line::default(),
        };
        Paragraph::new(status).render(chunks[1], buf);

        let player = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(12)])
            .split(chunks[2]);

        ProgressWidget::new(&self.snapshot).render(player[0], buf);
        VolumeWidget::new(session.volume, session.muted).render(player[1], buf);
    }
}
