pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use ecosort::notify::NotificationKind;

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 2;
const TOAST_WIDTH: u16 = 52;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.state == AppState::Login {
            screen::current_screen(&self.state).render(self, area, buf);
            render_toasts(self, area, buf);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        render_header(self, chunks[0], buf);
        screen::current_screen(&self.state).render(self, chunks[1], buf);
        render_footer(self, chunks[2], buf);
        render_toasts(self, area, buf);
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let profile = app.session.scoreboard.profile();
    let selected = AppState::TABS
        .iter()
        .position(|s| *s == app.state)
        .unwrap_or(0);

    Tabs::new(AppState::TABS.iter().map(|s| s.title()))
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " ecosort · Level {} · {} pts · 🔥 {} day streak ",
            profile.level, profile.points, profile.streak
        )))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .render(area, buf);
}

fn key_hints(state: AppState) -> &'static str {
    match state {
        AppState::Login => "enter sign in · tab switch field · esc quit",
        AppState::Scanner => "c camera on · s camera off · space capture · x clear history · tab next · q quit",
        AppState::Sorting => "↑/↓ select · 1 dry 2 wet 3 hazardous 4 e-waste · r reset · tab next · q quit",
        AppState::Challenges => "↑/↓ select · enter start/progress · tab next · q quit",
    }
}

fn render_footer(app: &App, area: Rect, buf: &mut Buffer) {
    Paragraph::new(Span::styled(
        key_hints(app.state),
        Style::default().add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center)
    .render(area, buf);
}

fn toast_style(kind: NotificationKind) -> Style {
    let color = match kind {
        NotificationKind::Info => Color::Cyan,
        NotificationKind::Success => Color::Green,
        NotificationKind::Warning => Color::Yellow,
        NotificationKind::Error => Color::Red,
    };
    Style::default().fg(color)
}

/// Stacks the live toasts in the top right corner, on top of everything else
fn render_toasts(app: &App, area: Rect, buf: &mut Buffer) {
    if app.session.toasts.is_empty() {
        return;
    }

    let widest = app
        .session
        .toasts
        .iter()
        .map(|n| n.message.width() as u16 + 2)
        .max()
        .unwrap_or(0);
    let width = widest.min(TOAST_WIDTH).min(area.width);
    let height = (app.session.toasts.len() as u16 * 2 + 2).min(area.height);
    let toast_area = Rect::new(area.right().saturating_sub(width), area.y, width, height);

    let lines: Vec<Line> = app
        .session
        .toasts
        .iter()
        .map(|n| Line::from(Span::styled(n.message.as_str(), toast_style(n.kind))))
        .collect();

    Clear.render(toast_area, buf);
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true })
        .render(toast_area, buf);
}
