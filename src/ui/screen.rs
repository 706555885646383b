use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use ecosort::{
    catalog::CategoryTag,
    classifier::DetectionResult,
    scanner::CameraState,
    scoreboard::{ChallengeState, SessionProfile},
};

use crate::{App, AppState, LoginField};

const LOGIN_WIDTH: u16 = 56;
const LOGIN_HEIGHT: u16 = 11;
const DECK_NAME_WIDTH: usize = 30;
const HISTORY_ROWS: usize = 5;

/// One tab of the UI, drawn into the area left between header and footer
pub trait Screen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer);
}

pub struct LoginScreen;
pub struct ScannerScreen;
pub struct SortingScreen;
pub struct ChallengesScreen;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

fn titled(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn category_color(tag: CategoryTag) -> Color {
    match tag {
        CategoryTag::Dry => Color::Blue,
        CategoryTag::Wet => Color::Green,
        CategoryTag::Hazardous => Color::Red,
        CategoryTag::EWaste => Color::Magenta,
    }
}

impl Screen for LoginScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let form = &app.login;
        let field = |label: &str, value: String, focus: LoginField| {
            let marker = if form.focus == focus { "▶ " } else { "  " };
            let style = if form.focus == focus {
                bold().fg(Color::Green)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{marker}{label:<10}"), style),
                Span::raw(value),
            ])
        };

        let mut lines = vec![
            Line::from(Span::styled("🌿 Welcome back, eco warrior", bold())),
            Line::default(),
            field("Email", form.email.clone(), LoginField::Email),
            field(
                "Password",
                "•".repeat(form.password.chars().count()),
                LoginField::Password,
            ),
            Line::default(),
        ];
        match &form.error {
            Some(err) => lines.push(Line::from(Span::styled(
                err.as_str(),
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Line::from(Span::styled(
                "Demo account: GREEN@gmail.com / 123456",
                dim(),
            ))),
        }

        Paragraph::new(lines)
            .block(titled(" Sign in "))
            .wrap(Wrap { trim: false })
            .render(centered_rect(LOGIN_WIDTH, LOGIN_HEIGHT, area), buf);
    }
}

/// Card for one detected item; the advice text carries its own glyph
fn detection_lines(result: &DetectionResult) -> Vec<Line<'static>> {
    let tag = result.item.category;
    vec![
        Line::from(vec![
            Span::styled(format!("{} {}  ", result.item.icon, result.item.name), bold()),
            Span::styled(
                tag.zone_title().to_uppercase(),
                Style::default().fg(category_color(tag)),
            ),
            Span::raw(format!("  {}%", result.confidence)),
        ]),
        Line::from(format!("   {}", result.item.material)),
        Line::from(format!("   {}", result.item.recycling)),
        Line::default(),
    ]
}

impl Screen for ScannerScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let scanner = &app.session.scanner;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(0),
            ])
            .split(columns[0]);

        let camera = match scanner.camera() {
            CameraState::Off => Span::styled("● off", dim()),
            CameraState::Live => Span::styled("● live", bold().fg(Color::Red)),
        };
        Paragraph::new(vec![
            Line::from(vec![Span::raw("Camera "), camera]),
            Line::from(scanner.status_line()),
        ])
        .block(titled(" Camera "))
        .wrap(Wrap { trim: true })
        .render(left[0], buf);

        let (label, ratio) = match scanner.current_run() {
            Some(run) if run.is_pending() => (run.current_stage().unwrap_or_default(), run.progress()),
            _ => ("idle", 0.0),
        };
        Gauge::default()
            .block(titled(" Analysis "))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(ratio)
            .label(label)
            .render(left[1], buf);

        let history = scanner.history();
        let mut lines = vec![Line::from(format!(
            "{} scans · {} items",
            history.len(),
            history.total_items()
        ))];
        lines.extend(history.entries().iter().rev().take(HISTORY_ROWS).map(|entry| {
            Line::from(Span::styled(
                format!(
                    "{}  {}",
                    entry.timestamp.format("%H:%M:%S"),
                    entry.report.headline()
                ),
                dim(),
            ))
        }));
        Paragraph::new(lines)
            .block(titled(" History "))
            .render(left[2], buf);

        let lines = match scanner.last_report() {
            None => vec![Line::from(Span::styled(
                "No detections yet. Press c to start the camera, then space to capture.",
                dim(),
            ))],
            Some(report) => {
                let mut lines = vec![
                    Line::from(Span::styled(report.headline(), bold().fg(Color::Green))),
                    Line::from(format!(
                        "Items Detected: {}   Avg Confidence: {}%   Categories: {}",
                        report.items_detected, report.avg_confidence, report.categories
                    )),
                    Line::default(),
                ];
                for result in &report.results {
                    lines.extend(detection_lines(result));
                }
                if !report.recommendations.is_empty() {
                    lines.push(Line::from(Span::styled("💡 Smart Recommendations", bold())));
                    for rec in &report.recommendations {
                        lines.push(Line::from(format!("{}: {}", rec.name, rec.advice)));
                    }
                }
                lines
            }
        };
        Paragraph::new(lines)
            .block(titled(" 🔬 AI Analysis Summary "))
            .wrap(Wrap { trim: true })
            .render(columns[1], buf);
    }
}

impl Screen for SortingScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let quiz = &app.session.quiz;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(area);

        let deck: Vec<Line> = quiz
            .deck()
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let pad = DECK_NAME_WIDTH.saturating_sub(item.name.width());
                let mark = if quiz.is_sorted(idx) { "✔" } else { " " };
                let text = format!("{mark} {} {}{}", item.icon, item.name, " ".repeat(pad));
                let style = if idx == app.selected_item {
                    selected_style()
                } else if quiz.is_sorted(idx) {
                    dim()
                } else {
                    Style::default()
                };
                Line::from(Span::styled(text, style))
            })
            .collect();
        Paragraph::new(deck)
            .block(titled(format!(
                " Items · sorted {}/{} ",
                quiz.sorted_count(),
                quiz.deck().len()
            ).as_str()))
            .render(columns[0], buf);

        let zones = Layout::default()
            .direction(Direction::Vertical)
            .constraints(CategoryTag::ALL.map(|_| Constraint::Ratio(1, 4)))
            .split(columns[1]);
        for (slot, (zone, rect)) in CategoryTag::ALL.iter().zip(zones.iter()).enumerate() {
            let names: Vec<Span> = quiz
                .zone_items(*zone)
                .map(|item| Span::raw(format!("{} {}  ", item.icon, item.name)))
                .collect();
            let title = format!(" [{}] {} ", slot + 1, zone.zone_title());
            Paragraph::new(Line::from(names))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(category_color(*zone)))
                        .title(title),
                )
                .wrap(Wrap { trim: true })
                .render(*rect, buf);
        }
    }
}

fn profile_lines(profile: &SessionProfile) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(format!("Level {}", profile.level), bold())),
        Line::from(format!("{} points", profile.points)),
        Line::from(format!("🔥 {} day streak", profile.streak)),
        Line::from(format!("{} challenges completed", profile.challenges_completed)),
    ]
}

impl Screen for ChallengesScreen {
    fn render(&self, app: &App, area: Rect, buf: &mut Buffer) {
        let scoreboard = &app.session.scoreboard;
        let profile = scoreboard.profile();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Length(3), Constraint::Min(0)])
            .split(columns[0]);

        Paragraph::new(profile_lines(profile))
            .block(titled(" Profile "))
            .render(left[0], buf);
        Gauge::default()
            .block(titled(" Weekly goal "))
            .gauge_style(Style::default().fg(Color::Green))
            .percent(u16::from(profile.weekly_goal.min(100)))
            .render(left[1], buf);

        let mut lines = vec![];
        for (idx, challenge) in scoreboard.challenges().iter().enumerate() {
            let (symbol, color) = match challenge.state {
                ChallengeState::New => ("○", Color::Gray),
                ChallengeState::InProgress => ("◐", Color::Yellow),
                ChallengeState::Completed => ("●", Color::Green),
            };
            let title_style = if idx == app.selected_challenge {
                selected_style()
            } else {
                bold()
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{symbol} "), Style::default().fg(color)),
                Span::styled(challenge.title, title_style),
                Span::styled(format!("  {}", challenge.state), dim()),
            ]));
            lines.push(Line::from(format!(
                "   {}% · {}",
                challenge.progress,
                challenge.progress_label()
            )));
        }
        Paragraph::new(lines)
            .block(titled(" 🏆 Recycling Challenges "))
            .render(columns[1], buf);
    }
}

/// Helper to construct the screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Login => Box::new(LoginScreen),
        AppState::Scanner => Box::new(ScannerScreen),
        AppState::Sorting => Box::new(SortingScreen),
        AppState::Challenges => Box::new(ChallengesScreen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn detection_card_shows_advice_verbatim() {
        let catalog = ecosort::Catalog::standard();
        for name in ["Paper Towel", "PVC Plastic Pipe", "Smartphone"] {
            let item = *catalog.find(name).unwrap();
            let lines = detection_lines(&DetectionResult { item, confidence: 95 });
            assert_eq!(line_text(&lines[2]), format!("   {}", item.recycling));
        }
        let towel = *catalog.find("Paper Towel").unwrap();
        let lines = detection_lines(&DetectionResult { item: towel, confidence: 95 });
        assert_eq!(line_text(&lines[2]), "   ❌ Not Recyclable - Contaminated");
    }

    #[test]
    fn centered_rect_fits_inside_small_areas() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(LOGIN_WIDTH, LOGIN_HEIGHT, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 5));

        let area = Rect::new(0, 0, 100, 31);
        let rect = centered_rect(LOGIN_WIDTH, LOGIN_HEIGHT, area);
        assert_eq!(rect, Rect::new(22, 10, LOGIN_WIDTH, LOGIN_HEIGHT));
    }
}
