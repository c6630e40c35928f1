use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, ProbeDisplay};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Actions
            Constraint::Min(5),    // Raw response
        ])
        .split(area);

    render_actions(f, chunks[0], app);
    render_response(f, chunks[1], app);
}

fn render_actions(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Service Probe ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("  t  ", Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(
                "Send a test transaction (amount 250, category Groceries)",
                theme::normal_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("  a  ", Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled("Fetch recently recorded anomalies", theme::normal_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("Each call hits {} and replaces the response below", app.service_url),
            theme::dim_style(),
        )),
    ])
    .block(block);

    f.render_widget(text, area);
}

fn render_response(f: &mut Frame, area: Rect, app: &App) {
    let (title, body_style, body) = match &app.probe {
        Some(ProbeDisplay::Response(text)) => (
            " Response ",
            Style::default().fg(theme::GREEN),
            text.as_str(),
        ),
        Some(ProbeDisplay::Failure(text)) => (
            " Connection Failed ",
            Style::default().fg(theme::RED),
            text.as_str(),
        ),
        None => (
            " Response ",
            theme::dim_style(),
            "No probe issued yet — press t or a",
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = body
        .lines()
        .skip(app.probe_scroll)
        .take(visible)
        .map(|l| Line::from(Span::styled(l.to_string(), body_style)))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
