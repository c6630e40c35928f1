use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Selection summary
            Constraint::Min(5),    // File browser
        ])
        .split(area);

    render_selection(f, chunks[0], app);
    render_browser(f, chunks[1], app);
}

fn render_selection(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Upload & Analyze ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let selected = match &app.selected_file {
        Some(path) => Line::from(vec![
            Span::styled("Selected: ", theme::dim_style()),
            Span::styled(
                path.display().to_string(),
                Style::default()
                    .fg(theme::GREEN)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            "Selected: (none — pick a CSV below)",
            theme::dim_style(),
        )),
    };

    let text = Paragraph::new(vec![
        selected,
        Line::from(vec![
            Span::styled("Service:  ", theme::dim_style()),
            Span::styled(app.service_url.clone(), theme::normal_style()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter selects, u uploads for analysis, . shows hidden files",
            theme::dim_style(),
        )),
    ])
    .block(block);

    f.render_widget(text, area);
}

fn render_browser(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {} ", app.file_browser_path.display()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.file_browser_entries.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No CSV files here",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let parent = app.file_browser_path.parent();
    let visible = area.height.saturating_sub(2) as usize;

    let lines: Vec<Line> = app
        .file_browser_entries
        .iter()
        .enumerate()
        .skip(app.file_browser_scroll)
        .take(visible)
        .map(|(i, path)| {
            let name = if Some(path.as_path()) == parent {
                "..".to_string()
            } else if path.is_dir() {
                format!(
                    "{}/",
                    path.file_name().and_then(|n| n.to_str()).unwrap_or("?")
                )
            } else {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("?")
                    .to_string()
            };

            let is_selected_file = app.selected_file.as_deref() == Some(path.as_path());
            let style = if i == app.file_browser_index {
                theme::selected_style()
            } else if is_selected_file {
                Style::default().fg(theme::GREEN)
            } else if path.is_dir() {
                Style::default().fg(theme::ACCENT)
            } else {
                theme::normal_style()
            };

            let marker = if is_selected_file { "* " } else { "  " };
            Line::from(Span::styled(format!("{marker}{name}"), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
