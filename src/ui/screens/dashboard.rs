use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType,
        Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::aggregate;
use crate::models::{AnalysisResult, ANOMALY_PREVIEW_ROWS};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(result) = app.result.as_ref() else {
        render_placeholder(f, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),      // Summary cards
            Constraint::Percentage(45), // Charts
            Constraint::Min(8),         // Anomaly table
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app, result);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);
    render_trend_chart(f, charts[0], app);
    render_category_chart(f, charts[1], app);

    render_anomaly_table(f, chunks[2], app, result);
}

fn render_placeholder(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " PulseGuard Dashboard ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No analysis yet",
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Pick a CSV on the Upload screen (2) and press u to analyze",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(block);
    f.render_widget(msg, area);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_card(
        f,
        cards[0],
        "Total Transactions",
        result.total.to_string(),
        theme::ACCENT,
        None,
    );
    render_card(
        f,
        cards[1],
        "Anomalies Found",
        result.anomalies_found.to_string(),
        theme::RED,
        Some(format!(
            "{:.1}% of total",
            if result.total > 0 {
                result.anomalies_found as f64 * 100.0 / result.total as f64
            } else {
                0.0
            }
        )),
    );
    render_card(
        f,
        cards[2],
        "Categories",
        app.category_totals.len().to_string(),
        theme::YELLOW,
        None,
    );
    render_card(
        f,
        cards[3],
        "Flagged Spend",
        format_amount(result.flagged_spend()),
        theme::RED,
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_trend_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Anomaly Trend ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.trend.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No anomalies in this result",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let points: Vec<(f64, f64)> = app
        .trend
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.amount.to_f64().unwrap_or(0.0)))
        .collect();

    let max_y = points.iter().map(|(_, y)| *y).fold(0.0_f64, f64::max);
    let max_x = (points.len().saturating_sub(1)).max(1) as f64;
    let y_top = if max_y > 0.0 { max_y * 1.1 } else { 1.0 };

    let datasets = vec![Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::TREND))
        .data(&points)];

    let first_date = app.trend.first().map(|p| p.date.clone()).unwrap_or_default();
    let last_date = app.trend.last().map(|p| p.date.clone()).unwrap_or_default();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, max_x])
                .labels([
                    Span::styled(first_date, theme::dim_style()),
                    Span::styled(last_date, theme::dim_style()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, y_top])
                .labels([
                    Span::styled("0", theme::dim_style()),
                    Span::styled(format!("{:.0}", y_top / 2.0), theme::dim_style()),
                    Span::styled(format!("{y_top:.0}"), theme::dim_style()),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Anomalies by Category ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.category_totals.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No anomalies in this result",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Each category keeps its palette slot by position, cycling after five.
    let bars: Vec<Bar> = app
        .category_totals
        .iter()
        .take(12)
        .enumerate()
        .map(|(i, (name, amt))| {
            Bar::default()
                .value(amt.abs().to_u64().unwrap_or(0))
                .text_value(format_amount(*amt))
                .label(Line::from(truncate(name, 10)))
                .style(Style::default().fg(theme::palette_color(i)))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_anomaly_table(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let preview = result.preview();

    if preview.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Anomaly Details (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        let msg = Paragraph::new(Line::from(Span::styled(
            "No anomalies flagged",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Date", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = preview
        .iter()
        .enumerate()
        .skip(app.table_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, a)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(aggregate::format_trend_date(&a.date)),
                Cell::from(truncate(&a.category, 24)),
                Cell::from(Span::styled(format_amount(a.amount), theme::anomaly_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Anomaly Details ({}) ", result.anomalies.len()),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    if result.preview_truncated() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(
                " Showing first {ANOMALY_PREVIEW_ROWS} of {} anomalies ",
                result.anomalies.len()
            ),
            theme::dim_style(),
        )));
    }

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
