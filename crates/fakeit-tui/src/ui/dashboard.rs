//! Overview dashboard with counts and a per-method breakdown

use crate::app::App;
use fakeit_client::HttpMethod;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the dashboard view
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary panel
            Constraint::Min(10),   // Breakdown
        ])
        .split(area);

    draw_summary(frame, app, chunks[0]);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_method_chart(frame, app, lower[0]);
    draw_recent(frame, app, lower[1]);
}

/// Draw the summary counts panel
fn draw_summary(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.repository.stats();
    let refresh_age = match &app.repository.last_refresh {
        Some(at) => super::format_age(at.elapsed()),
        None => "never".to_string(),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Mocks: ", Style::default().fg(app.theme.muted)),
            Span::styled(
                format!("{}", stats.total),
                Style::default()
                    .fg(app.theme.fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("    │    ", Style::default().fg(app.theme.border)),
            Span::styled("Enabled: ", Style::default().fg(app.theme.muted)),
            Span::styled(
                format!("{}", stats.enabled),
                Style::default()
                    .fg(app.theme.enabled)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("    │    ", Style::default().fg(app.theme.border)),
            Span::styled("Disabled: ", Style::default().fg(app.theme.muted)),
            Span::styled(
                format!("{}", stats.disabled),
                Style::default().fg(app.theme.disabled),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Server: ", Style::default().fg(app.theme.muted)),
            Span::styled(app.client.base_url(), Style::default().fg(app.theme.fg)),
            Span::styled("    │    ", Style::default().fg(app.theme.border)),
            Span::styled("Last refresh: ", Style::default().fg(app.theme.muted)),
            Span::styled(refresh_age, Style::default().fg(app.theme.fg)),
        ]),
    ];

    if let Some(error) = &app.repository.last_error {
        lines.push(Line::from(vec![
            Span::styled("  ✗ ", Style::default().fg(app.theme.error)),
            Span::styled(error.as_str(), Style::default().fg(app.theme.error)),
        ]));
    }

    let block = Block::default()
        .title(" Overview ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Draw the per-method mock counts as a bar chart
fn draw_method_chart(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.repository.stats();

    let max_count = HttpMethod::ALL
        .iter()
        .map(|m| stats.count_for(*m) as u64)
        .max()
        .unwrap_or(1)
        .max(1);

    let bars: Vec<Bar> = HttpMethod::ALL
        .iter()
        .map(|method| {
            Bar::default()
                .value(stats.count_for(*method) as u64)
                .label(Line::from(method.as_str()))
                .style(Style::default().fg(app.theme.method_color(*method)))
        })
        .collect();

    let bar_chart = BarChart::default()
        .block(
            Block::default()
                .title(" Mocks by Method ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(2)
        .max(max_count);

    frame.render_widget(bar_chart, area);
}

/// Draw the most recent records from the snapshot
fn draw_recent(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Recent Mocks ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if app.repository.records.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let msg = Paragraph::new("Nothing here yet")
            .style(Style::default().fg(app.theme.muted))
            .alignment(ratatui::layout::Alignment::Center);
        frame.render_widget(msg, inner);
        return;
    }

    let items: Vec<ListItem> = app
        .repository
        .recent(5)
        .iter()
        .map(|mock| {
            let status = if mock.enabled { "●" } else { "○" };
            let status_color = if mock.enabled {
                app.theme.enabled
            } else {
                app.theme.disabled
            };
            ListItem::new(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("{} ", status), Style::default().fg(status_color)),
                Span::styled(
                    format!("{:<7}", mock.method.as_str()),
                    Style::default().fg(app.theme.method_color(mock.method)),
                ),
                Span::styled(
                    super::truncate(&mock.path, 24),
                    Style::default().fg(app.theme.fg),
                ),
                Span::styled(
                    format!("  {}", super::truncate(&mock.name, 20)),
                    Style::default().fg(app.theme.muted),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}
