//! Ad-hoc request tester view

use crate::app::{App, TesterFocus};
use fakeit_client::build_api_url;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Draw the tester view
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(38), Constraint::Percentage(62)])
        .split(area);

    draw_targets(frame, app, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Request line
            Constraint::Percentage(40), // Body editor
            Constraint::Min(5),         // Response
        ])
        .split(chunks[1]);

    draw_request_line(frame, app, right[0]);
    draw_body_editor(frame, app, right[1]);
    draw_response(frame, app, right[2]);
}

/// Draw the enabled-only target list
fn draw_targets(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.tester.focus == TesterFocus::Targets;
    let border_style = if focused {
        Style::default().fg(app.theme.focus)
    } else {
        Style::default().fg(app.theme.border)
    };

    let targets = app.repository.enabled();

    let items: Vec<ListItem> = targets
        .iter()
        .enumerate()
        .map(|(i, mock)| {
            let is_selected = app.tester.list_state.selected() == Some(i);
            ListItem::new(Line::from(vec![
                Span::styled(
                    if is_selected { " ▶ " } else { "   " },
                    Style::default().fg(app.theme.highlight_bg),
                ),
                Span::styled(
                    format!("{:<7}", mock.method.as_str()),
                    Style::default()
                        .fg(app.theme.method_color(mock.method))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    super::truncate(&mock.path, 22),
                    Style::default().fg(app.theme.fg),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(format!(" Targets ({}) ", targets.len()))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(app.theme.highlight_bg)
                .fg(app.theme.highlight_fg),
        );

    frame.render_stateful_widget(list, area, &mut app.tester.list_state.clone());

    if targets.is_empty() {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let paragraph = Paragraph::new("No enabled mocks to test")
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center);
        let centered = Rect {
            x: inner.x,
            y: inner.y + inner.height / 2,
            width: inner.width,
            height: 1,
        };
        frame.render_widget(paragraph, centered);
    }
}

/// Draw the method selector and the resolved target URL
fn draw_request_line(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Request ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let method = app.tester.method();
    let url = match app.selected_target() {
        Some(mock) => build_api_url(&app.mock_base, &mock.path),
        None => "—".to_string(),
    };

    let mut spans = vec![
        Span::styled(" ◀ ", Style::default().fg(app.theme.muted)),
        Span::styled(
            method.as_str(),
            Style::default()
                .fg(app.theme.method_color(method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶  ", Style::default().fg(app.theme.muted)),
        Span::styled(url, Style::default().fg(app.theme.fg)),
    ];
    if !method.accepts_body() {
        spans.push(Span::styled(
            "  (no body sent)",
            Style::default().fg(app.theme.muted),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn draw_body_editor(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.tester.focus == TesterFocus::Body;
    let border_style = if focused {
        Style::default().fg(app.theme.focus)
    } else {
        Style::default().fg(app.theme.border)
    };
    let title = if focused {
        " ▶ Request body (^S send) "
    } else {
        "   Request body "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    app.tester
        .body
        .render_with_block(area, frame.buffer_mut(), Some(block), focused);
}

/// Draw the response pane, or the local error that replaced it
fn draw_response(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Response ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &app.tester.error {
        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(" ✗ ", Style::default().fg(app.theme.error)),
                Span::styled(error.as_str(), Style::default().fg(app.theme.error)),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
        return;
    }

    let Some(response) = &app.tester.response else {
        let paragraph = Paragraph::new("Select a target and press Enter to send")
            .style(Style::default().fg(app.theme.muted))
            .alignment(Alignment::Center);
        let centered = Rect {
            x: inner.x,
            y: inner.y + inner.height / 2,
            width: inner.width,
            height: 1,
        };
        frame.render_widget(paragraph, centered);
        return;
    };

    let status_color = match response.status {
        200..=299 => app.theme.success,
        300..=399 => app.theme.warning,
        _ => app.theme.error,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} {}", response.status, response.status_text),
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];
    for line in response.body.lines() {
        lines.push(Line::from(format!(" {}", line)));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
