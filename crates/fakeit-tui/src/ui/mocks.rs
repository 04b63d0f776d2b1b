//! Mock list view

use crate::app::App;
use crate::repository::mock_matches;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Draw the mock list view
pub fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.search_query.to_lowercase();
    let filtering = !query.is_empty() || app.method_filter.is_some();

    let items: Vec<ListItem> = app
        .repository
        .records
        .iter()
        .enumerate()
        .map(|(i, mock)| {
            let is_selected = app.mock_list_state.selected() == Some(i);
            let matches = mock_matches(mock, &query, app.method_filter);

            // Dim non-matching items while a filter is active
            let dim = filtering && !matches;

            let status = if mock.enabled { "●" } else { "○" };
            let status_color = if dim {
                app.theme.muted
            } else if mock.enabled {
                app.theme.enabled
            } else {
                app.theme.disabled
            };

            let fg_color = if dim { app.theme.muted } else { app.theme.fg };
            let method_color = if dim {
                app.theme.muted
            } else {
                app.theme.method_color(mock.method)
            };

            let line = Line::from(vec![
                Span::styled(
                    if is_selected { " ▶ " } else { "   " },
                    Style::default().fg(if dim {
                        app.theme.muted
                    } else {
                        app.theme.highlight_bg
                    }),
                ),
                Span::styled(format!("{} ", status), Style::default().fg(status_color)),
                Span::styled(
                    format!("{:<7}", mock.method.as_str()),
                    Style::default().fg(method_color).add_modifier(if dim {
                        Modifier::empty()
                    } else {
                        Modifier::BOLD
                    }),
                ),
                Span::styled(" │ ", Style::default().fg(app.theme.border)),
                Span::styled(
                    format!("{:<24}", super::truncate(&mock.name, 24)),
                    Style::default().fg(fg_color),
                ),
                Span::styled(" │ ", Style::default().fg(app.theme.border)),
                Span::styled(
                    format!("{:<30}", super::truncate(&mock.path, 30)),
                    Style::default().fg(fg_color),
                ),
                Span::styled(" │ ", Style::default().fg(app.theme.border)),
                Span::styled(
                    format!("{:>3}", mock.status_code),
                    Style::default().fg(app.theme.muted),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let title = match app.method_filter {
        Some(method) => format!(" Mocks ({}) · {} only ", app.repository.records.len(), method),
        None => format!(" Mocks ({}) ", app.repository.records.len()),
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .highlight_style(
            Style::default()
                .bg(app.theme.highlight_bg)
                .fg(app.theme.highlight_fg),
        );

    frame.render_stateful_widget(list, area, &mut app.mock_list_state.clone());

    // Empty state message
    if app.repository.records.is_empty() {
        let msg = if app.repository.is_connected() {
            "No mocks defined. Press 'n' to create one."
        } else {
            "Not connected. Check if the Fake-It server is running."
        };

        let inner = Block::default().borders(Borders::ALL).inner(area);

        let paragraph = ratatui::widgets::Paragraph::new(msg)
            .style(Style::default().fg(app.theme.muted))
            .alignment(ratatui::layout::Alignment::Center);

        let y_offset = inner.height / 2;
        let centered = Rect {
            x: inner.x,
            y: inner.y + y_offset,
            width: inner.width,
            height: 1,
        };

        frame.render_widget(paragraph, centered);
    }
}
