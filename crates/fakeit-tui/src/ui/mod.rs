//! UI rendering for the dashboard.

mod dashboard;
mod dialogs;
mod form;
mod help;
mod mocks;
mod tester;

use crate::app::{App, Overlay, StatusLevel, View};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(4), // Status bar (2 lines + borders)
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    match app.view {
        View::Dashboard => dashboard::draw(frame, app, chunks[1]),
        View::Mocks => mocks::draw_list(frame, app, chunks[1]),
        View::Form => form::draw(frame, app, chunks[1]),
        View::Tester => tester::draw(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);

    // Overlays on top
    match app.overlay.clone() {
        Overlay::Help => {
            app.help_max_scroll = help::draw_overlay(frame, app.help_scroll);
        }
        Overlay::Confirm { message, .. } => dialogs::draw_confirm(frame, app, &message),
        Overlay::Preview { title, content, .. } => {
            dialogs::draw_preview(frame, app, &title, &content, app.preview_scroll)
        }
        Overlay::None => {}
    }
}

/// Draw the header bar
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let connection_status = if app.repository.is_connected() {
        Span::styled("● Connected", Style::default().fg(app.theme.success))
    } else {
        Span::styled("○ Disconnected", Style::default().fg(app.theme.error))
    };

    let loading = if app.repository.is_loading {
        Span::styled(" ⟳", Style::default().fg(app.theme.warning))
    } else {
        Span::raw("")
    };

    let mock_count = Span::styled(
        format!(" Mocks: {}", app.repository.records.len()),
        Style::default().fg(app.theme.muted),
    );

    let view_label = match app.view {
        View::Dashboard => "[1] Dashboard",
        View::Mocks => "[2] Mocks",
        View::Form => "[3] Editor",
        View::Tester => "[4] Tester",
    };

    let title = Line::from(vec![
        Span::styled(
            " Fake-It ",
            Style::default()
                .fg(app.theme.header_fg)
                .bg(app.theme.header_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(view_label, Style::default().fg(app.theme.fg)),
        Span::raw(" │ "),
        connection_status,
        loading,
        Span::raw(" │ "),
        Span::styled(app.client.base_url(), Style::default().fg(app.theme.muted)),
        mock_count,
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(title).block(block);
    frame.render_widget(paragraph, area);
}

/// Draw the status bar (or search bar when active)
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let searching = app.search_active || !app.search_query.is_empty();
    if searching && app.view == View::Mocks {
        draw_search_bar(frame, app, area);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    if let Some((msg, level, _)) = &app.status_message {
        let color = match level {
            StatusLevel::Info => app.theme.fg,
            StatusLevel::Success => app.theme.success,
            StatusLevel::Warning => app.theme.warning,
            StatusLevel::Error => app.theme.error,
        };
        let paragraph = Paragraph::new(Span::styled(
            format!(" {}", msg),
            Style::default().fg(color),
        ))
        .block(block)
        .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    } else {
        let (commands1, commands2) = get_commands(&app.view);
        let line1 = build_command_line(&commands1, app);
        let lines = if let Some(cmds2) = commands2 {
            let line2 = build_command_line(&cmds2, app);
            vec![line1, line2]
        } else {
            vec![line1]
        };
        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }
}

/// Command definition (key, label)
type Command = (&'static str, &'static str);

/// Build a command line with [key] notation and separators
fn build_command_line(commands: &[Command], app: &App) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in commands.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(app.theme.border)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default()
                .fg(app.theme.key_fg)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", label),
            Style::default().fg(app.theme.muted),
        ));
    }
    Line::from(spans)
}

/// Get context-sensitive commands as (key, label) pairs
fn get_commands(view: &View) -> (Vec<Command>, Option<Vec<Command>>) {
    match view {
        View::Dashboard => (
            vec![
                ("1-4", "Views"),
                ("Enter", "Mocks"),
                ("n", "New"),
                ("r", "Refresh"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
            None,
        ),
        View::Mocks => (
            vec![
                ("j/k", "Move"),
                ("Enter", "Preview"),
                ("t", "Toggle"),
                ("e", "Edit"),
                ("d", "Del"),
                ("c", "CopyURL"),
            ],
            Some(vec![
                ("/", "Search"),
                ("m", "Method"),
                ("n", "New"),
                ("r", "Refresh"),
                ("?", "Help"),
                ("q", "Quit"),
            ]),
        ),
        View::Form => (
            vec![
                ("Tab", "Next"),
                ("Shift+Tab", "Prev"),
                ("Space", "Change"),
                ("^S", "Save"),
                ("Esc", "Back"),
            ],
            None,
        ),
        View::Tester => (
            vec![
                ("j/k", "Target"),
                ("m", "Method"),
                ("Tab", "Body"),
                ("Enter", "Send"),
                ("?", "Help"),
                ("q", "Quit"),
            ],
            None,
        ),
    }
}

/// Draw the search bar
fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.search_active {
        app.theme.highlight_bg
    } else {
        app.theme.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cursor = if app.search_active { "█" } else { "" };
    let filtered = app.filtered_mocks();
    let match_count = format!(" ({}/{})", filtered.len(), app.repository.records.len());
    let method_tag = match app.method_filter {
        Some(method) => format!(" · {}", method),
        None => String::new(),
    };

    let line = Line::from(vec![
        Span::styled(
            " /",
            Style::default()
                .fg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(&app.search_query, Style::default().fg(app.theme.fg)),
        Span::styled(cursor, Style::default().fg(app.theme.highlight_bg)),
        Span::styled(match_count, Style::default().fg(app.theme.muted)),
        Span::styled(method_tag, Style::default().fg(app.theme.warning)),
        Span::styled(
            if app.search_active {
                "  [Enter] search  [Esc] cancel  [Ctrl+U] clear"
            } else {
                "  [/] edit  [Esc] clear"
            },
            Style::default().fg(app.theme.muted),
        ),
    ]);

    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, inner);
}

/// Calculate a centered rect for modals
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Format how long ago an instant was, for the refresh indicator
pub fn format_age(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {}m ago", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {}s ago", secs / 60, secs % 60)
    } else {
        format!("{}s ago", secs)
    }
}

/// Truncate a string to max length with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
