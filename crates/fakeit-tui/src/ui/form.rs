//! Create/edit form view

use crate::app::{App, FormField};
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the mock form view
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.form.editing.is_some() {
        " Edit Mock "
    } else {
        " New Mock "
    };

    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight_bg));

    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Path
            Constraint::Length(3), // Method / status code / enabled
            Constraint::Min(5),    // Response body
            Constraint::Length(2), // Hint
        ])
        .split(inner);

    draw_input_field(
        frame,
        chunks[0],
        &app.theme,
        "Name",
        &app.form.name,
        "Users endpoint",
        app.form.focus == FormField::Name,
    );

    draw_input_field(
        frame,
        chunks[1],
        &app.theme,
        "Path",
        &app.form.path,
        "/users",
        app.form.focus == FormField::Path,
    );

    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(chunks[2]);

    draw_method_selector(frame, app, row[0]);

    draw_input_field(
        frame,
        row[1],
        &app.theme,
        "Status code",
        &app.form.status_code,
        "200",
        app.form.focus == FormField::StatusCode,
    );

    draw_enabled_toggle(frame, app, row[2]);

    draw_body_editor(frame, app, chunks[3]);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Response body accepts JSON or plain text; an empty body is saved as {}",
        Style::default().fg(app.theme.muted),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hint, chunks[4]);
}

/// An input field with a focus marker and an end-of-line cursor
fn draw_input_field(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    label: &str,
    value: &str,
    placeholder: &str,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(theme.focus)
    } else {
        Style::default().fg(theme.border)
    };

    let title = if focused {
        format!(" ▶ {} ", label)
    } else {
        format!("   {} ", label)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text_line = if focused {
        if value.is_empty() {
            Line::from(vec![
                Span::styled(placeholder, Style::default().fg(theme.muted)),
                Span::styled(
                    "█",
                    Style::default()
                        .fg(theme.focus)
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
            ])
        } else {
            Line::from(vec![
                Span::raw(value.to_string()),
                Span::styled(
                    "█",
                    Style::default()
                        .fg(theme.focus)
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
            ])
        }
    } else if value.is_empty() {
        Line::from(Span::styled(placeholder, Style::default().fg(theme.muted)))
    } else {
        Line::from(Span::raw(value.to_string()))
    };

    frame.render_widget(Paragraph::new(text_line), inner);
}

fn draw_method_selector(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.form.focus == FormField::Method;
    let border_style = if focused {
        Style::default().fg(app.theme.focus)
    } else {
        Style::default().fg(app.theme.border)
    };
    let title = if focused {
        " ▶ Method (←/→) "
    } else {
        "   Method "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let method = app.form.method();
    let text = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(app.theme.muted)),
        Span::styled(
            method.as_str(),
            Style::default()
                .fg(app.theme.method_color(method))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(app.theme.muted)),
    ]);

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

fn draw_enabled_toggle(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.form.focus == FormField::Enabled;
    let border_style = if focused {
        Style::default().fg(app.theme.focus)
    } else {
        Style::default().fg(app.theme.border)
    };
    let title = if focused {
        " ▶ Enabled (Space) "
    } else {
        "   Enabled "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = if app.form.enabled {
        Span::styled("[x] serving", Style::default().fg(app.theme.enabled))
    } else {
        Span::styled("[ ] paused", Style::default().fg(app.theme.disabled))
    };

    frame.render_widget(
        Paragraph::new(Line::from(text)).alignment(Alignment::Center),
        inner,
    );
}

fn draw_body_editor(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.form.focus == FormField::Body;
    let border_style = if focused {
        Style::default().fg(app.theme.focus)
    } else {
        Style::default().fg(app.theme.border)
    };
    let title = if focused {
        " ▶ Response body "
    } else {
        "   Response body "
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    app.form
        .body
        .render_with_block(area, frame.buffer_mut(), Some(block), focused);
}
