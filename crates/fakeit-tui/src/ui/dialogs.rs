//! Modal dialogs layered over the current view

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};
use crate::components::Popup;

/// Draw the confirmation dialog for destructive actions
pub fn draw_confirm(frame: &mut Frame, app: &App, message: &str) {
    let content = format!("\n{}\n\n[Enter] Confirm    [Esc] Cancel", message);

    let popup = Popup::new(content)
        .title(" Confirm ")
        .style(Style::default().bg(Color::Black).fg(app.theme.fg))
        .border_style(Style::default().fg(app.theme.warning));

    frame.render_widget(popup, frame.area());
}

/// Draw the read-only mock detail overlay with scrolling
pub fn draw_preview(frame: &mut Frame, app: &App, title: &str, content: &str, scroll: u16) {
    let area = super::centered_rect(80, 80, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight_bg))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Content
            Constraint::Length(2), // Help
        ])
        .split(inner);

    let lines: Vec<Line> = content.lines().map(Line::from).collect();
    let total_lines = lines.len() as u16;

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(app.theme.fg))
        .scroll((scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, chunks[0]);

    if total_lines > chunks[0].height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"));
        let mut scrollbar_state =
            ScrollbarState::new(total_lines as usize).position(scroll as usize);
        frame.render_stateful_widget(
            scrollbar,
            chunks[0].inner(ratatui::layout::Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }

    let help = Line::from(vec![
        Span::styled(
            "[c]",
            Style::default()
                .fg(app.theme.key_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Copy body  "),
        Span::styled(
            "[u]",
            Style::default()
                .fg(app.theme.key_fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Copy URL  "),
        Span::styled("[j/k]", Style::default().fg(app.theme.muted)),
        Span::raw(" Scroll  "),
        Span::styled(
            "[Esc]",
            Style::default()
                .fg(app.theme.error)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Close"),
    ]);

    let help_paragraph = Paragraph::new(help).alignment(Alignment::Center);
    frame.render_widget(help_paragraph, chunks[1]);
}
