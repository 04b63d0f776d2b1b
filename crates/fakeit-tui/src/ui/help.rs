//! Help overlay with scroll support

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Draw the help overlay with scrolling; returns the scroll limit for the
/// current terminal size so the key handler can clamp against it.
pub fn draw_overlay(frame: &mut Frame, scroll: u16) -> u16 {
    let area = super::centered_rect(75, 85, frame.area());

    frame.render_widget(Clear, area);

    let help_text = build_help_text();
    let total_lines = help_text.len() as u16;
    let visible_height = area.height.saturating_sub(2); // Account for borders
    let max_scroll = total_lines.saturating_sub(visible_height);

    let block = Block::default()
        .title(" Fake-It Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .style(Style::default());

    let paragraph = Paragraph::new(help_text).block(block).scroll((scroll, 0));

    frame.render_widget(paragraph, area);

    if max_scroll > 0 {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"));

        let mut scrollbar_state =
            ScrollbarState::new(max_scroll as usize).position(scroll.min(max_scroll) as usize);

        let scrollbar_area = ratatui::layout::Rect {
            x: area.x + area.width - 1,
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    max_scroll
}

fn build_help_text() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        section_header("GLOBAL"),
        Line::from(""),
        help_line("1 / 2 / 3 / 4", "Dashboard / Mocks / Editor / Tester"),
        help_line("n", "Create a new mock"),
        help_line("r", "Refresh from the server"),
        help_line("?", "Toggle this help"),
        help_line("q", "Quit"),
        Line::from(""),
        section_header("MOCK LIST"),
        Line::from(""),
        help_line("j / ↓", "Move down"),
        help_line("k / ↑", "Move up"),
        help_line("Enter / v", "Preview selected mock"),
        help_line("t", "Enable/disable on the server"),
        help_line("e", "Edit selected mock"),
        help_line("d", "Delete (asks for confirmation)"),
        help_line("c", "Copy mock URL to clipboard"),
        help_line("/", "Search by name or path"),
        help_line("m", "Cycle the method filter"),
        help_line("Esc", "Clear search and method filter"),
        Line::from(""),
        section_header("CREATE & EDIT FORM"),
        Line::from(""),
        help_line("Tab / Shift+Tab", "Next / previous field"),
        help_line("←/→ or Space", "Change method"),
        help_line("Space", "Toggle enabled"),
        help_line("Ctrl+S", "Save the mock"),
        help_line("Ctrl+V", "Paste into the body"),
        help_line("Esc", "Back to the list"),
        Line::from(""),
        section_header("TESTER"),
        Line::from(""),
        help_line("j / k", "Pick a target (enabled mocks only)"),
        help_line("m", "Cycle the request method"),
        help_line("Tab", "Focus the request body"),
        help_line("Enter / Ctrl+S", "Send the request"),
        help_line("Esc", "Leave the body editor"),
        Line::from(""),
        section_header("PREVIEW OVERLAY"),
        Line::from(""),
        help_line("c", "Copy response body"),
        help_line("u", "Copy mock URL"),
        help_line("j/k or ↑/↓", "Scroll"),
        help_line("Esc", "Close"),
        Line::from(""),
        section_header("SEARCH MODE"),
        Line::from(""),
        help_line("Enter", "Confirm search and select first match"),
        help_line("Esc", "Cancel search"),
        help_line("Ctrl+U", "Clear search query"),
        help_line("Ctrl+V", "Paste into search"),
        Line::from(""),
        Line::from(Span::styled(
            "  [↑/↓] scroll  [Esc/?] close",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ]
}

fn section_header(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn help_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<16}", key),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(desc),
    ])
}
