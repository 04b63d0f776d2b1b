//! Color palette for the dashboard.

use ratatui::style::Color;

/// Colors used across every view.
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub enabled: Color,
    pub disabled: Color,
    pub focus: Color,
    pub key_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::DarkGray,
            border: Color::Gray,
            header_bg: Color::Cyan,
            header_fg: Color::Black,
            enabled: Color::Green,
            disabled: Color::DarkGray,
            focus: Color::Yellow,
            key_fg: Color::Cyan,
        }
    }
}

impl Theme {
    /// Color for a method tag, matching the common REST tooling palette.
    pub fn method_color(&self, method: fakeit_client::HttpMethod) -> Color {
        use fakeit_client::HttpMethod;
        match method {
            HttpMethod::Get => Color::Green,
            HttpMethod::Post => Color::Blue,
            HttpMethod::Put => Color::Yellow,
            HttpMethod::Delete => Color::Red,
            HttpMethod::Patch => Color::Magenta,
        }
    }
}
