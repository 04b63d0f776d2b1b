//! Minimal multi-line text area for JSON body fields.
//!
//! Supports insertion, deletion, newlines, and cursor movement with
//! scrolling; no selection or mouse handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Widget},
};

/// A small editable text region backed by a line buffer.
#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    col: usize,
    scroll: usize,
    style: Style,
    cursor_style: Style,
}

impl Default for TextArea {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            scroll: 0,
            style: Style::default(),
            cursor_style: Style::default().fg(Color::Black).bg(Color::White),
        }
    }
}

impl TextArea {
    pub fn new(content: &str) -> Self {
        let mut area = Self::default();
        area.set_content(content);
        area
    }

    /// Replace the buffer and park the cursor at the end.
    pub fn set_content(&mut self, content: &str) {
        self.lines = if content.is_empty() {
            vec![String::new()]
        } else {
            content.split('\n').map(str::to_string).collect()
        };
        self.row = self.lines.len() - 1;
        self.col = self.lines[self.row].chars().count();
        self.scroll = 0;
    }

    /// The buffer joined back into one string.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn clear(&mut self) {
        self.set_content("");
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Apply a key press. Unknown keys and control chords are ignored; the
    /// caller keeps Tab, Esc, and submit chords for itself.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert_char(c);
            }
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.col = 0,
            KeyCode::End => self.col = self.current_line_len(),
            _ => {}
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let byte_idx = char_to_byte(line, self.col);
        line.insert(byte_idx, c);
        self.col += 1;
    }

    /// Insert text at the cursor, splitting on newlines.
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.insert_newline();
            } else if c != '\r' {
                self.insert_char(c);
            }
        }
    }

    fn insert_newline(&mut self) {
        let line = &mut self.lines[self.row];
        let byte_idx = char_to_byte(line, self.col);
        let rest = line.split_off(byte_idx);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.col = 0;
    }

    fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let byte_idx = char_to_byte(line, self.col - 1);
            line.remove(byte_idx);
            self.col -= 1;
        } else if self.row > 0 {
            let removed = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.current_line_len();
            self.lines[self.row].push_str(&removed);
        }
    }

    fn delete_forward(&mut self) {
        if self.col < self.current_line_len() {
            let line = &mut self.lines[self.row];
            let byte_idx = char_to_byte(line, self.col);
            line.remove(byte_idx);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.current_line_len();
        }
    }

    fn move_right(&mut self) {
        if self.col < self.current_line_len() {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.current_line_len());
        }
    }

    fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.current_line_len());
        }
    }

    fn current_line_len(&self) -> usize {
        self.lines[self.row].chars().count()
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn cursor_style(mut self, style: Style) -> Self {
        self.cursor_style = style;
        self
    }

    /// Render inside an optional block, keeping the cursor in view.
    /// `show_cursor` is false when the field does not have focus.
    pub fn render_with_block(
        &self,
        area: Rect,
        buf: &mut Buffer,
        block: Option<Block>,
        show_cursor: bool,
    ) {
        let inner = if let Some(ref b) = block {
            let inner = b.inner(area);
            b.clone().render(area, buf);
            inner
        } else {
            area
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let visible = inner.height as usize;
        let scroll = if self.row >= self.scroll + visible {
            self.row - visible + 1
        } else if self.row < self.scroll {
            self.row
        } else {
            self.scroll
        };

        for (i, line) in self.lines.iter().skip(scroll).take(visible).enumerate() {
            let y = inner.y + i as u16;
            let line_idx = scroll + i;
            let chars: Vec<char> = line.chars().collect();

            for (j, c) in chars.iter().take(inner.width as usize).enumerate() {
                let x = inner.x + j as u16;
                let style = if show_cursor && line_idx == self.row && j == self.col {
                    self.cursor_style
                } else {
                    self.style
                };
                buf[(x, y)].set_char(*c).set_style(style);
            }

            if show_cursor && line_idx == self.row && self.col >= chars.len() {
                let x = inner.x + chars.len().min(inner.width as usize - 1) as u16;
                buf[(x, y)].set_char(' ').set_style(self.cursor_style);
            }
        }
    }
}

fn char_to_byte(line: &str, char_idx: usize) -> usize {
    line.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

impl Widget for &TextArea {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_with_block(area, buf, None, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(area: &mut TextArea, code: KeyCode) {
        area.handle_key(KeyEvent::from(code));
    }

    #[test]
    fn typing_builds_content() {
        let mut area = TextArea::default();
        for c in "{\"a\":1}".chars() {
            press(&mut area, KeyCode::Char(c));
        }
        assert_eq!(area.content(), "{\"a\":1}");
    }

    #[test]
    fn newline_splits_at_cursor() {
        let mut area = TextArea::new("ab");
        press(&mut area, KeyCode::Left);
        press(&mut area, KeyCode::Enter);
        assert_eq!(area.content(), "a\nb");
        assert_eq!(area.line_count(), 2);
    }

    #[test]
    fn backspace_joins_lines() {
        let mut area = TextArea::new("a\nb");
        press(&mut area, KeyCode::Home);
        press(&mut area, KeyCode::Backspace);
        assert_eq!(area.content(), "ab");
    }

    #[test]
    fn set_content_round_trips() {
        let pretty = "{\n  \"a\": 1\n}";
        let area = TextArea::new(pretty);
        assert_eq!(area.content(), pretty);
        assert!(!area.is_blank());
        assert!(TextArea::new("  \n ").is_blank());
    }

    #[test]
    fn insert_str_handles_newlines() {
        let mut area = TextArea::default();
        area.insert_str("{\n  \"a\": 1\n}");
        assert_eq!(area.line_count(), 3);
        assert_eq!(area.content(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn control_chords_are_ignored() {
        let mut area = TextArea::default();
        area.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(area.content(), "");
    }
}
