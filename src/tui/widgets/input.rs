//! Text input widget
//!
//! A single-line text field with a cursor. The cursor counts characters, not
//! bytes, so descriptions with accents or emoji edit correctly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A simple text input widget
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position in characters
    pub cursor: usize,
    /// Whether the input is focused
    pub focused: bool,
    /// Placeholder text
    pub placeholder: String,
    /// Label
    pub label: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set content and move the cursor to the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.cursor = self.char_len();
        self
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let index = self.byte_index(self.cursor);
        self.content.insert(index, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let index = self.byte_index(self.cursor);
            self.content.remove(index);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let index = self.byte_index(self.cursor);
            self.content.remove(index);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn value(&self) -> &str {
        &self.content
    }
}

impl Widget for TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_width = if self.label.is_empty() {
            0
        } else {
            u16::try_from(self.label.chars().count() + 2).unwrap_or(u16::MAX)
        };

        let input_start = area.x.saturating_add(label_width);

        if !self.label.is_empty() {
            let label_line = Line::from(vec![
                Span::styled(self.label.as_str(), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
            ]);
            buf.set_line(area.x, area.y, &label_line, label_width);
        }

        let showing_placeholder = self.content.is_empty() && !self.focused;
        let (display_text, text_style) = if showing_placeholder {
            (self.placeholder.as_str(), Style::default().fg(Color::DarkGray))
        } else {
            (self.content.as_str(), Style::default())
        };

        let available = area.width.saturating_sub(label_width) as usize;
        buf.set_stringn(input_start, area.y, display_text, available, text_style);

        if self.focused {
            let cursor_x = u16::try_from(self.cursor)
                .ok()
                .map(|offset| input_start.saturating_add(offset))
                .filter(|x| *x < area.right());
            if let Some(cursor_x) = cursor_x {
                let cursor_char = self.content.chars().nth(self.cursor).unwrap_or(' ');
                buf.set_string(
                    cursor_x,
                    area.y,
                    cursor_char.to_string(),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing() {
        let mut input = TextInput::new().content("ab");
        assert_eq!(input.cursor, 2);

        input.move_left();
        input.insert('x');
        assert_eq!(input.value(), "axb");

        input.backspace();
        assert_eq!(input.value(), "ab");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "b");

        input.clear();
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_render_long_input_keeps_cursor_in_area() {
        let area = Rect::new(0, 0, 12, 1);
        let long = "x".repeat(70_000);

        let mut buf = Buffer::empty(area);
        TextInput::new()
            .label("Note")
            .focused(true)
            .content(long.clone())
            .render(area, &mut buf);
        assert_eq!(buf[(6, 0)].symbol(), "x");

        let mut input = TextInput::new().focused(true).content("ab");
        input.move_start();
        let mut buf = Buffer::empty(area);
        input.render(area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, Color::Cyan);

        let mut buf = Buffer::empty(area);
        TextInput::new()
            .label("x".repeat(70_000))
            .focused(true)
            .content(long)
            .render(area, &mut buf);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut input = TextInput::new().content("café");
        input.backspace();
        assert_eq!(input.value(), "caf");
        input.insert('é');
        input.move_left();
        input.move_left();
        input.insert('-');
        assert_eq!(input.value(), "ca-fé");
    }
}
