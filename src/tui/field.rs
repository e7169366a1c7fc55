use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::util::unicode;

/// Single-line text input with a grapheme-aware byte cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextField {
    buffer: String,
    cursor: usize,
}

impl TextField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field pre-filled with `text`, cursor at the end
    pub fn with_text(text: &str) -> Self {
        TextField {
            buffer: text.to_string(),
            cursor: text.len(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.buffer.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_word_left(&mut self) {
        let start = unicode::word_boundary_left(&self.buffer, self.cursor);
        self.buffer.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn left(&mut self) {
        if let Some(prev) = unicode::prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = unicode::next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Apply a line-editing key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match (key.modifiers, key.code) {
            (m, KeyCode::Left) if m.contains(KeyModifiers::ALT) => {
                self.cursor = unicode::word_boundary_left(&self.buffer, self.cursor);
            }
            (m, KeyCode::Right) if m.contains(KeyModifiers::ALT) => {
                self.cursor = unicode::word_boundary_right(&self.buffer, self.cursor);
            }
            (_, KeyCode::Left) => self.left(),
            (_, KeyCode::Right) => self.right(),
            (_, KeyCode::Home) => self.home(),
            (_, KeyCode::End) => self.end(),
            (KeyModifiers::CONTROL, KeyCode::Char('a')) => self.home(),
            (KeyModifiers::CONTROL, KeyCode::Char('e')) => self.end(),
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.buffer.drain(..self.cursor);
                self.cursor = 0;
            }
            // Word backspace (Alt or Ctrl)
            (m, KeyCode::Backspace)
                if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
            {
                self.delete_word_left();
            }
            (KeyModifiers::CONTROL, KeyCode::Char('w')) => self.delete_word_left(),
            (_, KeyCode::Backspace) => self.backspace(),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => self.insert(c),
            _ => return false,
        }
        true
    }

    /// Display column of the cursor, for drawing the caret
    pub fn cursor_col(&self) -> usize {
        unicode::byte_offset_to_display_col(&self.buffer, self.cursor)
    }
}
