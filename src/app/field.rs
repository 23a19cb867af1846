use unicode_width::UnicodeWidthStr;

use crate::app::types::{EditAction, TextField};

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Terminal columns between the start of the text and the cursor.
    pub fn visual_cursor(&self) -> usize {
        UnicodeWidthStr::width(&self.value[..self.byte_offset(self.cursor)])
    }

    /// Replaces the text and parks the cursor at the end.
    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::new(value);
    }

    /// Applies one edit. Returns true when the text changed.
    pub fn apply(&mut self, action: EditAction) -> bool {
        let len = self.value.chars().count();
        match action {
            EditAction::Insert(c) => {
                let at = self.byte_offset(self.cursor);
                self.value.insert(at, c);
                self.cursor += 1;
                true
            }
            EditAction::Backspace => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                true
            }
            EditAction::Delete => {
                if self.cursor >= len {
                    return false;
                }
                let at = self.byte_offset(self.cursor);
                self.value.remove(at);
                true
            }
            EditAction::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            EditAction::Right => {
                self.cursor = (self.cursor + 1).min(len);
                false
            }
            EditAction::Home => {
                self.cursor = 0;
                false
            }
            EditAction::End => {
                self.cursor = len;
                false
            }
            EditAction::ClearLine => {
                let changed = !self.value.is_empty();
                self.value.clear();
                self.cursor = 0;
                changed
            }
            EditAction::DeleteWord => {
                let chars: Vec<char> = self.value.chars().collect();
                let mut start = self.cursor;
                while start > 0 && chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                while start > 0 && !chars[start - 1].is_whitespace() {
                    start -= 1;
                }
                if start == self.cursor {
                    return false;
                }
                let from = self.byte_offset(start);
                let to = self.byte_offset(self.cursor);
                self.value.replace_range(from..to, "");
                self.cursor = start;
                true
            }
        }
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_move() {
        let mut field = TextField::new("ac");
        assert_eq!(field.cursor(), 2);
        field.apply(EditAction::Left);
        assert!(field.apply(EditAction::Insert('b')));
        assert_eq!(field.value(), "abc");
        assert_eq!(field.cursor(), 2);
        field.apply(EditAction::Home);
        assert!(!field.apply(EditAction::Backspace));
        assert!(field.apply(EditAction::Delete));
        assert_eq!(field.value(), "bc");
        field.apply(EditAction::End);
        assert!(!field.apply(EditAction::Delete));
        assert!(!field.apply(EditAction::Right));
        assert_eq!(field.cursor(), 2);
    }

    #[test]
    fn multibyte_text_is_edited_by_char() {
        let mut field = TextField::new("héllo");
        field.apply(EditAction::Home);
        field.apply(EditAction::Right);
        field.apply(EditAction::Right);
        assert!(field.apply(EditAction::Backspace));
        assert_eq!(field.value(), "hllo");
        assert_eq!(field.visual_cursor(), 1);
    }

    #[test]
    fn delete_word_and_clear_line() {
        let mut field = TextField::new("-o ServerAlive=1  ");
        assert!(field.apply(EditAction::DeleteWord));
        assert_eq!(field.value(), "-o ");
        assert!(field.apply(EditAction::ClearLine));
        assert_eq!(field.value(), "");
        assert!(!field.apply(EditAction::ClearLine));
        assert!(!field.apply(EditAction::DeleteWord));
    }
}
