//! Shared Model Types

use unicode_width::UnicodeWidthStr;

/// Which way a status message leans, drives its color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Status line shown under the download action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: StatusKind::Error,
        }
    }
}

/// What the status page knows about the installed extension
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionInfoView {
    pub path: String,
    pub last_updated: i64,
}

/// Text input for choosing a new install location
///
/// `cursor` is a char index into `value`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathInputState {
    pub value: String,
    pub cursor: usize,
}

impl PathInputState {
    pub fn new(initial: impl Into<String>) -> Self {
        let value = initial.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    fn byte_index(&self) -> usize {
        self.value
            .char_indices()
            .nth(self.cursor)
            .map(|(idx, _)| idx)
            .unwrap_or(self.value.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.value.insert(idx, c);
        self.cursor += 1;
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.value.remove(idx);
    }

    /// Delete the char under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let idx = self.byte_index();
            self.value.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Display width of the text before the cursor (for terminal cursor placement)
    pub fn cursor_display_offset(&self) -> usize {
        let idx = self.byte_index();
        self.value[..idx].width()
    }

    /// Trimmed value, `None` when blank
    pub fn submitted_value(&self) -> Option<&str> {
        let trimmed = self.value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_places_cursor_at_end() {
        let input = PathInputState::new("/home/ü");
        assert_eq!(input.cursor, 7);
    }

    #[test]
    fn test_insert_and_backspace_in_middle() {
        let mut input = PathInputState::new("/ab");
        input.move_left();
        input.insert_char('x');
        assert_eq!(input.value, "/axb");
        assert_eq!(input.cursor, 3);

        input.backspace();
        assert_eq!(input.value, "/ab");
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = PathInputState::new("dé");
        input.backspace();
        assert_eq!(input.value, "d");
        input.insert_char('ö');
        assert_eq!(input.value, "dö");
        input.move_home();
        input.delete();
        assert_eq!(input.value, "ö");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = PathInputState::new("ab");
        input.move_right();
        assert_eq!(input.cursor, 2);
        input.move_home();
        input.move_left();
        assert_eq!(input.cursor, 0);
        input.backspace();
        assert_eq!(input.value, "ab");
        input.move_end();
        input.delete();
        assert_eq!(input.value, "ab");
    }

    #[test]
    fn test_cursor_display_offset_counts_wide_chars() {
        let mut input = PathInputState::new("a漢b");
        input.move_left();
        // 'a' is 1 column, '漢' is 2
        assert_eq!(input.cursor_display_offset(), 3);
    }

    #[test]
    fn test_submitted_value_trims() {
        assert_eq!(PathInputState::new("  /x  ").submitted_value(), Some("/x"));
        assert_eq!(PathInputState::new("   ").submitted_value(), None);
        let mut input = PathInputState::new("/x");
        input.clear();
        assert_eq!(input.submitted_value(), None);
    }
}
