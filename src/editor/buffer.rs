use ropey::Rope;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            col_memory: col,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A text buffer backed by a rope data structure.
///
/// The in-process text-editing primitive: insertion, deletion, line-based
/// operations and the inline formatting commands all live here. The cursor
/// tracks the current editing position.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
        }
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx);
        let s = line.to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
    }

    /// Insert a string at the cursor position.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let char_idx = self.cursor_char_idx();
        self.rope.insert(char_idx, s);

        // Move cursor to end of inserted text
        let lines: Vec<&str> = s.split('\n').collect();
        if lines.len() > 1 {
            self.cursor.line += lines.len() - 1;
            self.cursor.set_col(lines.last().map_or(0, |l| l.len()));
        } else {
            self.cursor.set_col(self.cursor.col + s.len());
        }
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        if self.cursor.col == 0 {
            // Join with previous line
            let prev_line_len = self.line_len(self.cursor.line - 1);
            let char_idx = self.cursor_char_idx();
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            let char_idx = self.cursor_char_idx();
            let line = self.rope.line(self.cursor.line);
            let line_str = line.to_string();
            let before = &line_str[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len && self.cursor.line + 1 >= self.line_count() {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        self.rope.remove(char_idx..=char_idx);
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col];
        let trimmed = before.trim_end();

        if trimmed.is_empty() {
            self.cursor.set_col(0);
            return;
        }

        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + 1);
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];

        // Skip current word characters
        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());

        // Skip whitespace/punctuation after word
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move cursor to a specific line and column.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let max_col = self.line_len(self.cursor.line);
        self.cursor.set_col(col.min(max_col));
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    /// Toggle an inline marker pair (`**`, `*`, `__`) around the word at
    /// the cursor.
    ///
    /// With no word under the cursor, an empty marker pair is inserted and
    /// the cursor lands between the markers.
    pub fn toggle_inline_marker(&mut self, marker: &str) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let col = self.cursor.col.min(line.len());
        let (start, end) = word_bounds(&line, col);

        if start == end {
            self.insert_str(marker);
            self.insert_str(marker);
            self.cursor.set_col(self.cursor.col - marker.len());
            return;
        }

        let already_marked =
            line[..start].ends_with(marker) && line[end..].starts_with(marker);
        if already_marked {
            let new_line = format!(
                "{}{}{}",
                &line[..start - marker.len()],
                &line[start..end],
                &line[end + marker.len()..]
            );
            self.replace_line(self.cursor.line, &new_line);
            let col = if col >= start { col - marker.len() } else { col };
            self.cursor.set_col(col.min(new_line.len()));
        } else {
            let new_line = format!(
                "{}{marker}{}{marker}{}",
                &line[..start],
                &line[start..end],
                &line[end..]
            );
            self.replace_line(self.cursor.line, &new_line);
            let col = if col >= start { col + marker.len() } else { col };
            self.cursor.set_col(col.min(new_line.len()));
        }
    }

    /// Toggle a list prefix (`- `, `1. `) at the start of the current line.
    pub fn toggle_line_prefix(&mut self, prefix: &str) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        if let Some(rest) = line.strip_prefix(prefix) {
            let rest = rest.to_string();
            self.replace_line(self.cursor.line, &rest);
            self.cursor
                .set_col(self.cursor.col.saturating_sub(prefix.len()).min(rest.len()));
        } else {
            let new_line = format!("{prefix}{line}");
            self.replace_line(self.cursor.line, &new_line);
            self.cursor
                .set_col((self.cursor.col + prefix.len()).min(new_line.len()));
        }
    }

    // --- Private helpers ---

    /// Convert cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line = self.rope.line(self.cursor.line);
        let line_str: String = line.chars().collect();
        // Convert byte offset to char offset within the line
        let byte_col = self.cursor.col.min(line_str.len());
        let char_offset = line_str[..byte_col].chars().count();
        line_start + char_offset
    }

    /// Replace the content of a line (excluding its newline).
    fn replace_line(&mut self, line_idx: usize, new_text: &str) {
        let start_char = self.rope.line_to_char(line_idx);
        let old = self
            .line_at(line_idx)
            .unwrap_or_default()
            .chars()
            .count();
        self.rope.remove(start_char..start_char + old);
        self.rope.insert(start_char, new_text);
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }
}

/// Byte bounds of the word at (or just before) `col`.
fn word_bounds(line: &str, col: usize) -> (usize, usize) {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';

    let mut start = 0;
    for (i, ch) in line.char_indices() {
        if i >= col {
            break;
        }
        if !is_word(ch) {
            start = i + ch.len_utf8();
        }
    }

    let mut end = line.len();
    for (i, ch) in line[col.min(line.len())..].char_indices() {
        if !is_word(ch) {
            end = col + i;
            break;
        }
    }

    if start > end { (col, col) } else { (start, end) }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
    }

    #[test]
    fn test_text_roundtrip() {
        let content = "line one\nline two\nline three";
        let buf = EditorBuffer::from_text(content);
        assert_eq!(buf.text(), content);
    }

    #[test]
    fn test_line_at_out_of_bounds_returns_none() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.line_at(1), None);
    }

    // --- Editing ---

    #[test]
    fn test_insert_char_at_start() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.insert_char('H');
        assert_eq!(buf.line_at(0), Some("Hhello".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 1));
    }

    #[test]
    fn test_insert_char_at_end() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_end();
        buf.insert_char('!');
        assert_eq!(buf.line_at(0), Some("hello!".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(0, 6));
    }

    #[test]
    fn test_split_line_at_cursor() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(0, 2);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("he".to_string()));
        assert_eq!(buf.line_at(1), Some("llo".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_delete_back_at_origin_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to_end();
        assert!(!buf.delete_forward());
    }

    // --- Cursor movement ---

    #[test]
    fn test_vertical_movement_remembers_column() {
        let mut buf = EditorBuffer::from_text("long line here\nhi\nanother long line");
        buf.move_to(0, 8);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().line, 1);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 8);
    }

    #[test]
    fn test_move_left_wraps_to_previous_line() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_word_movement() {
        let mut buf = EditorBuffer::from_text("alpha beta gamma");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6); // start of "beta"
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 11); // start of "gamma"
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 6);
    }

    // --- Formatting commands ---

    #[test]
    fn test_toggle_marker_wraps_word_under_cursor() {
        let mut buf = EditorBuffer::from_text("make this bold");
        buf.move_to(0, 11); // inside "bold"
        buf.toggle_inline_marker("**");
        assert_eq!(buf.line_at(0), Some("make this **bold**".to_string()));
    }

    #[test]
    fn test_toggle_marker_removes_existing() {
        let mut buf = EditorBuffer::from_text("make this **bold**");
        buf.move_to(0, 13); // inside "bold"
        buf.toggle_inline_marker("**");
        assert_eq!(buf.line_at(0), Some("make this bold".to_string()));
    }

    #[test]
    fn test_toggle_marker_without_word_inserts_pair() {
        let mut buf = EditorBuffer::empty();
        buf.toggle_inline_marker("*");
        assert_eq!(buf.line_at(0), Some("**".to_string()));
        assert_eq!(buf.cursor().col, 1);
    }

    #[test]
    fn test_toggle_underline_marker() {
        let mut buf = EditorBuffer::from_text("note");
        buf.move_to(0, 2);
        buf.toggle_inline_marker("__");
        assert_eq!(buf.line_at(0), Some("__note__".to_string()));
    }

    #[test]
    fn test_toggle_line_prefix_adds_and_removes() {
        let mut buf = EditorBuffer::from_text("item one");
        buf.toggle_line_prefix("- ");
        assert_eq!(buf.line_at(0), Some("- item one".to_string()));
        buf.toggle_line_prefix("- ");
        assert_eq!(buf.line_at(0), Some("item one".to_string()));
    }

    #[test]
    fn test_toggle_ordered_prefix_keeps_other_lines() {
        let mut buf = EditorBuffer::from_text("first\nsecond");
        buf.move_to(1, 0);
        buf.toggle_line_prefix("1. ");
        assert_eq!(buf.text(), "first\n1. second");
    }
}
