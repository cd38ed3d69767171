//! Modal line buffer behind the query editor
//!
//! Holds the text as a list of lines plus a cursor and the current editing
//! mode. Columns count characters, not bytes. Every edit leaves the buffer
//! with at least one line and the cursor inside the text.

/// Editing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
        }
    }
}

/// Characters that make up a word for `w`/`b` motion. Operators count so
/// that `*` or `>=` are stops of their own.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '*' | '-' | '+' | '=' | '<' | '>')
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
    mode: Mode,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
            mode: Mode::Normal,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    /// Replace the whole buffer. The cursor goes to the top-left and the
    /// mode is left alone.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text
            .split('\n')
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect();
        self.row = 0;
        self.col = 0;
        self.check_invariants();
    }

    /// Full contents, lines joined with `\n`
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty)
    }

    /// Cursor as (row, column)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Current line split at the cursor
    pub fn split_at_cursor(&self) -> (&str, &str) {
        let line = &self.lines[self.row];
        line.split_at(byte_offset(line, self.col))
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    // ── Motion ───────────────────────────────────────────────

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
        self.check_invariants();
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
        self.check_invariants();
    }

    /// One cell left; from column 0 continues at the end of the previous line
    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
        self.check_invariants();
    }

    /// One cell right; from end of line continues at the start of the next one
    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
        self.check_invariants();
    }

    /// Jump to the start of the next word on this line, or to end of line
    pub fn word_forward(&mut self) {
        let chars: Vec<char> = self.lines[self.row].chars().collect();
        let mut col = self.col;
        while col < chars.len() && !is_word_char(chars[col]) {
            col += 1;
        }
        while col < chars.len() && is_word_char(chars[col]) {
            col += 1;
        }
        while col < chars.len() && !is_word_char(chars[col]) {
            col += 1;
        }
        self.col = col;
        self.check_invariants();
    }

    /// Jump to the start of the previous word on this line, or to column 0
    pub fn word_backward(&mut self) {
        let chars: Vec<char> = self.lines[self.row].chars().collect();
        let mut col = self.col;
        while col > 0 && !is_word_char(chars[col - 1]) {
            col -= 1;
        }
        while col > 0 && is_word_char(chars[col - 1]) {
            col -= 1;
        }
        self.col = col;
        self.check_invariants();
    }

    // ── Editing ──────────────────────────────────────────────

    pub fn insert_char(&mut self, c: char) {
        if c == '\n' {
            self.split_line();
            return;
        }
        let line = &mut self.lines[self.row];
        let at = byte_offset(line, self.col);
        line.insert(at, c);
        self.col += 1;
        self.check_invariants();
    }

    /// Insert a run of text, honouring newlines
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\r') {
            self.insert_char(c);
        }
    }

    /// Move everything right of the cursor onto a new line below
    pub fn split_line(&mut self) {
        let line = &mut self.lines[self.row];
        let at = byte_offset(line, self.col);
        let tail = line.split_off(at);
        self.lines.insert(self.row + 1, tail);
        self.row += 1;
        self.col = 0;
        self.check_invariants();
    }

    /// Delete the character left of the cursor, or join with the previous
    /// line when sitting at column 0
    pub fn backspace(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let at = byte_offset(line, self.col - 1);
            line.remove(at);
            self.col -= 1;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
        }
        self.check_invariants();
    }

    fn check_invariants(&self) {
        debug_assert!(!self.lines.is_empty(), "buffer lost its last line");
        debug_assert!(self.row < self.lines.len(), "cursor row out of range");
        debug_assert!(
            self.col <= self.line_len(self.row),
            "cursor column past end of line"
        );
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte index of a character column, clamped to the end of the line
fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}
