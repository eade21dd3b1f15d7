/// Single-buffer text input with a byte cursor.
///
/// A non-zero `max_chars` is a hard clamp: an edit that would push the
/// buffer past it is rejected as a whole. While the whole buffer is
/// selected, the next insertion replaces it and the next deletion clears it.
pub struct InputState {
    buffer: String,
    cursor: usize,
    max_chars: usize,
    selected_all: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            max_chars: 0,
            selected_all: false,
        }
    }

    pub fn with_max_chars(max_chars: usize) -> Self {
        Self {
            max_chars,
            ..Self::new()
        }
    }

    pub fn set_max_chars(&mut self, max_chars: usize) {
        self.max_chars = max_chars;
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    fn fits(&self, char_count: usize) -> bool {
        self.max_chars == 0 || char_count <= self.max_chars
    }

    /// Returns false when the clamp rejected the character.
    pub fn insert_char(&mut self, c: char) -> bool {
        if self.selected_all {
            if !self.fits(1) {
                return false;
            }
            self.buffer.clear();
            self.buffer.push(c);
            self.cursor = c.len_utf8();
            self.selected_all = false;
            return true;
        }

        if !self.fits(self.char_len() + 1) {
            return false;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    pub fn insert_str(&mut self, text: &str) -> bool {
        let base = if self.selected_all { 0 } else { self.char_len() };
        if !self.fits(base + text.chars().count()) {
            return false;
        }
        if self.selected_all {
            self.buffer.clear();
            self.cursor = 0;
            self.selected_all = false;
        }
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        true
    }

    pub fn backspace(&mut self) {
        if self.selected_all {
            self.clear();
            return;
        }
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
            self.buffer.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.selected_all {
            self.clear();
            return;
        }
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        if self.selected_all {
            self.selected_all = false;
            self.cursor = 0;
            return;
        }
        if let Some(prev) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if self.selected_all {
            self.selected_all = false;
            self.cursor = self.buffer.len();
            return;
        }
        if let Some(next) = self.buffer[self.cursor..].chars().next() {
            self.cursor += next.len_utf8();
        }
    }

    pub fn move_home(&mut self) {
        self.selected_all = false;
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.selected_all = false;
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.selected_all = false;
    }

    /// Replaces the content without applying the clamp; the cursor lands
    /// at the end.
    pub fn set(&mut self, text: String) {
        self.buffer = text;
        self.cursor = self.buffer.len();
        self.selected_all = false;
    }

    pub fn select_all(&mut self) {
        self.selected_all = true;
        self.cursor = self.buffer.len();
    }

    pub fn is_selected_all(&self) -> bool {
        self.selected_all
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn cursor_pos(&self) -> usize {
        self.cursor
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
