use crossterm::event::KeyCode;

/// Cursor and horizontal-scroll state for a single-line input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    cursor: usize, // character index, 0 = before first char
    scroll: usize, // first visible character when text > width
}

impl InputState {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: usize, value: &str) {
        self.cursor = pos.min(value.chars().count());
    }

    pub fn move_to_end(&mut self, value: &str) {
        self.cursor = value.chars().count();
    }

    /// Apply a key to `value`. Returns `Some(new_value)` when the text
    /// changed, `None` when only the cursor moved or the key was ignored.
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        value: &str,
        max_chars: Option<usize>,
    ) -> Option<String> {
        let char_count = value.chars().count();

        match key {
            KeyCode::Char(c) => {
                if let Some(max) = max_chars {
                    if char_count >= max {
                        return None;
                    }
                }
                let mut chars: Vec<char> = value.chars().collect();
                chars.insert(self.cursor, c);
                self.cursor += 1;
                Some(chars.into_iter().collect())
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let mut chars: Vec<char> = value.chars().collect();
                    chars.remove(self.cursor - 1);
                    self.cursor -= 1;
                    Some(chars.into_iter().collect())
                } else {
                    None
                }
            }
            KeyCode::Delete => {
                if self.cursor < char_count {
                    let mut chars: Vec<char> = value.chars().collect();
                    chars.remove(self.cursor);
                    Some(chars.into_iter().collect())
                } else {
                    None
                }
            }
            KeyCode::Left => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                }
                None
            }
            KeyCode::Right => {
                if self.cursor < char_count {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = char_count;
                None
            }
            _ => None,
        }
    }

    /// Keep the cursor inside the visible window. Called before drawing.
    pub fn update_scroll(&mut self, visible_width: usize, value: &str) {
        if visible_width == 0 {
            return;
        }
        let char_count = value.chars().count();
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + visible_width {
            self.scroll = self.cursor.saturating_sub(visible_width - 1);
        }
        self.scroll = self.scroll.min(char_count.saturating_sub(visible_width));
    }

    /// The visible slice of `value` and the cursor column within it.
    pub fn window(&self, value: &str, visible_width: usize) -> (String, usize) {
        let text: String = value
            .chars()
            .skip(self.scroll)
            .take(visible_width)
            .collect();
        (text, self.cursor.saturating_sub(self.scroll))
    }
}

/// An input's value paired with its editing state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    pub value: String,
    pub state: InputState,
}

impl InputField {
    /// Returns true when the value changed.
    pub fn handle_key(&mut self, key: KeyCode, max_chars: usize) -> bool {
        match self.state.handle_key(key, &self.value, Some(max_chars)) {
            Some(new_value) => {
                self.value = new_value;
                true
            }
            None => false,
        }
    }

    /// Replace the value, restoring a previous cursor position.
    pub fn restore(&mut self, value: String, cursor: usize) {
        self.state.set_cursor(cursor, &value);
        self.value = value;
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.state = InputState::default();
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> InputField {
        let mut field = InputField::default();
        for c in text.chars() {
            field.handle_key(KeyCode::Char(c), 100);
        }
        field
    }

    #[test]
    fn typing_inserts_at_cursor() {
        let mut field = typed("hola");
        field.handle_key(KeyCode::Left, 100);
        field.handle_key(KeyCode::Left, 100);
        field.handle_key(KeyCode::Char('l'), 100);
        assert_eq!(field.value, "holla");
        assert_eq!(field.state.cursor(), 3);
    }

    #[test]
    fn backspace_at_start_is_ignored() {
        let mut field = typed("ab");
        field.handle_key(KeyCode::Home, 100);
        assert!(!field.handle_key(KeyCode::Backspace, 100));
        assert_eq!(field.value, "ab");
    }

    #[test]
    fn max_length_blocks_insertion() {
        let mut field = typed("abc");
        assert!(!field.handle_key(KeyCode::Char('d'), 3));
        assert_eq!(field.value, "abc");
    }

    #[test]
    fn multibyte_input_stays_on_char_boundaries() {
        let mut field = typed("café");
        field.handle_key(KeyCode::Backspace, 100);
        assert_eq!(field.value, "caf");
        field.handle_key(KeyCode::Char('é'), 100);
        assert_eq!(field.value, "café");
    }

    #[test]
    fn restore_clamps_cursor() {
        let mut field = InputField::default();
        field.restore("hi".to_string(), 40);
        assert_eq!(field.state.cursor(), 2);
    }

    #[test]
    fn window_follows_cursor() {
        let mut field = typed("abcdefghij");
        field.state.update_scroll(4, &field.value);
        let (text, cursor_col) = field.state.window(&field.value, 4);
        assert_eq!(text, "ghij");
        assert_eq!(cursor_col, 3);
    }
}
