use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the UI to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Nothing to do; no redraw needed.
    Ignored,
    /// The input line changed.
    Edited,
    /// Submit this line; the editor is already empty.
    Submit(String),
    /// Scroll the result region by this many lines (negative is up).
    Scroll(isize),
    Quit,
}

/// Single-line UTF-8 editor. `cursor` is a byte offset, always on a char
/// boundary.
#[derive(Debug, Default, Clone)]
pub struct LineEditor {
    text: String,
    cursor: usize,
}

impl LineEditor {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::Ignored;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL)
            | (KeyCode::Char('q'), KeyModifiers::CONTROL) => return KeyAction::Quit,
            (KeyCode::PageUp, _) => return KeyAction::Scroll(-5),
            (KeyCode::PageDown, _) => return KeyAction::Scroll(5),
            (KeyCode::Up, _) => return KeyAction::Scroll(-1),
            (KeyCode::Down, _) => return KeyAction::Scroll(1),
            (KeyCode::Enter, _) => return KeyAction::Submit(self.take()),
            (KeyCode::Left, _) => self.left(),
            (KeyCode::Right, _) => self.right(),
            (KeyCode::Home, _) => self.cursor = 0,
            (KeyCode::End, _) => self.cursor = self.text.len(),
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Delete, _) => self.delete(),
            (KeyCode::Esc, _) => {
                self.take();
            }
            (KeyCode::Char(ch), m) if !m.contains(KeyModifiers::CONTROL) => self.insert(ch),
            _ => return KeyAction::Ignored,
        }
        KeyAction::Edited
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn left(&mut self) {
        if let Some((idx, _)) = self.text[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    fn right(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    fn insert(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn backspace(&mut self) {
        let end = self.cursor;
        self.left();
        self.text.drain(self.cursor..end);
    }

    fn delete(&mut self) {
        if let Some(ch) = self.text[self.cursor..].chars().next() {
            self.text.drain(self.cursor..self.cursor + ch.len_utf8());
        }
    }
}
