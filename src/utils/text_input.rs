use crate::keymap::Action;
use crossterm::event::{KeyCode, KeyModifiers};

/// Which characters an input accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputKind {
    /// Any printable character, including accented letters
    #[default]
    Text,
    /// Digits plus the usual phone punctuation: `(18) 99999-0000`
    Phone,
    /// Digits and a single decimal separator (`.` or `,`): `30,50`
    Decimal,
    /// `HH:MM`
    Time,
}

impl InputKind {
    fn accepts(&self, current: &str, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        match self {
            InputKind::Text => true,
            InputKind::Phone => c.is_ascii_digit() || matches!(c, '(' | ')' | '-' | ' ' | '+'),
            InputKind::Decimal => {
                c.is_ascii_digit() || (matches!(c, '.' | ',') && !current.contains(['.', ',']))
            }
            InputKind::Time => c.is_ascii_digit() || (c == ':' && !current.contains(':')),
        }
    }
}

/// Single-line text field: text plus a cursor counted in chars.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
    kind: InputKind,
    max_len: Option<usize>,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(kind: InputKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut input = Self::new();
        input.set_text(text);
        input
    }

    /// Limit the number of characters the field accepts.
    pub fn max_len(mut self, max: usize) -> Self {
        self.max_len = Some(max);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn text_trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Blank counts as empty.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Insert at the cursor. Returns false when the field rejects `c`.
    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.kind.accepts(&self.text, c) {
            return false;
        }
        if self.max_len.is_some_and(|max| self.char_count() >= max) {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_index(self.cursor);
            self.text.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Raw key handling. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => {
                self.backspace();
                true
            }
            KeyCode::Delete => {
                self.delete();
                true
            }
            KeyCode::Left => {
                self.move_left();
                true
            }
            KeyCode::Right => {
                self.move_right();
                true
            }
            KeyCode::Home => {
                self.move_home();
                true
            }
            KeyCode::End => {
                self.move_end();
                true
            }
            _ => false,
        }
    }

    /// Keymap action handling. Returns true if the action was consumed.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Home => self.move_home(),
            Action::End => self.move_end(),
            Action::Backspace => self.backspace(),
            Action::DeleteChar => self.delete(),
            _ => return false,
        }
        true
    }

    /// Printable keys are typed as text; anything else goes through the
    /// mapped action first, then raw key handling.
    pub fn handle_key_with_action(
        &mut self,
        key_code: KeyCode,
        modifiers: KeyModifiers,
        action: Option<Action>,
    ) -> bool {
        if !is_typed_char(key_code, modifiers) {
            if let Some(action) = action {
                if self.handle_action(action) {
                    return true;
                }
            }
        }
        self.handle_key(key_code)
    }

    /// Actions the screen still handles while a text field has focus.
    ///
    /// Everything else (e.g. `q` for Quit) goes to the field.
    pub fn is_action_allowed_when_focused(action: &Action) -> bool {
        matches!(
            action,
            Action::Cancel
                | Action::Confirm
                | Action::NextTab
                | Action::PrevTab
                | Action::MoveUp
                | Action::MoveDown
                | Action::Save
                | Action::Restart
        )
    }
}

/// A key that produces a character rather than a shortcut.
pub fn is_typed_char(code: KeyCode, modifiers: KeyModifiers) -> bool {
    matches!(code, KeyCode::Char(_))
        && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
