//! Key bindings written as strings such as `"j"`, `"ctrl+n"`, `"shift+tab"`.

use super::Action;
use crossterm::event::{KeyCode, KeyModifiers};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    /// Key string, e.g. `"down"`, `"ctrl+s"`
    pub key: String,
    pub action: Action,
    /// Overrides the action's own description in the footer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedKey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl ParsedKey {
    /// Canonical form so that `G`, `shift+g` and `?` compare the way users expect.
    ///
    /// Terminals disagree on whether uppercase letters and shifted symbols
    /// carry the SHIFT modifier, so letters always get it and symbols never do.
    pub fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(c) if c.is_ascii_uppercase() => Self {
                code: KeyCode::Char(c.to_ascii_lowercase()),
                modifiers: self.modifiers | KeyModifiers::SHIFT,
            },
            KeyCode::Char(c) if !c.is_alphanumeric() => Self {
                code: self.code,
                modifiers: self.modifiers - KeyModifiers::SHIFT,
            },
            // Shift+Tab arrives as BackTab
            KeyCode::BackTab => Self {
                code: KeyCode::Tab,
                modifiers: self.modifiers | KeyModifiers::SHIFT,
            },
            _ => self,
        }
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
            description: None,
        }
    }

    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        let Ok(parsed) = self.parse() else {
            return false;
        };
        parsed.normalized() == ParsedKey { code, modifiers }.normalized()
    }

    pub fn parse(&self) -> Result<ParsedKey, String> {
        parse_key_string(&self.key)
    }

    /// Footer form, e.g. `Ctrl+S`
    pub fn display(&self) -> String {
        format_key_display(&self.key)
    }

    pub fn get_description(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or_else(|| self.action.description())
    }
}

/// Parse `"ctrl+shift+n"` into a key code and modifiers.
pub fn parse_key_string(key: &str) -> Result<ParsedKey, String> {
    let key = key.trim().to_lowercase();
    let (modifier_part, key_part) = match key.rsplit_once('+') {
        // `alt++` style: the key itself is '+'
        Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
        Some((mods, k)) => (mods, k),
        None => ("", key.as_str()),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in modifier_part.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        modifiers |= match part {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "option" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            "super" | "meta" | "cmd" | "command" => KeyModifiers::SUPER,
            other => return Err(format!("Unknown modifier: {}", other)),
        };
    }

    Ok(ParsedKey {
        code: parse_key_code(key_part)?,
        modifiers,
    })
}

fn parse_key_code(key: &str) -> Result<KeyCode, String> {
    let key = key.trim();
    let code = match key {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "page_up" | "pgup" => KeyCode::PageUp,
        "pagedown" | "page_down" | "pgdn" => KeyCode::PageDown,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" | "bs" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "insert" | "ins" => KeyCode::Insert,
        _ => {
            if let Some(n) = key.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Ok(KeyCode::F(n));
                }
            }
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("Unknown key: {}", key)),
            }
        }
    };
    Ok(code)
}

/// `"ctrl+n"` -> `"Ctrl+N"`, `"up"` -> `"↑"`
pub fn format_key_display(key: &str) -> String {
    key.split('+')
        .map(|part| {
            let part = part.trim().to_lowercase();
            match part.as_str() {
                "ctrl" | "control" => "Ctrl".to_string(),
                "alt" | "option" => "Alt".to_string(),
                "shift" => "Shift".to_string(),
                "super" | "meta" | "cmd" | "command" => "Cmd".to_string(),
                "up" => "↑".to_string(),
                "down" => "↓".to_string(),
                "left" => "←".to_string(),
                "right" => "→".to_string(),
                "enter" | "return" => "Enter".to_string(),
                "esc" | "escape" => "Esc".to_string(),
                "space" => "Space".to_string(),
                "tab" => "Tab".to_string(),
                "backspace" | "bs" => "Backspace".to_string(),
                "delete" | "del" => "Del".to_string(),
                "pageup" | "page_up" | "pgup" => "PgUp".to_string(),
                "pagedown" | "page_down" | "pgdn" => "PgDn".to_string(),
                "home" => "Home".to_string(),
                "end" => "End".to_string(),
                _ => part.to_uppercase(),
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_and_special_keys() {
        assert_eq!(parse_key_string("j").unwrap().code, KeyCode::Char('j'));
        assert_eq!(parse_key_string("enter").unwrap().code, KeyCode::Enter);
        assert_eq!(parse_key_string("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(parse_key_string("f12").unwrap().code, KeyCode::F(12));
        assert!(parse_key_string("f13").is_err());
        assert!(parse_key_string("hyper+j").is_err());
    }

    #[test]
    fn test_parse_modifiers() {
        let parsed = parse_key_string("ctrl+shift+n").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('n'));
        assert_eq!(parsed.modifiers, KeyModifiers::CONTROL | KeyModifiers::SHIFT);

        let parsed = parse_key_string("alt++").unwrap();
        assert_eq!(parsed.code, KeyCode::Char('+'));
        assert_eq!(parsed.modifiers, KeyModifiers::ALT);
    }

    #[test]
    fn test_uppercase_and_symbols_match_across_terminals() {
        let go_end = KeyBinding::new("shift+g", Action::GoToEnd);
        assert!(go_end.matches(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert!(go_end.matches(KeyCode::Char('G'), KeyModifiers::NONE));
        assert!(!go_end.matches(KeyCode::Char('g'), KeyModifiers::NONE));

        let search = KeyBinding::new("/", Action::Search);
        assert!(search.matches(KeyCode::Char('/'), KeyModifiers::SHIFT));

        let prev = KeyBinding::new("shift+tab", Action::PrevTab);
        assert!(prev.matches(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert!(prev.matches(KeyCode::BackTab, KeyModifiers::NONE));
        assert!(!prev.matches(KeyCode::Tab, KeyModifiers::NONE));
    }

    #[test]
    fn test_binding_matches_exact_modifiers() {
        let binding = KeyBinding::new("ctrl+s", Action::Save);
        assert!(binding.matches(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!binding.matches(KeyCode::Char('s'), KeyModifiers::NONE));
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key_display("ctrl+n"), "Ctrl+N");
        assert_eq!(format_key_display("down"), "↓");
        assert_eq!(format_key_display("shift+tab"), "Shift+Tab");
    }
}
