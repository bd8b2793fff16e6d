//! Color themes and style helpers.
//!
//! The active theme lives in a process-wide lock so widgets can style
//! themselves without threading a theme through every call.

use crate::api::models::BookingStage;
use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;
use std::sync::RwLock;

/// Marker drawn next to the selected list row
pub const LIST_HIGHLIGHT_SYMBOL: &str = "» ";

static THEME: RwLock<Option<Theme>> = RwLock::new(None);

/// Install the theme used by all subsequent renders.
pub fn init_theme(theme_type: ThemeType) {
    let theme = Theme::new(theme_type);
    match THEME.write() {
        Ok(mut guard) => *guard = Some(theme),
        Err(poisoned) => *poisoned.into_inner() = Some(theme),
    }
}

/// Current theme (dark until `init_theme` is called).
pub fn theme() -> Theme {
    let guard = match THEME.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.clone().unwrap_or_else(Theme::dark)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeType {
    #[default]
    Dark,
    Light,
    /// No colors at all, only modifiers (`NO_COLOR=1`)
    NoColor,
}

impl FromStr for ThemeType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "light" => ThemeType::Light,
            "nocolor" | "no-color" | "no_color" => ThemeType::NoColor,
            _ => ThemeType::Dark,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub theme_type: ThemeType,

    /// Borders, titles, key UI elements
    pub primary: Color,
    pub secondary: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    pub text: Color,
    pub text_muted: Color,
    /// Prices, times and other values the eye should land on
    pub text_emphasis: Color,

    pub border: Color,
    pub border_focused: Color,
    pub highlight_bg: Color,
    pub background: Color,
}

impl Theme {
    pub fn new(theme_type: ThemeType) -> Self {
        match theme_type {
            ThemeType::Dark => Self::dark(),
            ThemeType::Light => Self::light(),
            ThemeType::NoColor => Self::no_color(),
        }
    }

    pub fn dark() -> Self {
        Self {
            theme_type: ThemeType::Dark,
            primary: Color::Rgb(212, 160, 23),
            secondary: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,
            text: Color::White,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Yellow,
            border: Color::DarkGray,
            border_focused: Color::Rgb(212, 160, 23),
            highlight_bg: Color::DarkGray,
            background: Color::Reset,
        }
    }

    pub fn light() -> Self {
        Self {
            theme_type: ThemeType::Light,
            primary: Color::Rgb(150, 100, 0),
            secondary: Color::Blue,
            success: Color::Green,
            warning: Color::Rgb(180, 120, 0),
            error: Color::Red,
            info: Color::Blue,
            text: Color::Black,
            text_muted: Color::DarkGray,
            text_emphasis: Color::Blue,
            border: Color::DarkGray,
            border_focused: Color::Rgb(150, 100, 0),
            highlight_bg: Color::Gray,
            background: Color::Reset,
        }
    }

    /// Palette is unused here: every helper below returns modifier-only styles.
    pub fn no_color() -> Self {
        Self {
            theme_type: ThemeType::NoColor,
            primary: Color::Reset,
            secondary: Color::Reset,
            success: Color::Reset,
            warning: Color::Reset,
            error: Color::Reset,
            info: Color::Reset,
            text: Color::Reset,
            text_muted: Color::Reset,
            text_emphasis: Color::Reset,
            border: Color::Reset,
            border_focused: Color::Reset,
            highlight_bg: Color::Reset,
            background: Color::Reset,
        }
    }

    fn plain(&self) -> bool {
        self.theme_type == ThemeType::NoColor
    }

    fn fg(&self, color: Color, fallback: Modifier) -> Style {
        if self.plain() {
            Style::default().add_modifier(fallback)
        } else {
            Style::default().fg(color)
        }
    }

    pub fn title_style(&self) -> Style {
        self.fg(self.primary, Modifier::BOLD)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        self.fg(self.text, Modifier::empty())
    }

    pub fn muted_style(&self) -> Style {
        self.fg(self.text_muted, Modifier::DIM)
    }

    pub fn emphasis_style(&self) -> Style {
        self.fg(self.text_emphasis, Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        self.fg(self.success, Modifier::BOLD)
    }

    pub fn warning_style(&self) -> Style {
        self.fg(self.warning, Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        self.fg(self.error, Modifier::BOLD)
    }

    pub fn border_focused_style(&self) -> Style {
        self.fg(self.border_focused, Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        self.fg(self.border, Modifier::empty())
    }

    /// Selected row in lists and tables
    pub fn highlight_style(&self) -> Style {
        if self.plain() {
            return Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        Style::default()
            .fg(self.text_emphasis)
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn disabled_style(&self) -> Style {
        self.fg(self.text_muted, Modifier::DIM)
    }

    pub fn stage_color(&self, stage: BookingStage) -> Color {
        match stage {
            BookingStage::Pending => self.warning,
            BookingStage::Confirmed => self.success,
            BookingStage::Canceled => self.error,
            BookingStage::Completed => self.info,
            BookingStage::Unknown => self.text_muted,
        }
    }

    /// Badge style for an appointment stage
    pub fn stage_style(&self, stage: BookingStage) -> Style {
        self.fg(self.stage_color(stage), Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_type_from_str() {
        assert_eq!("dark".parse::<ThemeType>().unwrap(), ThemeType::Dark);
        assert_eq!("light".parse::<ThemeType>().unwrap(), ThemeType::Light);
        assert_eq!("NO_COLOR".parse::<ThemeType>().unwrap(), ThemeType::NoColor);
        assert_eq!("sepia".parse::<ThemeType>().unwrap(), ThemeType::Dark);
    }

    #[test]
    fn test_no_color_styles_set_no_colors() {
        let t = Theme::new(ThemeType::NoColor);
        for style in [
            t.highlight_style(),
            t.stage_style(BookingStage::Canceled),
            t.title_style(),
        ] {
            assert!(style.fg.is_none());
            assert!(style.bg.is_none());
        }
    }

    #[test]
    fn test_stage_colors_are_distinct() {
        let t = Theme::dark();
        let colors: Vec<Color> = BookingStage::ALL.iter().map(|s| t.stage_color(*s)).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
