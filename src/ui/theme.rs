use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Name persisted in the config file ("dark" or "light").
    pub id: &'static str,
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_prefix_style: Style,
    pub assistant_text_style: Style,

    // Chrome
    pub title_style: Style,
    pub empty_state_style: Style,
    pub streaming_indicator_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_placeholder_style: Style,
    pub input_disabled_style: Style,

    // Notifications
    pub toast_border_style: Style,
    pub toast_title_style: Style,
    pub toast_text_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            id: "dark",
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_prefix_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::White),

            title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            empty_state_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            streaming_indicator_style: Style::default().fg(Color::Magenta),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::White),
            input_placeholder_style: Style::default().fg(Color::DarkGray),
            input_disabled_style: Style::default().fg(Color::DarkGray),

            toast_border_style: Style::default().fg(Color::Red),
            toast_title_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            toast_text_style: Style::default().fg(Color::White),
        }
    }

    pub fn light() -> Self {
        Theme {
            id: "light",
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            assistant_prefix_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            assistant_text_style: Style::default().fg(Color::Black),

            title_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            empty_state_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            streaming_indicator_style: Style::default().fg(Color::Magenta),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::Black),
            input_placeholder_style: Style::default().fg(Color::Gray),
            input_disabled_style: Style::default().fg(Color::Gray),

            toast_border_style: Style::default().fg(Color::Red),
            toast_title_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            toast_text_style: Style::default().fg(Color::Black),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Self::dark_default()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// The other built-in theme.
    pub fn toggled(&self) -> Self {
        if self.id == "light" {
            Self::dark_default()
        } else {
            Self::light()
        }
    }
}

pub const THEME_NAMES: [&str; 2] = ["dark", "light"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(Theme::from_name("Light").map(|t| t.id), Some("light"));
        assert_eq!(Theme::from_name(" dark ").map(|t| t.id), Some("dark"));
        assert!(Theme::from_name("dracula").is_none());
    }

    #[test]
    fn toggled_flips_between_builtins() {
        let dark = Theme::dark_default();
        assert_eq!(dark.toggled().id, "light");
        assert_eq!(dark.toggled().toggled(), dark);
    }

    #[test]
    fn every_listed_name_resolves() {
        for name in THEME_NAMES {
            assert_eq!(Theme::from_name(name).map(|t| t.id), Some(name));
        }
    }
}
