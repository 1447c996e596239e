//! Light/dark colour schemes handed to the renderer.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colours used by one render pass.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub title: Color,
    pub border: Color,
    pub muted: Color,
    pub header_bg: Color,
    pub accent: Color,
    pub accent_text: Color,
    pub cursor_line: Color,
    pub line_number: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Theme {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                background: Color::Rgb(15, 23, 42),
                text: Color::Rgb(226, 232, 240),
                title: Color::White,
                border: Color::Rgb(71, 85, 105),
                muted: Color::Rgb(148, 163, 184),
                header_bg: Color::Rgb(2, 6, 23),
                accent: Color::Rgb(147, 51, 234),
                accent_text: Color::Rgb(241, 245, 249),
                cursor_line: Color::Rgb(30, 41, 59),
                line_number: Color::Rgb(100, 116, 139),
                status_bg: Color::DarkGray,
                status_fg: Color::White,
            },
            Theme::Light => Palette {
                background: Color::Rgb(248, 250, 252),
                text: Color::Rgb(15, 23, 42),
                title: Color::Black,
                border: Color::Rgb(148, 163, 184),
                muted: Color::Rgb(71, 85, 105),
                header_bg: Color::Rgb(203, 213, 225),
                accent: Color::Rgb(30, 41, 59),
                accent_text: Color::Rgb(241, 245, 249),
                cursor_line: Color::Rgb(226, 232, 240),
                line_number: Color::Rgb(100, 116, 139),
                status_bg: Color::Gray,
                status_fg: Color::Black,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_names() {
        assert_eq!(Theme::parse("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(" light "), Some(Theme::Light));
        assert_eq!(Theme::parse("solarized"), None);
    }

    #[test]
    fn toggling_twice_is_identity() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_ne!(theme.toggled(), theme);
            assert_eq!(theme.toggled().toggled(), theme);
        }
    }

    #[test]
    fn palettes_differ() {
        assert_ne!(Theme::Dark.palette().background, Theme::Light.palette().background);
    }
}
