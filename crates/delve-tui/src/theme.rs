//! Terminal color theme system
//!
//! Provides palettes for dark and light terminal backgrounds.
//! Auto-detects via the COLORFGBG env var, or manual override with the
//! --light flag or DELVE_LIGHT_BG=1.

use delve_core::Glyph;
use ratatui::style::Color;

/// Color theme for terminal UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Hints and key help
    pub text_dim: Color,
    pub border: Color,
    /// Menu and rules borders
    pub border_accent: Color,
    /// Exit-reached popup border
    pub border_win: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub accent: Color,

    // Map glyphs
    pub map_wall: Color,
    pub map_floor: Color,
    pub map_explored: Color,
    pub map_start: Color,
    pub map_finish: Color,
    pub map_player: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_accent: Color::Cyan,
            border_win: Color::Green,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            accent: Color::Cyan,
            map_wall: Color::Gray,
            map_floor: Color::White,
            map_explored: Color::DarkGray,
            map_start: Color::Cyan,
            map_finish: Color::Green,
            map_player: Color::Yellow,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            border_win: Color::Green,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            accent: Color::Blue,
            map_wall: Color::DarkGray,
            map_floor: Color::Black,
            map_explored: Color::Gray,
            map_start: Color::Blue,
            map_finish: Color::Green,
            map_player: Color::Magenta,
        }
    }

    /// Pick a theme from the environment, `force_light` wins
    pub fn detect(force_light: bool) -> Self {
        let light = force_light
            || is_light_background(
                std::env::var("DELVE_LIGHT_BG").ok().as_deref(),
                std::env::var("COLORFGBG").ok().as_deref(),
            );
        if light { Self::light() } else { Self::dark() }
    }

    /// Foreground color for a map glyph
    pub fn glyph_color(&self, glyph: Glyph) -> Color {
        match glyph {
            Glyph::Wall => self.map_wall,
            Glyph::Floor => self.map_floor,
            Glyph::Explored => self.map_explored,
            Glyph::Start => self.map_start,
            Glyph::Finish => self.map_finish,
            Glyph::Player => self.map_player,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect(false)
    }
}

/// Decide from `DELVE_LIGHT_BG` and `COLORFGBG` values
fn is_light_background(override_var: Option<&str>, colorfgbg: Option<&str>) -> bool {
    if let Some(val) = override_var {
        return val == "1" || val.eq_ignore_ascii_case("true");
    }

    // "fg;bg" color indices; 7 and 9..=15 are light backgrounds
    colorfgbg
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok())
        .is_some_and(|bg| matches!(bg, 7 | 9..=15))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_text_is_white() {
        let theme = Theme::dark();
        assert_eq!(theme.text, Color::White);
    }

    #[test]
    fn test_light_theme_text_is_black() {
        let theme = Theme::light();
        assert_eq!(theme.text, Color::Black);
        assert_eq!(Theme::detect(true), theme);
    }

    #[test]
    fn test_explored_is_dimmer_than_floor() {
        for theme in [Theme::dark(), Theme::light()] {
            assert_ne!(
                theme.glyph_color(Glyph::Explored),
                theme.glyph_color(Glyph::Floor)
            );
        }
    }

    #[test]
    fn test_background_detection() {
        assert!(is_light_background(Some("1"), None));
        assert!(is_light_background(Some("TRUE"), Some("0;0")));
        assert!(!is_light_background(Some("0"), Some("0;15")));
        assert!(is_light_background(None, Some("0;15")));
        assert!(is_light_background(None, Some("0;default;7")));
        assert!(!is_light_background(None, Some("15;0")));
        assert!(!is_light_background(None, Some("15;8")));
        assert!(!is_light_background(None, Some("garbage")));
        assert!(!is_light_background(None, None));
    }
}
