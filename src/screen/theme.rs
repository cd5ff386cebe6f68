//! Day and night visual themes.

use crossterm::style::Color;

use crate::clock::Mode;
use crate::common::constants::{
    BACKGROUND_OVERLAY_ALPHA, DAY_BACKGROUND_IMAGE, NIGHT_BACKGROUND_IMAGE,
};

/// Everything the presentation layer needs to skin the screen for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub mode: Mode,
    pub background_image: &'static str,
    /// Background of the expanded info panel (CSS color)
    pub panel_background: &'static str,
    /// Text color on the expanded info panel (CSS color)
    pub panel_foreground: &'static str,
    /// Alpha of the black overlay drawn over the background image
    pub overlay_alpha: f32,
    /// Terminal approximation of the panel colors
    pub terminal_panel_bg: Color,
    pub terminal_panel_fg: Color,
    pub terminal_accent: Color,
}

pub const DAY_THEME: Theme = Theme {
    mode: Mode::Day,
    background_image: DAY_BACKGROUND_IMAGE,
    panel_background: "rgba(255, 255, 255, 0.75)",
    panel_foreground: "#303030",
    overlay_alpha: BACKGROUND_OVERLAY_ALPHA,
    terminal_panel_bg: Color::Rgb {
        r: 224,
        g: 224,
        b: 224,
    },
    terminal_panel_fg: Color::Rgb {
        r: 48,
        g: 48,
        b: 48,
    },
    terminal_accent: Color::Rgb {
        r: 255,
        g: 196,
        b: 0,
    },
};

pub const NIGHT_THEME: Theme = Theme {
    mode: Mode::Night,
    background_image: NIGHT_BACKGROUND_IMAGE,
    panel_background: "rgba(0, 0, 0, 0.75)",
    panel_foreground: "#FFFFFF",
    overlay_alpha: BACKGROUND_OVERLAY_ALPHA,
    terminal_panel_bg: Color::Rgb {
        r: 24,
        g: 24,
        b: 32,
    },
    terminal_panel_fg: Color::White,
    terminal_accent: Color::Rgb {
        r: 120,
        g: 160,
        b: 255,
    },
};

impl Theme {
    pub fn for_mode(mode: Mode) -> &'static Theme {
        match mode {
            Mode::Day => &DAY_THEME,
            Mode::Night => &NIGHT_THEME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_follows_mode() {
        assert_eq!(Theme::for_mode(Mode::Day).background_image, "bg-image-daytime.jpg");
        assert_eq!(
            Theme::for_mode(Mode::Night).background_image,
            "bg-image-nighttime.jpg"
        );
        assert_ne!(
            Theme::for_mode(Mode::Day).panel_background,
            Theme::for_mode(Mode::Night).panel_background
        );
        assert_eq!(Theme::for_mode(Mode::Night).overlay_alpha, 0.25);
    }
}
