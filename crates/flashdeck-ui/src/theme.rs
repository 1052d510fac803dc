//! Color palettes.

use flashdeck_core::config::ThemeChoice;
use iced::Color;

/// Colors used by the views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub surface: Color,
    pub surface_hover: Color,
    pub card: Color,
    pub card_flipped: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub accent_hover: Color,
    pub danger: Color,
    pub overlay: Color,
}

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

impl Palette {
    pub const DARK: Palette = Palette {
        background: rgb(0.10, 0.11, 0.13),
        surface: rgb(0.14, 0.15, 0.18),
        surface_hover: rgb(0.19, 0.20, 0.24),
        card: rgb(0.17, 0.19, 0.24),
        card_flipped: rgb(0.15, 0.22, 0.26),
        border: rgb(0.26, 0.28, 0.33),
        text_primary: rgb(0.90, 0.91, 0.93),
        text_secondary: rgb(0.58, 0.61, 0.67),
        accent: rgb(0.35, 0.58, 0.95),
        accent_hover: rgb(0.45, 0.66, 0.98),
        danger: rgb(0.88, 0.36, 0.36),
        overlay: Color { r: 0.0, g: 0.0, b: 0.0, a: 0.55 },
    };

    pub const LIGHT: Palette = Palette {
        background: rgb(0.96, 0.96, 0.97),
        surface: rgb(1.0, 1.0, 1.0),
        surface_hover: rgb(0.91, 0.92, 0.94),
        card: rgb(1.0, 1.0, 1.0),
        card_flipped: rgb(0.92, 0.96, 0.98),
        border: rgb(0.82, 0.83, 0.86),
        text_primary: rgb(0.13, 0.14, 0.16),
        text_secondary: rgb(0.42, 0.44, 0.49),
        accent: rgb(0.16, 0.42, 0.85),
        accent_hover: rgb(0.10, 0.34, 0.74),
        danger: rgb(0.78, 0.20, 0.20),
        overlay: Color { r: 0.0, g: 0.0, b: 0.0, a: 0.35 },
    };

    pub fn for_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self::DARK,
            ThemeChoice::Light => Self::LIGHT,
        }
    }

    /// Base iced theme for widgets the views don't style themselves.
    pub fn iced_theme(choice: ThemeChoice) -> iced::Theme {
        match choice {
            ThemeChoice::Dark => iced::Theme::Dark,
            ThemeChoice::Light => iced::Theme::Light,
        }
    }
}
