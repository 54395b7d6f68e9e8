//! # Styles
//!
//! The resume has exactly one look, so there is no cascade here: just the
//! colour type, the font description every text run carries, and the fixed
//! palette and type scale of the template.

use serde::{Deserialize, Serialize};

/// An RGB colour, components in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// From 8-bit channels.
    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Font selection for one text run. The family is always Helvetica.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub weight: FontWeight,
    pub style: FontStyle,
    /// Size in points.
    pub size: f64,
}

impl FontSpec {
    pub const fn regular(size: f64) -> Self {
        Self {
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            size,
        }
    }

    pub const fn bold(size: f64) -> Self {
        Self {
            weight: FontWeight::Bold,
            style: FontStyle::Normal,
            size,
        }
    }

    pub const fn italic(size: f64) -> Self {
        Self {
            weight: FontWeight::Normal,
            style: FontStyle::Italic,
            size,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.style == FontStyle::Italic
    }
}

/// Font plus fill colour: everything a text run needs besides position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font: FontSpec,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(font: FontSpec, color: Color) -> Self {
        Self { font, color }
    }
}

// ── Template palette ────────────────────────────────────────────

pub mod palette {
    use super::Color;

    /// Dark blue: header band, section titles, pill text.
    pub const PRIMARY: Color = Color::rgb8(30, 64, 175);
    /// Blue: separators, company and school names.
    pub const SECONDARY: Color = Color::rgb8(59, 130, 246);
    /// Dark grey body text.
    pub const TEXT: Color = Color::rgb8(55, 65, 81);
    /// Dates and footer.
    pub const LIGHT_GRAY: Color = Color::rgb8(156, 163, 175);
    /// Skill pill fill.
    pub const PILL: Color = Color::rgb8(219, 234, 254);
    pub const ON_PRIMARY: Color = Color::WHITE;
}

// ── Template type scale ─────────────────────────────────────────

pub mod text_styles {
    use super::{palette, FontSpec, TextStyle};

    pub const NAME: TextStyle = TextStyle::new(FontSpec::bold(28.0), palette::ON_PRIMARY);
    pub const PROFESSION: TextStyle = TextStyle::new(FontSpec::regular(14.0), palette::ON_PRIMARY);
    pub const CONTACT: TextStyle = TextStyle::new(FontSpec::regular(10.0), palette::ON_PRIMARY);
    pub const SECTION_TITLE: TextStyle = TextStyle::new(FontSpec::bold(14.0), palette::PRIMARY);
    pub const BODY: TextStyle = TextStyle::new(FontSpec::regular(10.0), palette::TEXT);
    pub const SKILL: TextStyle = TextStyle::new(FontSpec::regular(10.0), palette::PRIMARY);
    pub const ENTRY_TITLE: TextStyle = TextStyle::new(FontSpec::bold(12.0), palette::TEXT);
    pub const DATES: TextStyle = TextStyle::new(FontSpec::regular(10.0), palette::LIGHT_GRAY);
    pub const ORGANIZATION: TextStyle = TextStyle::new(FontSpec::regular(11.0), palette::SECONDARY);
    pub const FOOTER: TextStyle = TextStyle::new(FontSpec::italic(8.0), palette::LIGHT_GRAY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_channels_are_normalized() {
        assert_eq!(palette::PRIMARY.r, 30.0 / 255.0);
        assert_eq!(palette::PRIMARY.b, 175.0 / 255.0);
        assert_eq!(Color::rgb8(255, 255, 255), Color::WHITE);
        assert_eq!(Color::rgb8(0, 0, 0), Color::BLACK);
    }

    #[test]
    fn font_spec_flags() {
        assert!(FontSpec::bold(12.0).is_bold());
        assert!(!FontSpec::bold(12.0).is_italic());
        assert!(FontSpec::italic(8.0).is_italic());
    }
}
