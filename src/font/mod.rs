//! # Font Management
//!
//! The resume uses the standard PDF Helvetica faces only. They need no
//! embedding: the PDF writer references them by name with WinAnsiEncoding,
//! and measurement uses the AFM widths in [`metrics`].

pub mod metrics;

pub use metrics::StandardFontMetrics;

use crate::style::FontSpec;
use crate::text::{TextMeasure, MM_PER_PT};

/// The Helvetica faces of the 14 standard PDF fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica | Self::HelveticaOblique => &metrics::HELVETICA,
            Self::HelveticaBold | Self::HelveticaBoldOblique => &metrics::HELVETICA_BOLD,
        }
    }

    pub fn for_spec(spec: &FontSpec) -> Self {
        match (spec.is_bold(), spec.is_italic()) {
            (false, false) => Self::Helvetica,
            (true, false) => Self::HelveticaBold,
            (false, true) => Self::HelveticaOblique,
            (true, true) => Self::HelveticaBoldOblique,
        }
    }
}

/// Map a Unicode codepoint to a WinAnsiEncoding byte value.
///
/// WinAnsiEncoding is based on Windows-1252. Most codepoints in
/// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
/// contains special mappings for smart quotes, bullets, dashes, etc.
pub fn winansi_code(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80), // Euro sign
        0x201A => Some(0x82), // Single low-9 quotation mark
        0x0192 => Some(0x83), // Latin small letter f with hook
        0x201E => Some(0x84), // Double low-9 quotation mark
        0x2026 => Some(0x85), // Horizontal ellipsis
        0x2020 => Some(0x86), // Dagger
        0x2021 => Some(0x87), // Double dagger
        0x02C6 => Some(0x88), // Modifier letter circumflex accent
        0x2030 => Some(0x89), // Per mille sign
        0x0160 => Some(0x8A), // Latin capital letter S with caron
        0x2039 => Some(0x8B), // Single left-pointing angle quotation
        0x0152 => Some(0x8C), // Latin capital ligature OE
        0x017D => Some(0x8E), // Latin capital letter Z with caron
        0x2018 => Some(0x91), // Left single quotation mark
        0x2019 => Some(0x92), // Right single quotation mark
        0x201C => Some(0x93), // Left double quotation mark
        0x201D => Some(0x94), // Right double quotation mark
        0x2022 => Some(0x95), // Bullet
        0x2013 => Some(0x96), // En dash
        0x2014 => Some(0x97), // Em dash
        0x02DC => Some(0x98), // Small tilde
        0x2122 => Some(0x99), // Trade mark sign
        0x0161 => Some(0x9A), // Latin small letter s with caron
        0x203A => Some(0x9B), // Single right-pointing angle quotation
        0x0153 => Some(0x9C), // Latin small ligature oe
        0x017E => Some(0x9E), // Latin small letter z with caron
        0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
        _ => None,
    }
}

/// Text measurement with the standard font metrics.
///
/// This is the production [`TextMeasure`]; tests swap in fixed-width
/// measurers to make layout arithmetic exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font: &FontSpec) -> f64 {
        StandardFont::for_spec(font)
            .metrics()
            .measure_string(text, font.size, 0.0)
    }
}

impl TextMeasure for FontContext {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        self.measure_string(text, font) * MM_PER_PT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_resolution() {
        assert_eq!(StandardFont::for_spec(&FontSpec::regular(10.0)), StandardFont::Helvetica);
        assert_eq!(StandardFont::for_spec(&FontSpec::bold(10.0)), StandardFont::HelveticaBold);
        assert_eq!(StandardFont::for_spec(&FontSpec::italic(8.0)), StandardFont::HelveticaOblique);
        assert_eq!(StandardFont::HelveticaBoldOblique.pdf_name(), "Helvetica-BoldOblique");
    }

    #[test]
    fn test_oblique_shares_upright_widths() {
        let ctx = FontContext::new();
        let upright = ctx.measure_string("Généré", &FontSpec::regular(8.0));
        let italic = ctx.measure_string("Généré", &FontSpec::italic(8.0));
        assert!((upright - italic).abs() < 1e-9);
    }

    #[test]
    fn test_text_width_in_mm() {
        let ctx = FontContext::new();
        // 72 pt of text is one inch
        let font = FontSpec::regular(72.0);
        let w = ctx.text_width("0", &font);
        assert!((w - 0.556 * 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_winansi() {
        assert_eq!(winansi_code('A'), Some(0x41));
        assert_eq!(winansi_code('é'), Some(0xE9));
        assert_eq!(winansi_code('\u{2013}'), Some(0x96));
        assert_eq!(winansi_code('漢'), None);
    }
}
