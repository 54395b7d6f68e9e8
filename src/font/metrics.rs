//! Glyph advance widths for the standard Helvetica faces.
//!
//! Values come from the Adobe AFM files and are in 1/1000 em. The oblique
//! faces share the upright widths. Only characters reachable through
//! WinAnsiEncoding matter here; anything else is drawn as `?` by the PDF
//! writer, so it is measured as `?` too.

/// Width table for one standard font.
pub struct StandardFontMetrics {
    /// Advance of ASCII `(i + 32)`, covering 0x20 (space) through 0x7E (~).
    ascii: &'static [u16; 95],
    ae_lower: u16,
    ae_upper: u16,
    oe_lower: u16,
    oe_upper: u16,
    germandbls: u16,
    quote_single: u16,
    quote_double: u16,
}

#[rustfmt::skip]
static HELVETICA_ASCII: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
static HELVETICA_BOLD_ASCII: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0    1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    333, 333, 584, 584, 584, 611, 975,
    // A    B    C    D    E    F    G    H    I    J    K    L    M
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    333, 278, 333, 584, 556, 333,
    // a    b    c    d    e    f    g    h    i    j    k    l    m
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    // n    o    p    q    r    s    t    u    v    w    x    y    z
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    // {    |    }    ~
    389, 280, 389, 584,
];

pub static HELVETICA: StandardFontMetrics = StandardFontMetrics {
    ascii: &HELVETICA_ASCII,
    ae_lower: 889,
    ae_upper: 1000,
    oe_lower: 944,
    oe_upper: 1000,
    germandbls: 611,
    quote_single: 222,
    quote_double: 333,
};

pub static HELVETICA_BOLD: StandardFontMetrics = StandardFontMetrics {
    ascii: &HELVETICA_BOLD_ASCII,
    ae_lower: 889,
    ae_upper: 1000,
    oe_lower: 944,
    oe_upper: 1000,
    germandbls: 611,
    quote_single: 278,
    quote_double: 500,
};

/// Accented Latin-1 letters share the advance of their base letter.
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Š' => 'S',
        'Ž' => 'Z',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' => 's',
        'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

impl StandardFontMetrics {
    fn ascii_width(&self, ch: char) -> u16 {
        self.ascii[ch as usize - 32]
    }

    /// Advance width in 1/1000 em.
    pub fn glyph_units(&self, ch: char) -> u16 {
        if (' '..='~').contains(&ch) {
            return self.ascii_width(ch);
        }
        if let Some(base) = base_letter(ch) {
            return self.ascii_width(base);
        }
        match ch {
            '\u{00A0}' => self.ascii_width(' '),
            // built on the dotless i, which is wider than 'i'
            'ì'..='ï' => 278,
            'æ' => self.ae_lower,
            'Æ' => self.ae_upper,
            'œ' => self.oe_lower,
            'Œ' => self.oe_upper,
            'ß' => self.germandbls,
            '\u{2018}' | '\u{2019}' | '\u{201A}' => self.quote_single,
            '\u{201C}' | '\u{201D}' | '\u{201E}' => self.quote_double,
            '\u{2013}' | '€' => 556,
            '\u{2014}' | '\u{2026}' | '\u{2030}' => 1000,
            '\u{2022}' => 350,
            '°' => 400,
            '·' => self.ascii_width('.'),
            '«' | '»' => 556,
            c if super::winansi_code(c).is_some() => 556,
            _ => self.ascii_width('?'),
        }
    }

    /// Width of a single character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.glyph_units(ch) as f64 / 1000.0 * font_size
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64, letter_spacing: f64) -> f64 {
        text.chars()
            .map(|ch| self.char_width(ch, font_size) + letter_spacing)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_width() {
        assert!((HELVETICA.char_width(' ', 12.0) - 3.336).abs() < 0.001);
    }

    #[test]
    fn accented_matches_base() {
        assert_eq!(HELVETICA.glyph_units('É'), HELVETICA.glyph_units('E'));
        assert_eq!(HELVETICA_BOLD.glyph_units('é'), HELVETICA_BOLD.glyph_units('e'));
        assert_eq!(HELVETICA.glyph_units('í'), 278);
    }

    #[test]
    fn bold_is_wider() {
        let regular = HELVETICA.measure_string("Compétences", 10.0, 0.0);
        let bold = HELVETICA_BOLD.measure_string("Compétences", 10.0, 0.0);
        assert!(bold > regular);
    }

    #[test]
    fn unmappable_measures_as_question_mark() {
        assert_eq!(HELVETICA.glyph_units('漢'), HELVETICA.glyph_units('?'));
    }
}
