//! Glyph catalog mapping characters to LED column patterns.
//!
//! Each pattern drives the full 8-bit output bus for one column step, one bit
//! per LED. The artwork is the reference-design font: every uppercase letter
//! is three columns wide, a space is two blank columns, and the encoder
//! appends [`SPACER_COLUMNS`] blank columns after every character. Data lives
//! here as a static table so the encoder stays pure control flow.

/// Full-width value written to the output bus for one column step.
pub type ColumnPattern = u8;

/// Pattern with every LED off.
pub const BLANK_COLUMN: ColumnPattern = 0b0000_0000;

/// Blank columns inserted after every character.
pub const SPACER_COLUMNS: usize = 2;

/// Widest glyph in the catalog, in columns.
pub const MAX_GLYPH_COLUMNS: usize = 3;

/// Column artwork for a single character.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Glyph {
    columns: &'static [ColumnPattern],
}

impl Glyph {
    const fn new(columns: &'static [ColumnPattern]) -> Self {
        Self { columns }
    }

    /// Ordered column patterns, leading column first.
    #[must_use]
    pub const fn columns(&self) -> &'static [ColumnPattern] {
        self.columns
    }

    /// Number of columns this glyph occupies before spacing.
    #[must_use]
    pub const fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Three-column artwork for `'A'..='Z'`, in alphabetical order.
const LETTER_COLUMNS: [[ColumnPattern; MAX_GLYPH_COLUMNS]; 26] = [
    [0b1111_1111, 0b0000_1001, 0b1111_1111], // A
    [0b1111_1111, 0b1001_0000, 0b1111_0000], // B
    [0b1111_1111, 0b1000_0001, 0b1000_0001], // C
    [0b1111_0000, 0b1001_0000, 0b1111_1111], // D
    [0b1111_1111, 0b1001_0001, 0b1001_0001], // E
    [0b1111_1111, 0b0000_1001, 0b0000_1001], // F
    [0b1111_1111, 0b1001_0001, 0b1111_0001], // G
    [0b1111_1111, 0b0000_1000, 0b1111_1111], // H
    [0b1000_0001, 0b1111_1111, 0b1000_0001], // I
    [0b1000_0001, 0b1111_1111, 0b0000_0001], // J
    [0b1111_1111, 0b0010_0100, 0b0100_0010], // K
    [0b1111_1111, 0b1000_0000, 0b1000_0000], // L
    [0b1111_1111, 0b0000_1111, 0b1111_1111], // M
    [0b1111_1111, 0b0000_0001, 0b1111_1111], // N
    [0b1111_1111, 0b1000_0001, 0b1111_1111], // O
    [0b1111_1111, 0b0000_1001, 0b0000_1111], // P
    [0b0011_1111, 0b0110_0001, 0b1011_1111], // Q
    [0b1111_0000, 0b0001_0000, 0b0001_0000], // R
    [0b1001_1111, 0b1001_0001, 0b1111_0001], // S
    [0b0000_1000, 0b1111_1111, 0b0000_1000], // T
    [0b1111_1111, 0b1000_0000, 0b1111_1111], // U
    [0b0110_0000, 0b1000_0000, 0b0110_0000], // V
    [0b1111_1111, 0b1111_0000, 0b1111_1111], // W
    [0b1100_0011, 0b0011_1100, 0b1100_0011], // X
    [0b0000_1111, 0b1111_1000, 0b0000_1111], // Y
    [0b1110_0001, 0b1001_1001, 0b1000_0111], // Z
];

/// A full space: two blank columns before the usual inter-character spacing.
const SPACE_COLUMNS: [ColumnPattern; 2] = [BLANK_COLUMN, BLANK_COLUMN];

/// Looks up the glyph for a character, if the catalog covers it.
#[must_use]
pub const fn glyph_for(ch: char) -> Option<Glyph> {
    match ch {
        ' ' => Some(Glyph::new(&SPACE_COLUMNS)),
        'A'..='Z' => {
            let index = (ch as u8 - b'A') as usize;
            Some(Glyph::new(&LETTER_COLUMNS[index]))
        }
        _ => None,
    }
}

/// Returns `true` when the catalog defines artwork for the character.
#[must_use]
pub const fn is_supported(ch: char) -> bool {
    glyph_for(ch).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_three_columns_wide() {
        for ch in 'A'..='Z' {
            let glyph = glyph_for(ch).expect("letter glyph missing");
            assert_eq!(glyph.column_count(), 3, "glyph width for {ch}");
        }
    }

    #[test]
    fn space_is_two_blank_columns() {
        let glyph = glyph_for(' ').expect("space glyph missing");
        assert_eq!(glyph.columns(), &[BLANK_COLUMN, BLANK_COLUMN]);
    }

    #[test]
    fn lowercase_and_punctuation_are_unsupported() {
        assert!(glyph_for('a').is_none());
        assert!(glyph_for('!').is_none());
        assert!(glyph_for('0').is_none());
        assert!(is_supported('Q'));
        assert!(!is_supported('\n'));
    }

    #[test]
    fn h_matches_reference_artwork() {
        let glyph = glyph_for('H').expect("H glyph missing");
        assert_eq!(
            glyph.columns(),
            &[0b1111_1111, 0b0000_1000, 0b1111_1111]
        );
    }
}
