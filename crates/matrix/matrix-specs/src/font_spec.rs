//! Monospace font metrics

/// Metrics of a fixed-cell BDF font.
///
/// Every glyph occupies the same `char_width × line_height` cell, so text
/// extents follow directly from the character count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FontSpec {
    /// BDF file name as referenced from stylesheets (e.g. `"7x13.bdf"`)
    pub name: &'static str,

    /// Advance width of one glyph in pixels
    pub char_width: u32,

    /// Height of one text line in pixels
    pub line_height: u32,
}

impl FontSpec {
    /// Width in pixels of `chars` glyphs laid out on one line.
    ///
    /// Saturates instead of overflowing for absurd inputs.
    pub fn text_width(&self, chars: usize) -> u32 {
        let chars = u32::try_from(chars).unwrap_or(u32::MAX);
        chars.saturating_mul(self.char_width)
    }

    /// Whether `name` refers to this font, with or without the `.bdf` suffix.
    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.name.strip_suffix(".bdf") == Some(name)
    }
}
