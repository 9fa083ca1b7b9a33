//! Bundled BDF fonts
//!
//! Cell sizes of the fonts distributed with the RGB matrix driver. The file
//! name encodes the cell: `WxH.bdf`.

use crate::FontSpec;

/// 4×6, smallest legible font, fits five lines on a 32 px panel
pub const FONT_4X6: FontSpec = FontSpec {
    name: "4x6.bdf",
    char_width: 4,
    line_height: 6,
};

/// 5×7
pub const FONT_5X7: FontSpec = FontSpec {
    name: "5x7.bdf",
    char_width: 5,
    line_height: 7,
};

/// 5×8
pub const FONT_5X8: FontSpec = FontSpec {
    name: "5x8.bdf",
    char_width: 5,
    line_height: 8,
};

/// 6×10
pub const FONT_6X10: FontSpec = FontSpec {
    name: "6x10.bdf",
    char_width: 6,
    line_height: 10,
};

/// 6×12
pub const FONT_6X12: FontSpec = FontSpec {
    name: "6x12.bdf",
    char_width: 6,
    line_height: 12,
};

/// 7×13, default body font
pub const FONT_7X13: FontSpec = FontSpec {
    name: "7x13.bdf",
    char_width: 7,
    line_height: 13,
};

/// 8×13
pub const FONT_8X13: FontSpec = FontSpec {
    name: "8x13.bdf",
    char_width: 8,
    line_height: 13,
};

/// 9×15
pub const FONT_9X15: FontSpec = FontSpec {
    name: "9x15.bdf",
    char_width: 9,
    line_height: 15,
};

/// 9×18
pub const FONT_9X18: FontSpec = FontSpec {
    name: "9x18.bdf",
    char_width: 9,
    line_height: 18,
};

/// 10×20
pub const FONT_10X20: FontSpec = FontSpec {
    name: "10x20.bdf",
    char_width: 10,
    line_height: 20,
};

/// Every bundled font, smallest first.
pub const ALL: &[FontSpec] = &[
    FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X10, FONT_6X12, FONT_7X13, FONT_8X13, FONT_9X15,
    FONT_9X18, FONT_10X20,
];

/// Look up a bundled font by file name (`"5x7.bdf"` or `"5x7"`).
pub fn by_name(name: &str) -> Option<&'static FontSpec> {
    ALL.iter().find(|font| font.matches(name))
}
