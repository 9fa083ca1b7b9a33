//! Common HUB75 panel specifications

use crate::PanelSpec;

/// Adafruit 64×32 RGB matrix (P3/P4/P5), the default clock panel.
pub const ADAFRUIT_64X32: PanelSpec = PanelSpec {
    name: "Adafruit 64x32",
    panel_width: 64,
    panel_height: 32,
    chain_length: 1,
    parallel: 1,
};

/// Adafruit 32×16 RGB matrix
pub const ADAFRUIT_32X16: PanelSpec = PanelSpec {
    name: "Adafruit 32x16",
    panel_width: 32,
    panel_height: 16,
    chain_length: 1,
    parallel: 1,
};

/// Generic 64×64 RGB matrix (1/32 scan)
pub const GENERIC_64X64: PanelSpec = PanelSpec {
    name: "Generic 64x64",
    panel_width: 64,
    panel_height: 64,
    chain_length: 1,
    parallel: 1,
};
