//! Panel specification types

use embedded_graphics::geometry::Size;

/// Geometry of one or more identical HUB75 panels driven as a single canvas.
///
/// Panels in a chain extend the canvas horizontally; parallel chains stack
/// vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PanelSpec {
    /// Human-readable name (e.g. "Adafruit 64x32 P4")
    pub name: &'static str,

    /// Width of a single panel in pixels
    pub panel_width: u32,

    /// Height of a single panel in pixels
    pub panel_height: u32,

    /// Number of daisy-chained panels per output
    pub chain_length: u32,

    /// Number of parallel chains
    pub parallel: u32,
}

impl PanelSpec {
    /// Total drawable canvas in pixels.
    pub fn canvas_size(&self) -> Size {
        Size::new(
            self.panel_width.saturating_mul(self.chain_length),
            self.panel_height.saturating_mul(self.parallel),
        )
    }

    /// Same panel geometry with a different chain/parallel arrangement.
    pub const fn arranged(self, chain_length: u32, parallel: u32) -> Self {
        Self {
            chain_length,
            parallel,
            ..self
        }
    }

    /// Number of LEDs on the whole canvas.
    pub fn pixel_count(&self) -> u64 {
        let size = self.canvas_size();
        u64::from(size.width).saturating_mul(u64::from(size.height))
    }
}
