//! LED Matrix Hardware Specifications
//!
//! Static data describing the hardware the layout engine targets: HUB75 RGB
//! LED panels and the monospace BDF fonts shipped with the matrix driver.
//!
//! # Features
//!
//! - **no_std compatible** - Plain `const` tables, no allocation
//! - **Panel templates** - Common 64×32, 32×16 and 64×64 panels
//! - **Font metrics** - Glyph cell sizes for every bundled BDF font
//! - **Serde support** - Optional serialization for config dumps
//!
//! # Example
//!
//! ```
//! use matrix_specs::fonts;
//! use matrix_specs::panels::ADAFRUIT_64X32;
//!
//! let canvas = ADAFRUIT_64X32.canvas_size();
//! assert_eq!((canvas.width, canvas.height), (64, 32));
//!
//! let font = fonts::by_name("7x13.bdf").unwrap();
//! assert_eq!(font.text_width(5), 35);
//! ```
//!
//! # Chained Panels
//!
//! ```
//! use matrix_specs::PanelSpec;
//!
//! const WIDE: PanelSpec = PanelSpec {
//!     name: "Two chained 64x32",
//!     panel_width: 64,
//!     panel_height: 32,
//!     chain_length: 2,
//!     parallel: 1,
//! };
//!
//! assert_eq!(WIDE.canvas_size().width, 128);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod font_spec;
pub mod fonts;
mod panel_spec;
pub mod panels;

pub use font_spec::FontSpec;
pub use panel_spec::PanelSpec;
