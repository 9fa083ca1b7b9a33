//! LED Matrix Style & Layout System
//!
//! CSS-like styling and gravity/grid positioning for text on RGB LED
//! matrix panels.
//!
//! # Architecture
//!
//! - Style records: typed attributes, partial layers, resolved styles
//! - Stylesheets: class rules, grid templates, font table (JSON loader)
//! - Cascade: defaults → classes in order → element overrides
//! - Layout: gravity anchoring with stacking, or grid cells
//! - Render tick: the whole pipeline, with per-element diagnostics
//!
//! Every tick is a pure function of the stylesheet and the element list.
//!
//! # Example
//!
//! ```
//! use matrix_system::prelude::*;
//! use embedded_graphics::prelude::Size;
//!
//! let sheet = StyleSheet::from_json_str(r##"{
//!     "classes": {
//!         ".time-display": { "font_size": "large", "color": "#FFFF80", "gravity": "top-center" },
//!         ".date": { "font_size": "small", "gravity": "bottom-center", "margin": 1 }
//!     }
//! }"##).unwrap();
//!
//! let elements = [
//!     Element::new("12:34").class("time-display"),
//!     Element::new("MON 01").class("date"),
//! ];
//!
//! let frame = render(&sheet, &elements, Size::new(64, 32), &LayoutMode::Gravity);
//! assert!(frame.is_clean());
//! assert_eq!(frame.placed[0].style.color.to_string(), "#FFFF80");
//! assert_eq!(frame.placed[1].y(), 32 - 1 - 7);
//! ```

pub mod element;
pub mod error;
pub mod grid;
pub mod layout;
pub mod render;
pub mod resolve;
pub mod sheet;
pub mod style;

pub mod prelude {
    //! Common imports.

    // Style records
    pub use crate::style::*;

    // Inputs and stylesheet
    pub use crate::element::{Element, Placement};
    pub use crate::sheet::{FontTable, GridConfig, StyleSheet};

    // Pipeline
    pub use crate::grid::{position_grid, GridLayout, GridPlacement};
    pub use crate::layout::{LayoutEngine, PositionedElement, StyledElement, TextMeasure};
    pub use crate::render::{render, Frame, LayoutMode, Rejected, Renderer};
    pub use crate::resolve::{Resolution, StyleResolver};

    // Diagnostics
    pub use crate::error::{ConfigError, Layer, ValidationError, Warning};
}
