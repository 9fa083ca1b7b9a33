//! Error and diagnostic types.
//!
//! Two failure categories abort work:
//!
//! - [`ConfigError`] rejects a whole stylesheet at load time.
//! - [`ValidationError`] rejects a single element during a render tick.
//!
//! Recoverable conditions (unknown class, grid overflow) are reported as
//! [`Warning`]s alongside the output and never abort a tick.

use core::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::style::Attribute;

/// Cascade layer a declaration came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Layer {
    /// The stylesheet's `defaults` block.
    Defaults,
    /// A class rule (name without the leading dot).
    Class(String),
    /// The element's own overrides.
    Override,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Defaults => f.write_str("stylesheet defaults"),
            Layer::Class(name) => write!(f, "class `.{name}`"),
            Layer::Override => f.write_str("element override"),
        }
    }
}

/// Stylesheet load failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The stylesheet file could not be read.
    #[error("failed to read stylesheet {}: {source}", .path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not JSON or has the wrong top-level shape.
    #[error("malformed stylesheet: {0}")]
    Parse(#[from] serde_json::Error),

    /// A grid template has a non-positive dimension or a negative gap.
    #[error("grid `{grid}`: {field} must be {expected}, got {value}")]
    InvalidGrid {
        /// Template name.
        grid: String,
        /// `rows`, `cols` or `gap`.
        field: &'static str,
        /// Constraint description.
        expected: &'static str,
        /// Offending value.
        value: i64,
    },

    /// A class entry is not an attribute mapping.
    #[error("class `{class}`: rule body must be an object")]
    MalformedClass {
        /// Class key as written.
        class: String,
    },

    /// An attribute value is neither a string nor an integer.
    #[error("{layer}: attribute `{name}` must be a string or an integer")]
    MalformedValue {
        /// Where the declaration sits.
        layer: Layer,
        /// Attribute name.
        name: String,
    },

    /// An attribute name outside the style vocabulary.
    #[error("{layer}: unknown attribute `{name}`")]
    UnknownAttribute {
        /// Where the declaration sits.
        layer: Layer,
        /// Attribute name as written.
        name: String,
    },

    /// A `font_sizes` entry names a font that is not bundled.
    #[error("font_sizes: `{preset}` refers to unknown font `{font}`")]
    UnknownFont {
        /// Preset name.
        preset: String,
        /// Font file name.
        font: String,
    },

    /// A grid template was requested by a name the stylesheet lacks.
    #[error("no grid template named `{0}`")]
    UnknownGrid(String),
}

/// Element resolution failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A declaration's value violates the attribute's constraint.
    #[error("{layer}: invalid {attribute} `{value}` (expected {})", .attribute.expected())]
    InvalidValue {
        /// Where the declaration sits.
        layer: Layer,
        /// The attribute.
        attribute: Attribute,
        /// Offending value, as written.
        value: String,
    },

    /// An override names an attribute outside the style vocabulary.
    #[error("{layer}: unknown attribute `{name}`")]
    UnknownAttribute {
        /// Where the declaration sits.
        layer: Layer,
        /// Attribute name as written.
        name: String,
    },

    /// Only one of `x` / `y` was given.
    #[error("explicit position needs both x and y (x: {x:?}, y: {y:?})")]
    PartialCoordinates {
        /// Given `x`, if any.
        x: Option<i32>,
        /// Given `y`, if any.
        y: Option<i32>,
    },
}

impl ValidationError {
    /// The attribute at fault, if the error concerns one.
    pub fn attribute(&self) -> Option<Attribute> {
        match self {
            ValidationError::InvalidValue { attribute, .. } => Some(*attribute),
            _ => None,
        }
    }

    /// The offending value, if the error concerns one.
    pub fn value(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidValue { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The cascade layer at fault, if any.
    pub fn layer(&self) -> Option<&Layer> {
        match self {
            ValidationError::InvalidValue { layer, .. }
            | ValidationError::UnknownAttribute { layer, .. } => Some(layer),
            ValidationError::PartialCoordinates { .. } => None,
        }
    }
}

/// Recoverable condition met during a render tick.
///
/// `element` is the index into the tick's element list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A class reference has no rule in the stylesheet; it was skipped.
    UnknownClass {
        /// Element index.
        element: usize,
        /// Class reference as written.
        class: String,
    },

    /// Every grid cell was taken; the element was dropped.
    GridOverflow {
        /// Element index.
        element: usize,
    },

    /// The element is pinned to a cell outside the grid; it was dropped.
    CellOutOfRange {
        /// Element index.
        element: usize,
        /// Requested row.
        row: u32,
        /// Requested column.
        col: u32,
    },

    /// The element is pinned to a cell another element already claimed; it was dropped.
    CellTaken {
        /// Element index.
        element: usize,
        /// Requested row.
        row: u32,
        /// Requested column.
        col: u32,
    },
}

impl Warning {
    /// Index of the element concerned.
    pub fn element(&self) -> usize {
        match self {
            Warning::UnknownClass { element, .. }
            | Warning::GridOverflow { element }
            | Warning::CellOutOfRange { element, .. }
            | Warning::CellTaken { element, .. } => *element,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownClass { element, class } => {
                write!(f, "element {element}: unknown class `{class}` skipped")
            }
            Warning::GridOverflow { element } => {
                write!(f, "element {element}: no free grid cell, dropped")
            }
            Warning::CellOutOfRange { element, row, col } => {
                write!(f, "element {element}: cell ({row}, {col}) is outside the grid, dropped")
            }
            Warning::CellTaken { element, row, col } => {
                write!(f, "element {element}: cell ({row}, {col}) already taken, dropped")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_attribute_and_value() {
        let err = ValidationError::InvalidValue {
            layer: Layer::Override,
            attribute: Attribute::Gravity,
            value: "diagonal".into(),
        };

        assert_eq!(err.attribute(), Some(Attribute::Gravity));
        assert_eq!(err.value(), Some("diagonal"));
        assert_eq!(err.layer(), Some(&Layer::Override));

        let message = err.to_string();
        assert!(message.contains("gravity"), "{message}");
        assert!(message.contains("diagonal"), "{message}");
    }

    #[test]
    fn test_layer_display() {
        assert_eq!(Layer::Class("bold".into()).to_string(), "class `.bold`");
        assert_eq!(Layer::Defaults.to_string(), "stylesheet defaults");
    }

    #[test]
    fn test_partial_coordinates_has_no_attribute() {
        let err = ValidationError::PartialCoordinates {
            x: Some(3),
            y: None,
        };
        assert_eq!(err.attribute(), None);
        assert_eq!(err.layer(), None);
    }

    #[test]
    fn test_warning_element_index() {
        let warning = Warning::CellTaken {
            element: 4,
            row: 0,
            col: 1,
        };
        assert_eq!(warning.element(), 4);
        assert!(warning.to_string().contains("(0, 1)"));
    }
}
