//! Input elements.
//!
//! An [`Element`] is one piece of text to place on the canvas, built fresh
//! by the caller every render tick.

use embedded_graphics::prelude::Point;

use crate::error::{Layer, ValidationError};
use crate::style::{AttrValue, Attribute, PartialStyle, RuleSet};

/// How an element gets its position.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Placement {
    /// Anchored by its resolved gravity.
    Gravity,
    /// Placed at exactly this point.
    Explicit(Point),
}

/// A text element to position.
///
/// # Example
///
/// ```
/// use matrix_system::element::{Element, Placement};
/// use embedded_graphics::prelude::Point;
///
/// let time = Element::new("12:34")
///     .class("time-display")
///     .class("highlight")
///     .with_override("color", "#FF0000");
/// assert_eq!(time.classes, ["time-display", "highlight"]);
/// assert_eq!(time.placement(), Ok(Placement::Gravity));
///
/// let pinned = Element::new("AM").at(50, 2);
/// assert_eq!(pinned.placement(), Ok(Placement::Explicit(Point::new(50, 2))));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Text to display (may be empty).
    pub text: String,

    /// Class references, applied in order. A leading `.` is optional.
    pub classes: Vec<String>,

    /// Highest-precedence cascade layer.
    pub style_overrides: RuleSet,

    /// Explicit horizontal position.
    pub x: Option<i32>,

    /// Explicit vertical position.
    pub y: Option<i32>,

    /// `(row, col)` cell to occupy in grid layouts.
    pub grid_cell: Option<(u32, u32)>,
}

impl Element {
    /// Creates an unstyled element.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Appends a class reference.
    pub fn class(mut self, name: impl Into<String>) -> Self {
        self.classes.push(name.into());
        self
    }

    /// Appends several class references, in order.
    pub fn classes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(names.into_iter().map(Into::into));
        self
    }

    /// Overlays typed overrides.
    pub fn style(mut self, style: PartialStyle) -> Self {
        self.style_overrides.extend(&style);
        self
    }

    /// Adds a string-keyed override.
    ///
    /// Unknown names and invalid values are kept and reported as a
    /// [`ValidationError`] when the element is resolved.
    pub fn with_override(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.style_overrides.declare_named(name, &value.into());
        self
    }

    /// Adds a string-keyed override, checking it now instead of at resolve
    /// time.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownAttribute`] or
    /// [`ValidationError::InvalidValue`] at the [`Layer::Override`] layer.
    ///
    /// ```
    /// use matrix_system::element::Element;
    ///
    /// assert!(Element::new("12:34").try_override("gravity", "top-left").is_ok());
    /// assert!(Element::new("12:34").try_override("font", "7x13").is_err());
    /// ```
    pub fn try_override(mut self, name: &str, value: impl Into<AttrValue>) -> Result<Self, ValidationError> {
        let Some(attribute) = Attribute::from_name(name) else {
            return Err(ValidationError::UnknownAttribute {
                layer: Layer::Override,
                name: name.to_owned(),
            });
        };

        let mut checked = PartialStyle::new();
        checked
            .set(attribute, &value.into())
            .map_err(|fault| ValidationError::InvalidValue {
                layer: Layer::Override,
                attribute,
                value: fault.value,
            })?;
        self.style_overrides.extend(&checked);
        Ok(self)
    }

    /// Places the element at explicit coordinates, bypassing gravity.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Pins the element to a grid cell.
    pub fn in_cell(mut self, row: u32, col: u32) -> Self {
        self.grid_cell = Some((row, col));
        self
    }

    /// How this element is positioned.
    ///
    /// # Errors
    ///
    /// [`ValidationError::PartialCoordinates`] if only one of `x`/`y` is set.
    pub fn placement(&self) -> Result<Placement, ValidationError> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Ok(Placement::Explicit(Point::new(x, y))),
            (None, None) => Ok(Placement::Gravity),
            (x, y) => Err(ValidationError::PartialCoordinates { x, y }),
        }
    }

    /// Returns `true` if both coordinates are given.
    pub fn has_explicit_position(&self) -> bool {
        self.x.is_some() && self.y.is_some()
    }
}
