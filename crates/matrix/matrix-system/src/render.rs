//! Render tick entry point.
//!
//! [`Renderer::render`] runs the whole pipeline for one tick:
//!
//! ```text
//! Elements + StyleSheet → StyleResolver → StyledElement → LayoutEngine | GridLayout → Frame
//! ```
//!
//! Rejected elements and recoverable warnings are returned with the output,
//! so one bad element never blanks the display.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::element::Element;
use crate::error::{ConfigError, ValidationError, Warning};
use crate::grid::GridLayout;
use crate::layout::{LayoutEngine, PositionedElement, StyledElement, TextMeasure};
use crate::resolve::StyleResolver;
use crate::sheet::{FontTable, GridConfig, StyleSheet};

/// How a tick arranges its elements.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LayoutMode {
    /// Anchor on the whole canvas by gravity.
    #[default]
    Gravity,

    /// Split the canvas into cells first.
    Grid(GridConfig),
}

impl LayoutMode {
    /// Grid mode using a named template from `sheet`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::UnknownGrid`] if the sheet has no such template.
    pub fn grid_named(sheet: &StyleSheet, name: &str) -> Result<Self, ConfigError> {
        sheet
            .grid(name)
            .copied()
            .map(LayoutMode::Grid)
            .ok_or_else(|| ConfigError::UnknownGrid(name.to_owned()))
    }

    /// Mode from a grid flag and an optional template.
    ///
    /// Grid mode without a template uses [`GridConfig::default`].
    pub fn from_options(use_grid: bool, grid: Option<GridConfig>) -> Self {
        if use_grid {
            LayoutMode::Grid(grid.unwrap_or_default())
        } else {
            LayoutMode::Gravity
        }
    }
}

/// An element that failed validation this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Position in the tick's element list.
    pub index: usize,

    /// Why it was rejected.
    pub error: ValidationError,
}

/// Output of one render tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Placed elements, in input order.
    pub placed: Vec<PositionedElement<'a>>,

    /// Elements that failed validation.
    pub rejected: Vec<Rejected>,

    /// Unknown classes and dropped grid elements.
    pub warnings: Vec<Warning>,
}

impl<'a> Frame<'a> {
    /// Returns `true` if nothing was rejected or warned about.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.warnings.is_empty()
    }

    /// The placement of element `index`, if it was placed.
    pub fn get(&self, index: usize) -> Option<&PositionedElement<'a>> {
        self.placed.iter().find(|placed| placed.index == index)
    }
}

/// Resolves and lays out element lists against one stylesheet.
///
/// Holds no state between ticks; one renderer can serve any number of
/// ticks, and the sheet can back several renderers at once.
///
/// # Example
///
/// ```
/// use matrix_system::prelude::*;
/// use embedded_graphics::prelude::{Point, Size};
///
/// let sheet = StyleSheet::new().with_class(
///     "time-display",
///     PartialStyle::new().font_size(FontSize::Large).gravity(Gravity::TopCenter),
/// );
/// let elements = [Element::new("12:34").class("time-display")];
///
/// let frame = Renderer::new(&sheet).render(&elements, Size::new(64, 32), &LayoutMode::Gravity);
/// assert!(frame.is_clean());
/// // 5 glyphs of the 9x18 font, centered
/// assert_eq!(frame.placed[0].position, Point::new(9, 0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Renderer<'s, M = &'s FontTable> {
    resolver: StyleResolver<'s>,
    engine: LayoutEngine<M>,
}

impl<'s> Renderer<'s> {
    /// A renderer measuring text with the sheet's font table.
    pub fn new(sheet: &'s StyleSheet) -> Self {
        Self {
            resolver: StyleResolver::new(sheet),
            engine: LayoutEngine::new(sheet.fonts()),
        }
    }
}

impl<'s, M: TextMeasure> Renderer<'s, M> {
    /// A renderer measuring text with `measure`.
    pub fn with_measure(sheet: &'s StyleSheet, measure: M) -> Self {
        Self {
            resolver: StyleResolver::new(sheet),
            engine: LayoutEngine::new(measure),
        }
    }

    /// Runs one tick.
    pub fn render<'a>(&self, elements: &'a [Element], canvas: Size, mode: &LayoutMode) -> Frame<'a> {
        let mut styled = Vec::with_capacity(elements.len());
        let mut rejected = Vec::new();
        let mut warnings = Vec::new();

        for (index, element) in elements.iter().enumerate() {
            match self.style(index, element, &mut warnings) {
                Ok(item) => styled.push(item),
                Err(error) => {
                    tracing::warn!(element = index, text = %element.text, error = %error, "element rejected");
                    rejected.push(Rejected { index, error });
                }
            }
        }

        let placed = match mode {
            LayoutMode::Gravity => self.engine.position(&styled, canvas),
            LayoutMode::Grid(config) => {
                let grid = GridLayout::new(*config).position(
                    &self.engine,
                    &styled,
                    Rectangle::new(Point::zero(), canvas),
                );
                warnings.extend(grid.warnings);
                grid.positioned
            }
        };

        warnings.sort_by_key(Warning::element);

        tracing::debug!(
            elements = elements.len(),
            placed = placed.len(),
            rejected = rejected.len(),
            warnings = warnings.len(),
            "render tick"
        );

        Frame {
            placed,
            rejected,
            warnings,
        }
    }

    fn style<'a>(
        &self,
        index: usize,
        element: &'a Element,
        warnings: &mut Vec<Warning>,
    ) -> Result<StyledElement<'a>, ValidationError> {
        let placement = element.placement()?;
        let resolution = self.resolver.resolve_detailed(element)?;

        warnings.extend(
            resolution
                .unknown_classes
                .into_iter()
                .map(|class| Warning::UnknownClass {
                    element: index,
                    class,
                }),
        );

        Ok(StyledElement {
            index,
            element,
            style: resolution.style,
            placement,
        })
    }
}

/// Runs one tick with a throwaway [`Renderer`].
pub fn render<'a>(
    sheet: &StyleSheet,
    elements: &'a [Element],
    canvas: Size,
    mode: &LayoutMode,
) -> Frame<'a> {
    Renderer::new(sheet).render(elements, canvas, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Layer;
    use crate::style::{Attribute, Color, FontSize, Gravity, PartialStyle};

    const CANVAS: Size = Size::new(64, 32);

    fn sheet() -> StyleSheet {
        StyleSheet::new()
            .with_class(
                "time-display",
                PartialStyle::new()
                    .font_size(FontSize::Large)
                    .color(Color::new(0xFF, 0xFF, 0x80))
                    .gravity(Gravity::TopCenter),
            )
            .with_class("date", PartialStyle::new().font_size(FontSize::Small).gravity(Gravity::BottomCenter))
            .with_grid("two-row", GridConfig::new(2, 1, 4).unwrap())
    }

    #[test]
    fn test_gravity_tick() {
        let sheet = sheet();
        let elements = [
            Element::new("12:34").class("time-display"),
            Element::new("MON 01").class("date"),
        ];
        let frame = render(&sheet, &elements, CANVAS, &LayoutMode::Gravity);

        assert!(frame.is_clean());
        assert_eq!(frame.placed.len(), 2);
        assert_eq!(frame.placed[0].position, Point::new(9, 0));
        // 6 glyphs × 5 px, 7 px tall
        assert_eq!(frame.placed[1].position, Point::new(17, 25));
    }

    #[test]
    fn test_rejected_elements_do_not_abort_tick() {
        let sheet = sheet();
        let mut half_placed = Element::new("x");
        half_placed.y = Some(3);
        let elements = [
            Element::new("bad").with_override("gravity", "diagonal"),
            Element::new("12:34").class("time-display"),
            half_placed,
        ];
        let frame = render(&sheet, &elements, CANVAS, &LayoutMode::Gravity);

        assert_eq!(frame.placed.len(), 1);
        assert_eq!(frame.placed[0].index, 1);
        assert_eq!(frame.rejected.len(), 2);
        assert_eq!(frame.rejected[0].index, 0);
        assert_eq!(frame.rejected[0].error.attribute(), Some(Attribute::Gravity));
        assert_eq!(frame.rejected[0].error.layer(), Some(&Layer::Override));
        assert!(matches!(
            frame.rejected[1].error,
            ValidationError::PartialCoordinates { x: None, y: Some(3) }
        ));
    }

    #[test]
    fn test_unknown_class_warns() {
        let sheet = sheet();
        let elements = [Element::new("x").classes(["ghost", "date"])];
        let frame = render(&sheet, &elements, CANVAS, &LayoutMode::Gravity);

        assert_eq!(frame.placed.len(), 1);
        assert_eq!(frame.placed[0].style.font_size, FontSize::Small);
        assert_eq!(
            frame.warnings,
            [Warning::UnknownClass {
                element: 0,
                class: "ghost".into()
            }]
        );
    }

    #[test]
    fn test_grid_tick() {
        let sheet = sheet();
        let mode = LayoutMode::grid_named(&sheet, "two-row").unwrap();
        let elements = [Element::new("AB"), Element::new("CD"), Element::new("EF")];
        let frame = render(&sheet, &elements, CANVAS, &mode);

        assert_eq!(frame.placed.len(), 2);
        assert_eq!(frame.get(0).map(|p| p.position), Some(Point::new(25, 0)));
        assert_eq!(frame.get(1).map(|p| p.position), Some(Point::new(25, 18)));
        assert_eq!(frame.get(2), None);
        assert_eq!(frame.warnings, [Warning::GridOverflow { element: 2 }]);
    }

    #[test]
    fn test_unknown_grid_name() {
        let err = LayoutMode::grid_named(&sheet(), "three-row").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownGrid(ref name) if name == "three-row"));
    }

    #[test]
    fn test_mode_from_options() {
        assert_eq!(LayoutMode::from_options(false, None), LayoutMode::Gravity);
        assert_eq!(
            LayoutMode::from_options(true, None),
            LayoutMode::Grid(GridConfig::default())
        );
        let grid = GridConfig::new(3, 1, 0).unwrap();
        assert_eq!(LayoutMode::from_options(true, Some(grid)), LayoutMode::Grid(grid));
    }

    #[test]
    fn test_sheet_fonts_drive_measurement() {
        let sheet = StyleSheet::new().with_font(FontSize::Medium, &matrix_specs::fonts::FONT_4X6);
        let elements = [Element::new("AB").at(0, 0)];
        let frame = render(&sheet, &elements, CANVAS, &LayoutMode::Gravity);

        assert_eq!(frame.placed[0].size, Size::new(8, 6));
    }

    #[test]
    fn test_custom_measure_replaces_font_table() {
        struct Tile;

        impl TextMeasure for Tile {
            fn measure(&self, _: &str, _: FontSize) -> Size {
                Size::new(10, 10)
            }
        }

        let sheet = sheet().with_class("corner", PartialStyle::new().gravity(Gravity::BottomRight).margin(1));
        let elements = [
            Element::new("12:34").classes(["time-display", "corner"]),
            Element::new("PM").class("corner"),
        ];
        let frame = Renderer::with_measure(&sheet, Tile).render(&elements, CANVAS, &LayoutMode::Gravity);

        assert!(frame.is_clean());
        // a 9x18 box would have been 45 px wide
        assert_eq!(frame.placed[0].size, Size::new(10, 10));
        assert_eq!(frame.placed[0].position, Point::new(53, 21));
        assert_eq!(frame.placed[1].position, Point::new(53, 11));
    }

    #[test]
    fn test_empty_tick() {
        let frame = render(&sheet(), &[], CANVAS, &LayoutMode::Gravity);
        assert!(frame.placed.is_empty());
        assert!(frame.is_clean());
    }
}
