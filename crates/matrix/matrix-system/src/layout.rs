//! Gravity layout.
//!
//! Anchors each element on a container (the whole canvas, or one grid cell)
//! according to its resolved [`Gravity`]:
//!
//! ```text
//!  top-left        top-center        top-right
//!      ↓ stack          ↓                ↓
//!  center-left       center         center-right
//!      ↕ centered group ↕                ↕
//!  bottom-left    bottom-center    bottom-right
//!      ↑ stack          ↑                ↑
//! ```
//!
//! Elements sharing a gravity form one stack, in input order. The first
//! element of a top or bottom stack sits `margin` pixels from the edge; each
//! following element sits `gap` pixels (its own gap) past its predecessor.
//! A center-row stack is laid out the same way downward, then shifted so the
//! whole group is vertically centered.
//!
//! Elements with explicit coordinates are placed exactly there and take no
//! part in stacking. Nothing is clipped: positions may fall outside the
//! container.

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::element::{Element, Placement};
use crate::error::ValidationError;
use crate::sheet::FontTable;
use crate::style::{Anchor, FontSize, Gravity, ResolvedStyle};

/// Text measurement capability.
///
/// Returns the pixel extent of `text` drawn at `font_size`.
pub trait TextMeasure {
    /// Width and height of the rendered text box.
    fn measure(&self, text: &str, font_size: FontSize) -> Size;
}

/// Monospace measurement: character count × glyph width, one line high.
impl TextMeasure for FontTable {
    fn measure(&self, text: &str, font_size: FontSize) -> Size {
        let font = self.get(font_size);
        Size::new(font.text_width(text.chars().count()), font.line_height)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str, font_size: FontSize) -> Size {
        (**self).measure(text, font_size)
    }
}

/// An element with its resolved style, ready for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledElement<'a> {
    /// Position in the tick's element list.
    pub index: usize,

    /// The source element.
    pub element: &'a Element,

    /// Resolved style.
    pub style: ResolvedStyle,

    /// How the element is positioned.
    pub placement: Placement,
}

impl<'a> StyledElement<'a> {
    /// Pairs `element` with its resolved style.
    ///
    /// # Errors
    ///
    /// [`ValidationError::PartialCoordinates`] if only one of `x`/`y` is set.
    pub fn new(
        index: usize,
        element: &'a Element,
        style: ResolvedStyle,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            index,
            element,
            style,
            placement: element.placement()?,
        })
    }
}

/// Final layout output for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedElement<'a> {
    /// Position in the tick's element list.
    pub index: usize,

    /// The source element.
    pub element: &'a Element,

    /// Resolved style.
    pub style: ResolvedStyle,

    /// Top-left corner of the text box.
    pub position: Point,

    /// Measured text box.
    pub size: Size,
}

impl PositionedElement<'_> {
    /// Left edge.
    pub const fn x(&self) -> i32 {
        self.position.x
    }

    /// Top edge.
    pub const fn y(&self) -> i32 {
        self.position.y
    }

    /// The text box.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(self.position, self.size)
    }

    /// Origin for drawing the text with a baseline-anchored font renderer.
    ///
    /// BDF text is drawn from the bottom-left of the glyph cell.
    pub fn baseline(&self) -> Point {
        Point::new(
            self.position.x,
            self.position.y.saturating_add(px(self.size.height)),
        )
    }

    /// The text box grown by `padding` on every side, for background fills.
    pub fn background_bounds(&self) -> Rectangle {
        let padding = self.style.padding;
        let inset = px(padding);
        let grow = padding.saturating_mul(2);

        Rectangle::new(
            Point::new(
                self.position.x.saturating_sub(inset),
                self.position.y.saturating_sub(inset),
            ),
            Size::new(
                self.size.width.saturating_add(grow),
                self.size.height.saturating_add(grow),
            ),
        )
    }
}

/// Gravity layout engine.
///
/// # Example
///
/// ```
/// use matrix_system::element::Element;
/// use matrix_system::layout::{LayoutEngine, StyledElement};
/// use matrix_system::sheet::FontTable;
/// use matrix_system::style::{Gravity, PartialStyle, ResolvedStyle};
/// use embedded_graphics::prelude::{Point, Size};
///
/// let element = Element::new("12:34");
/// let style = ResolvedStyle::from_partial(&PartialStyle::new().gravity(Gravity::TopCenter));
/// let items = [StyledElement::new(0, &element, style).unwrap()];
///
/// let placed = LayoutEngine::new(FontTable::BUILTIN).position(&items, Size::new(64, 32));
/// // 5 glyphs × 7 px = 35 px wide, centered on 64 px
/// assert_eq!(placed[0].position, Point::new(14, 0));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine<M> {
    measure: M,
}

impl<M: TextMeasure> LayoutEngine<M> {
    /// Creates an engine measuring text with `measure`.
    pub const fn new(measure: M) -> Self {
        Self { measure }
    }

    /// Measures one element.
    pub fn measure(&self, item: &StyledElement<'_>) -> Size {
        self.measure.measure(&item.element.text, item.style.font_size)
    }

    /// Lays out `items` on a canvas of `canvas` size anchored at the origin.
    ///
    /// Output order matches input order.
    pub fn position<'a>(&self, items: &[StyledElement<'a>], canvas: Size) -> Vec<PositionedElement<'a>> {
        self.position_in(items, Rectangle::new(Point::zero(), canvas))
    }

    /// Lays out `items` inside `container`.
    ///
    /// Output order matches input order.
    pub fn position_in<'a>(
        &self,
        items: &[StyledElement<'a>],
        container: Rectangle,
    ) -> Vec<PositionedElement<'a>> {
        let mut placed: Vec<PositionedElement<'a>> = items
            .iter()
            .map(|item| {
                let size = self.measure(item);
                let position = match item.placement {
                    Placement::Explicit(point) => point,
                    Placement::Gravity => Point::new(
                        horizontal(item.style.gravity.horizontal(), container, item.style.margin, size.width),
                        container.top_left.y,
                    ),
                };
                PositionedElement {
                    index: item.index,
                    element: item.element,
                    style: item.style,
                    position,
                    size,
                }
            })
            .collect();

        for gravity in Gravity::ALL {
            let mut stack: Vec<&mut PositionedElement<'a>> = placed
                .iter_mut()
                .zip(items)
                .filter(|(_, item)| item.placement == Placement::Gravity && item.style.gravity == gravity)
                .map(|(slot, _)| slot)
                .collect();

            if !stack.is_empty() {
                stack_vertically(&mut stack, gravity.vertical(), container);
            }
        }

        placed
    }
}

fn horizontal(anchor: Anchor, container: Rectangle, margin: u32, width: u32) -> i32 {
    let left = container.top_left.x;
    let free = px(container.size.width).saturating_sub(px(width));

    match anchor {
        Anchor::Start => left.saturating_add(px(margin)),
        Anchor::Center => left.saturating_add(free.div_euclid(2)),
        Anchor::End => left.saturating_add(free).saturating_sub(px(margin)),
    }
}

fn stack_vertically(stack: &mut [&mut PositionedElement<'_>], anchor: Anchor, container: Rectangle) {
    let top = container.top_left.y;
    let height = px(container.size.height);

    match anchor {
        Anchor::Start => {
            let mut next: Option<i32> = None;
            for element in stack.iter_mut() {
                let y = match next {
                    None => top.saturating_add(px(element.style.margin)),
                    Some(below) => below.saturating_add(px(element.style.gap)),
                };
                element.position.y = y;
                next = Some(y.saturating_add(px(element.size.height)));
            }
        }
        Anchor::End => {
            let bottom = top.saturating_add(height);
            let mut previous_top: Option<i32> = None;
            for element in stack.iter_mut() {
                let edge = match previous_top {
                    None => bottom.saturating_sub(px(element.style.margin)),
                    Some(above) => above.saturating_sub(px(element.style.gap)),
                };
                let y = edge.saturating_sub(px(element.size.height));
                element.position.y = y;
                previous_top = Some(y);
            }
        }
        Anchor::Center => {
            let total = stack
                .iter()
                .enumerate()
                .fold(0i32, |total, (i, element)| {
                    let gap = if i == 0 { 0 } else { px(element.style.gap) };
                    total.saturating_add(gap).saturating_add(px(element.size.height))
                });

            let mut y = top.saturating_add(height.saturating_sub(total).div_euclid(2));
            for (i, element) in stack.iter_mut().enumerate() {
                if i > 0 {
                    y = y.saturating_add(px(element.style.gap));
                }
                element.position.y = y;
                y = y.saturating_add(px(element.size.height));
            }
        }
    }
}

/// Pixel count as a signed coordinate offset.
pub(crate) fn px(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PartialStyle;

    const CANVAS: Size = Size::new(64, 32);

    fn engine() -> LayoutEngine<FontTable> {
        LayoutEngine::new(FontTable::BUILTIN)
    }

    fn styled<'a>(elements: &'a [Element], style: impl Fn(usize) -> PartialStyle) -> Vec<StyledElement<'a>> {
        elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                StyledElement::new(i, element, ResolvedStyle::from_partial(&style(i))).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_measure_uses_font_table() {
        let table = FontTable::BUILTIN;
        assert_eq!(table.measure("12:34", FontSize::Medium), Size::new(35, 13));
        assert_eq!(table.measure("12:34", FontSize::Large), Size::new(45, 18));
        assert_eq!(table.measure("", FontSize::Small), Size::new(0, 7));
        assert_eq!(table.measure("°C", FontSize::Small), Size::new(10, 7));
    }

    #[test]
    fn test_top_center() {
        let elements = [Element::new("12:34")];
        let items = styled(&elements, |_| PartialStyle::new().gravity(Gravity::TopCenter));
        let placed = engine().position(&items, CANVAS);

        assert_eq!(placed[0].position, Point::new(14, 0));
        assert_eq!(placed[0].size, Size::new(35, 13));
    }

    #[test]
    fn test_corner_anchors_with_margin() {
        let elements = [Element::new("AB"), Element::new("AB"), Element::new("AB")];
        let gravities = [Gravity::TopLeft, Gravity::TopRight, Gravity::BottomLeft];
        let items = styled(&elements, |i| PartialStyle::new().gravity(gravities[i]).margin(2));
        let placed = engine().position(&items, CANVAS);

        assert_eq!(placed[0].position, Point::new(2, 2));
        assert_eq!(placed[1].position, Point::new(64 - 2 - 14, 2));
        assert_eq!(placed[2].position, Point::new(2, 32 - 2 - 13));
    }

    #[test]
    fn test_center() {
        let elements = [Element::new("AB")];
        let items = styled(&elements, |_| PartialStyle::new().gravity(Gravity::Center).margin(5));
        let placed = engine().position(&items, CANVAS);

        // margin never shifts a centered axis
        assert_eq!(placed[0].position, Point::new(25, 9));
    }

    #[test]
    fn test_top_stack_uses_gap() {
        let elements = [Element::new("A"), Element::new("B"), Element::new("C")];
        let items = styled(&elements, |i| {
            PartialStyle::new()
                .gravity(Gravity::TopLeft)
                .margin(1)
                .gap(if i == 2 { 4 } else { 2 })
        });
        let placed = engine().position(&items, Size::new(64, 64));

        let ys: Vec<i32> = placed.iter().map(PositionedElement::y).collect();
        assert_eq!(ys, [1, 1 + 13 + 2, 1 + 13 + 2 + 13 + 4]);
    }

    #[test]
    fn test_bottom_stack_grows_upward() {
        let elements = [Element::new("A"), Element::new("B")];
        let items = styled(&elements, |_| {
            PartialStyle::new().gravity(Gravity::BottomRight).margin(1).gap(3)
        });
        let placed = engine().position(&items, CANVAS);

        assert_eq!(placed[0].position, Point::new(64 - 1 - 7, 32 - 1 - 13));
        assert_eq!(placed[1].position, Point::new(64 - 1 - 7, 18 - 3 - 13));
    }

    #[test]
    fn test_center_group_is_centered() {
        let elements = [Element::new("12:34"), Element::new("MON")];
        let items = styled(&elements, |_| PartialStyle::new().gravity(Gravity::Center).gap(2));
        let placed = engine().position(&items, CANVAS);

        // group height 13 + 2 + 13 = 28 on 32 px
        assert_eq!(placed[0].y(), 2);
        assert_eq!(placed[1].y(), 17);
        assert_eq!(placed[1].x(), (64 - 21) / 2);
    }

    #[test]
    fn test_center_right_stack() {
        let elements = [Element::new("AB"), Element::new("C")];
        let items = styled(&elements, |_| PartialStyle::new().gravity(Gravity::CenterRight).margin(2).gap(2));
        let placed = engine().position(&items, CANVAS);

        // right edges at 64 - 2; margin leaves the vertical centering alone
        assert_eq!(placed[0].x(), 48);
        assert_eq!(placed[1].x(), 55);
        assert_eq!(placed[0].y(), 2);
        assert_eq!(placed[1].y(), 17);

        // the center-left stack is independent
        let items = styled(&elements, |i| {
            let gravity = if i == 0 { Gravity::CenterLeft } else { Gravity::CenterRight };
            PartialStyle::new().gravity(gravity).margin(2).gap(2)
        });
        let placed = engine().position(&items, CANVAS);
        assert_eq!(placed[0].position, Point::new(2, 9));
        assert_eq!(placed[1].position, Point::new(55, 9));
    }

    #[test]
    fn test_stacks_are_per_gravity() {
        let elements = [Element::new("A"), Element::new("B")];
        let gravities = [Gravity::TopLeft, Gravity::TopRight];
        let items = styled(&elements, |i| PartialStyle::new().gravity(gravities[i]).gap(5));
        let placed = engine().position(&items, CANVAS);

        assert_eq!(placed[0].y(), 0);
        assert_eq!(placed[1].y(), 0);
    }

    #[test]
    fn test_explicit_position_passes_through() {
        let elements = [
            Element::new("A").at(10, 15),
            Element::new("B").at(-5, 40),
            Element::new("C"),
        ];
        let items = styled(&elements, |_| PartialStyle::new().gravity(Gravity::TopLeft).margin(3));
        let placed = engine().position(&items, CANVAS);

        assert_eq!(placed[0].position, Point::new(10, 15));
        assert_eq!(placed[1].position, Point::new(-5, 40));
        // explicit elements do not occupy a stack slot
        assert_eq!(placed[2].position, Point::new(3, 3));
    }

    #[test]
    fn test_oversized_text_is_not_clipped() {
        let elements = [Element::new("ABCDEFGHIJ")];
        let items = styled(&elements, |_| PartialStyle::new().gravity(Gravity::TopCenter));
        let placed = engine().position(&items, CANVAS);

        assert_eq!(placed[0].x(), -3);
    }

    #[test]
    fn test_position_in_offsets_by_container() {
        let elements = [Element::new("AB")];
        let items = styled(&elements, |_| PartialStyle::new().gravity(Gravity::TopLeft).margin(1));
        let cell = Rectangle::new(Point::new(32, 16), Size::new(32, 16));
        let placed = engine().position_in(&items, cell);

        assert_eq!(placed[0].position, Point::new(33, 17));
    }

    #[test]
    fn test_output_preserves_input_order() {
        let elements = [Element::new("A"), Element::new("B"), Element::new("C")];
        let gravities = [Gravity::BottomLeft, Gravity::TopLeft, Gravity::BottomLeft];
        let items = styled(&elements, |i| PartialStyle::new().gravity(gravities[i]));
        let placed = engine().position(&items, CANVAS);

        let texts: Vec<&str> = placed.iter().map(|p| p.element.text.as_str()).collect();
        assert_eq!(texts, ["A", "B", "C"]);
        assert_eq!(placed.iter().map(|p| p.index).collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn test_baseline_and_background() {
        let elements = [Element::new("AB").at(10, 4)];
        let items = styled(&elements, |_| PartialStyle::new().padding(2));
        let placed = engine().position(&items, CANVAS);

        assert_eq!(placed[0].bounds(), Rectangle::new(Point::new(10, 4), Size::new(14, 13)));
        assert_eq!(placed[0].baseline(), Point::new(10, 17));
        assert_eq!(
            placed[0].background_bounds(),
            Rectangle::new(Point::new(8, 2), Size::new(18, 17))
        );
    }

    #[test]
    fn test_custom_measure() {
        struct Fixed;
        impl TextMeasure for Fixed {
            fn measure(&self, _: &str, _: FontSize) -> Size {
                Size::new(10, 10)
            }
        }

        let elements = [Element::new("anything")];
        let items = styled(&elements, |_| PartialStyle::new().gravity(Gravity::BottomRight));
        let placed = LayoutEngine::new(Fixed).position(&items, CANVAS);

        assert_eq!(placed[0].position, Point::new(54, 22));
    }
}
