//! Grid layout.
//!
//! Splits the canvas into `rows × cols` cells separated by `gap` pixels and
//! runs the gravity layout inside each occupied cell. Each cell holds at
//! most one element.
//!
//! Track sizes use integer division; the last row and the last column absorb
//! the remainder so the grid always spans the whole canvas.

use std::collections::BTreeSet;

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::element::Placement;
use crate::error::Warning;
use crate::layout::{px, LayoutEngine, PositionedElement, StyledElement, TextMeasure};
use crate::sheet::GridConfig;

/// Result of a grid layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPlacement<'a> {
    /// Placed elements, in input order. Dropped elements are absent.
    pub positioned: Vec<PositionedElement<'a>>,

    /// One entry per dropped element.
    pub warnings: Vec<Warning>,
}

/// Cell geometry for one grid template.
///
/// # Example
///
/// ```
/// use matrix_system::grid::GridLayout;
/// use matrix_system::sheet::GridConfig;
/// use embedded_graphics::prelude::*;
/// use embedded_graphics::primitives::Rectangle;
///
/// let grid = GridLayout::new(GridConfig::new(2, 1, 4).unwrap());
/// let cells = grid.cells(Rectangle::new(Point::zero(), Size::new(64, 32)));
///
/// assert_eq!(cells[0], Rectangle::new(Point::new(0, 0), Size::new(64, 14)));
/// assert_eq!(cells[1], Rectangle::new(Point::new(0, 18), Size::new(64, 14)));
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GridLayout {
    config: GridConfig,
}

impl GridLayout {
    /// Creates a grid from a validated template.
    pub const fn new(config: GridConfig) -> Self {
        Self { config }
    }

    /// Bounds of cell `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, canvas: Rectangle, row: u32, col: u32) -> Option<Rectangle> {
        let (y, height) = track(canvas.top_left.y, canvas.size.height, self.config.rows(), self.config.gap(), row)?;
        let (x, width) = track(canvas.top_left.x, canvas.size.width, self.config.cols(), self.config.gap(), col)?;
        Some(Rectangle::new(Point::new(x, y), Size::new(width, height)))
    }

    /// Every cell, row-major.
    pub fn cells(&self, canvas: Rectangle) -> Vec<Rectangle> {
        (0..self.config.rows())
            .flat_map(|row| (0..self.config.cols()).map(move |col| (row, col)))
            .filter_map(|(row, col)| self.cell(canvas, row, col))
            .collect()
    }

    /// Assigns `items` to cells and lays each one out inside its cell.
    ///
    /// Assignment order:
    ///
    /// 1. Explicit-coordinate elements take no cell and pass through.
    /// 2. Elements with a `grid_cell` claim that cell. A pin outside the
    ///    grid or on a cell already claimed drops the element.
    /// 3. The rest fill the free cells row-major. Once the cells run out the
    ///    remaining elements are dropped.
    ///
    /// Every drop is reported as a [`Warning`]; empty cells are not.
    pub fn position<'a, M: TextMeasure>(
        &self,
        engine: &LayoutEngine<M>,
        items: &[StyledElement<'a>],
        canvas: Rectangle,
    ) -> GridPlacement<'a> {
        let (rows, cols) = (self.config.rows(), self.config.cols());
        let mut claimed: BTreeSet<(u32, u32)> = BTreeSet::new();
        let mut assigned: Vec<Option<(u32, u32)>> = vec![None; items.len()];
        let mut warnings = Vec::new();

        for (item, slot) in items.iter().zip(assigned.iter_mut()) {
            let Some((row, col)) = item.element.grid_cell else {
                continue;
            };
            if item.placement != Placement::Gravity {
                continue;
            }

            if row >= rows || col >= cols {
                tracing::warn!(element = item.index, row, col, "grid cell out of range, element dropped");
                warnings.push(Warning::CellOutOfRange {
                    element: item.index,
                    row,
                    col,
                });
            } else if !claimed.insert((row, col)) {
                tracing::warn!(element = item.index, row, col, "grid cell already taken, element dropped");
                warnings.push(Warning::CellTaken {
                    element: item.index,
                    row,
                    col,
                });
            } else {
                *slot = Some((row, col));
            }
        }

        // Walked lazily: cost follows the element count, not the cell count.
        let mut free = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .filter(|cell| !claimed.contains(cell));

        for (item, slot) in items.iter().zip(assigned.iter_mut()) {
            if item.placement != Placement::Gravity || item.element.grid_cell.is_some() {
                continue;
            }

            match free.next() {
                Some(cell) => *slot = Some(cell),
                None => {
                    tracing::warn!(element = item.index, "no free grid cell, element dropped");
                    warnings.push(Warning::GridOverflow { element: item.index });
                }
            }
        }

        let mut positioned = Vec::with_capacity(items.len());
        for (item, slot) in items.iter().zip(&assigned) {
            let container = match (item.placement, slot) {
                (Placement::Explicit(_), _) => canvas,
                (Placement::Gravity, Some((row, col))) => match self.cell(canvas, *row, *col) {
                    Some(cell) => cell,
                    None => continue,
                },
                (Placement::Gravity, None) => continue,
            };
            positioned.extend(engine.position_in(core::slice::from_ref(item), container));
        }

        warnings.sort_by_key(Warning::element);

        GridPlacement {
            positioned,
            warnings,
        }
    }
}

/// Offset and extent of track `index` out of `count` tracks spanning `extent`.
fn track(origin: i32, extent: u32, count: u32, gap: u32, index: u32) -> Option<(i32, u32)> {
    if index >= count {
        return None;
    }

    let gaps = gap.saturating_mul(count.saturating_sub(1));
    let usable = extent.saturating_sub(gaps);
    let base = usable.checked_div(count)?;
    let last = index.saturating_add(1) == count;
    let size = if last {
        usable.saturating_sub(base.saturating_mul(count.saturating_sub(1)))
    } else {
        base
    };

    let offset = px(index.saturating_mul(base.saturating_add(gap)));
    Some((origin.saturating_add(offset), size))
}

/// Lays out `items` on a `canvas`-sized grid anchored at the origin.
///
/// Shorthand for [`GridLayout::position`].
pub fn position_grid<'a, M: TextMeasure>(
    engine: &LayoutEngine<M>,
    items: &[StyledElement<'a>],
    config: GridConfig,
    canvas: Size,
) -> GridPlacement<'a> {
    GridLayout::new(config).position(engine, items, Rectangle::new(Point::zero(), canvas))
}
