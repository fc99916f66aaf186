//! Grid coordinates for bracket layout.
//!
//! Brackets are laid out on an abstract grid of rows and columns, the way a
//! spreadsheet is. Every coordinate in this module is an integer grid unit;
//! conversion to pixels only happens at render time through [`CellMetrics`].
//!
//! # Overview
//!
//! - [`Slot`] - Where a match endpoint or label is anchored
//! - [`RowSpan`] - An inclusive, contiguous range of rows in one column
//! - [`CellMetrics`] - Pixel size of a grid cell, used by renderers
//! - [`PixelRect`] - A cell or cell range converted to pixel space
//!
//! # Coordinate System
//!
//! ```text
//!   column 1   column 2   column 3  ──► +column
//!   row 1
//!   row 2
//!     │
//!     ▼
//!   +row
//! ```
//!
//! Rows and columns are 1-based, matching the spreadsheet surfaces brackets
//! were historically drawn on.

use serde::{Deserialize, Serialize};

/// A coordinate anchoring part of a match on the grid.
///
/// `round` is the tournament round the slot belongs to (0 for play-in
/// matches), `column` is the 1-based grid column and `row` the 1-based grid
/// row.
///
/// # Examples
///
/// ```
/// # use bracketry_core::grid::Slot;
/// let slot = Slot::new(1, 2, 10);
/// let advance = slot.advance();
/// assert_eq!(advance.column(), 3);
/// assert_eq!(advance.row(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    round: u32,
    column: u32,
    row: u32,
}

impl Slot {
    pub fn new(round: u32, column: u32, row: u32) -> Self {
        Self { round, column, row }
    }

    pub fn round(self) -> u32 {
        self.round
    }

    pub fn column(self) -> u32 {
        self.column
    }

    pub fn row(self) -> u32 {
        self.row
    }

    /// Returns the slot one column to the right on the same row.
    ///
    /// This is where the winner of a match is written before the next round
    /// picks it up.
    pub fn advance(self) -> Self {
        Self {
            column: self.column + 1,
            ..self
        }
    }

    /// Returns the slot shifted down by `rows`.
    pub fn offset_rows(self, rows: u32) -> Self {
        Self {
            row: self.row + rows,
            ..self
        }
    }
}

/// An inclusive range of rows within one column.
///
/// The span always satisfies `start <= end`; constructing it with the bounds
/// swapped normalizes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowSpan {
    start: u32,
    end: u32,
}

impl RowSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Creates a span of `len` rows beginning at `start`.
    ///
    /// A zero length is treated as one row.
    ///
    /// # Panics
    ///
    /// Panics if the span would run past `u32::MAX`; see
    /// [`RowSpan::checked_from_len`].
    pub fn from_len(start: u32, len: u32) -> Self {
        Self::new(start, start + len.max(1) - 1)
    }

    /// Like [`RowSpan::from_len`], but `None` when the last row does not fit
    /// in a `u32`.
    pub fn checked_from_len(start: u32, len: u32) -> Option<Self> {
        let end = start.checked_add(len.max(1) - 1)?;
        Some(Self::new(start, end))
    }

    pub fn start(self) -> u32 {
        self.start
    }

    pub fn end(self) -> u32 {
        self.end
    }

    /// Number of rows covered, both ends included.
    pub fn len(self) -> u32 {
        self.end - self.start + 1
    }

    /// A span always covers at least one row.
    pub fn is_empty(self) -> bool {
        false
    }

    pub fn contains(self, row: u32) -> bool {
        (self.start..=self.end).contains(&row)
    }

    /// Returns the middle row, rounding toward the bottom on even lengths.
    ///
    /// This is `ceil((start + end) / 2)`, the row a match label sits on.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bracketry_core::grid::RowSpan;
    /// assert_eq!(RowSpan::new(1, 5).midpoint(), 3);
    /// assert_eq!(RowSpan::new(3, 9).midpoint(), 6);
    /// assert_eq!(RowSpan::new(6, 9).midpoint(), 8);
    /// ```
    pub fn midpoint(self) -> u32 {
        self.start + (self.end - self.start).div_ceil(2)
    }

    /// Returns the span without its first row.
    ///
    /// Connectors are drawn from one row below the top endpoint down to the
    /// bottom endpoint, so the top endpoint's underline stays visible.
    pub fn below_start(self) -> Self {
        if self.start == self.end {
            self
        } else {
            Self::new(self.start + 1, self.end)
        }
    }

    /// Returns the smallest span covering both spans.
    pub fn merge(self, other: RowSpan) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Pixel dimensions of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    column_width: f32,
    row_height: f32,
}

impl CellMetrics {
    pub fn new(column_width: f32, row_height: f32) -> Self {
        Self {
            column_width,
            row_height,
        }
    }

    pub fn column_width(self) -> f32 {
        self.column_width
    }

    pub fn row_height(self) -> f32 {
        self.row_height
    }

    /// Returns the pixel rectangle of the cell at `(column, row)`.
    pub fn cell(self, column: u32, row: u32) -> PixelRect {
        PixelRect {
            x: column.saturating_sub(1) as f32 * self.column_width,
            y: row.saturating_sub(1) as f32 * self.row_height,
            width: self.column_width,
            height: self.row_height,
        }
    }

    /// Returns the pixel rectangle covering every row of `span` in `column`.
    pub fn span(self, column: u32, span: RowSpan) -> PixelRect {
        let top = self.cell(column, span.start());
        PixelRect {
            height: span.len() as f32 * self.row_height,
            ..top
        }
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(222.0, 44.0)
    }
}

/// A rectangle in pixel space, origin at the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PixelRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl PixelRect {
    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    pub fn max_x(self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(self) -> f32 {
        self.x + self.width / 2.0
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_slot_advance_keeps_row_and_round() {
        let slot = Slot::new(2, 3, 17);
        let advanced = slot.advance();

        assert_eq!(advanced, Slot::new(2, 4, 17));
    }

    #[test]
    fn test_slot_offset_rows() {
        let slot = Slot::new(1, 1, 4).offset_rows(6);
        assert_eq!(slot.row(), 10);
        assert_eq!(slot.column(), 1);
    }

    #[test]
    fn test_row_span_normalizes_bounds() {
        let span = RowSpan::new(9, 3);
        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 9);
        assert_eq!(span.len(), 7);
    }

    #[test]
    fn test_midpoint_at_end_of_range() {
        assert_eq!(RowSpan::new(u32::MAX - 4, u32::MAX).midpoint(), u32::MAX - 2);
        assert_eq!(RowSpan::new(u32::MAX - 1, u32::MAX).midpoint(), u32::MAX);
    }

    #[test]
    fn test_row_span_checked_from_len() {
        assert_eq!(RowSpan::checked_from_len(4, 5), Some(RowSpan::new(4, 8)));
        assert_eq!(
            RowSpan::checked_from_len(u32::MAX - 4, 5),
            Some(RowSpan::new(u32::MAX - 4, u32::MAX))
        );
        assert_eq!(RowSpan::checked_from_len(u32::MAX - 3, 5), None);
    }

    #[test]
    fn test_row_span_from_len() {
        let span = RowSpan::from_len(4, 5);
        assert_eq!(span, RowSpan::new(4, 8));

        let single = RowSpan::from_len(4, 0);
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn test_row_span_midpoint_rounds_down_the_grid() {
        assert_eq!(RowSpan::new(1, 5).midpoint(), 3);
        assert_eq!(RowSpan::new(1, 4).midpoint(), 3);
        assert_eq!(RowSpan::new(7, 7).midpoint(), 7);
    }

    #[test]
    fn test_row_span_below_start() {
        assert_eq!(RowSpan::new(3, 7).below_start(), RowSpan::new(4, 7));
        assert_eq!(RowSpan::new(5, 5).below_start(), RowSpan::new(5, 5));
    }

    #[test]
    fn test_row_span_contains_and_merge() {
        let a = RowSpan::new(2, 4);
        let b = RowSpan::new(8, 10);
        assert!(a.contains(2));
        assert!(a.contains(4));
        assert!(!a.contains(5));
        assert_eq!(a.merge(b), RowSpan::new(2, 10));
    }

    #[test]
    fn test_cell_metrics_cell() {
        let metrics = CellMetrics::new(100.0, 20.0);
        let rect = metrics.cell(3, 5);

        assert_approx_eq!(f32, rect.x(), 200.0);
        assert_approx_eq!(f32, rect.y(), 80.0);
        assert_approx_eq!(f32, rect.width(), 100.0);
        assert_approx_eq!(f32, rect.height(), 20.0);
        assert_approx_eq!(f32, rect.center_x(), 250.0);
    }

    #[test]
    fn test_cell_metrics_span() {
        let metrics = CellMetrics::new(100.0, 20.0);
        let rect = metrics.span(1, RowSpan::new(2, 5));

        assert_approx_eq!(f32, rect.x(), 0.0);
        assert_approx_eq!(f32, rect.y(), 20.0);
        assert_approx_eq!(f32, rect.height(), 80.0);
        assert_approx_eq!(f32, rect.max_y(), 100.0);
    }
}
