//! Slot geometry: [`Point`], flat slot addressing and grid [`Corner`]s.
//!
//! A grid menu is always [`COLUMNS`] wide and between [`MIN_ROWS`] and
//! [`MAX_ROWS`] tall. Slots are addressed by a single flat index in
//! row-major order, so slot `s` lives at column `s % 9`, row `s / 9`.

use std::fmt;

/// Width of every grid menu.
pub const COLUMNS: i32 = 9;

/// Smallest permitted grid height.
pub const MIN_ROWS: i32 = 1;

/// Largest permitted grid height.
pub const MAX_ROWS: i32 = 6;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A grid coordinate. X is the column (grows right), Y is the row (grows
/// down).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Slot addressing
// ---------------------------------------------------------------------------

/// Flat slot index of `p`. The point is not bounds-checked.
#[inline]
pub const fn slot_of(p: Point) -> i32 {
    p.y * COLUMNS + p.x
}

/// Grid coordinate of the flat slot index `slot`.
#[inline]
pub const fn point_of(slot: i32) -> Point {
    Point::new(slot.rem_euclid(COLUMNS), slot.div_euclid(COLUMNS))
}

/// Whether `rows` is a permitted grid height.
#[inline]
pub const fn valid_rows(rows: i32) -> bool {
    rows >= MIN_ROWS && rows <= MAX_ROWS
}

/// Number of slots in a grid `rows` tall.
#[inline]
pub const fn capacity(rows: i32) -> i32 {
    rows * COLUMNS
}

// ---------------------------------------------------------------------------
// Corner
// ---------------------------------------------------------------------------

/// One of the four corners of a grid menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners, in declaration order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Whether the corner is on column 0.
    #[inline]
    pub const fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// Whether the corner is on row 0.
    #[inline]
    pub const fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// Grid coordinate of this corner in a grid `rows` tall.
    #[inline]
    pub const fn point(self, rows: i32) -> Point {
        let x = if self.is_left() { 0 } else { COLUMNS - 1 };
        let y = if self.is_top() { 0 } else { rows - 1 };
        Point::new(x, y)
    }

    /// Flat slot index of this corner in a grid `rows` tall.
    #[inline]
    pub const fn slot(self, rows: i32) -> i32 {
        slot_of(self.point(rows))
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        };
        f.write_str(s)
    }
}
