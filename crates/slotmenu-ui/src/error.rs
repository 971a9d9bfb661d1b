use std::fmt;

use slotmenu_core::Corner;

/// Errors returned by menu construction and menu operations.
///
/// Configuration errors come out of constructors and setters; out-of-range
/// errors come out of indexed operations and leave the menu untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// Grid height outside `1..=6`.
    InvalidRows(i32),
    /// Slot count that is not a multiple of 9 between 9 and 54.
    InvalidSize(i32),
    /// Negative scroll step.
    InvalidScrollStep(i32),
    /// Scroll-up and scroll-down controls assigned to the same corner.
    SameScrollCorners(Corner),
    /// On a one-row grid the two scroll controls share a side and would
    /// land on the same slot.
    ScrollCornersSameSide { up: Corner, down: Corner },
    /// Slot index outside `[0, capacity)`.
    SlotOutOfRange { index: i32, capacity: i32 },
    /// Line outside `[0, highest]`.
    LineOutOfRange { line: i32, highest: i32 },
    /// Position outside a menu chain.
    MenuIndexOutOfRange { index: usize, len: usize },
}

impl MenuError {
    /// Whether this error was raised while validating configuration.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::InvalidRows(_)
                | Self::InvalidSize(_)
                | Self::InvalidScrollStep(_)
                | Self::SameScrollCorners(_)
                | Self::ScrollCornersSameSide { .. }
        )
    }

    /// Whether this error is an index outside its permitted range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::SlotOutOfRange { .. }
                | Self::LineOutOfRange { .. }
                | Self::MenuIndexOutOfRange { .. }
        )
    }
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRows(rows) => {
                write!(f, "menu height must be between 1 and 6 rows, got {rows}")
            }
            Self::InvalidSize(size) => {
                write!(f, "menu size must be a multiple of 9 between 9 and 54, got {size}")
            }
            Self::InvalidScrollStep(step) => {
                write!(f, "scroll step cannot be negative, got {step}")
            }
            Self::SameScrollCorners(corner) => {
                write!(f, "scroll up and scroll down controls both use the {corner} corner")
            }
            Self::ScrollCornersSameSide { up, down } => write!(
                f,
                "on a one-row menu the scroll controls must be on opposite sides, got {up} and {down}"
            ),
            Self::SlotOutOfRange { index, capacity } => {
                write!(f, "slot {index} is outside 0..{capacity}")
            }
            Self::LineOutOfRange { line, highest } => {
                write!(f, "line {line} is outside 0..={highest}")
            }
            Self::MenuIndexOutOfRange { index, len } => {
                write!(f, "position {index} is outside a chain of {len} menus")
            }
        }
    }
}

impl std::error::Error for MenuError {}
