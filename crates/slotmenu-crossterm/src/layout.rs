//! Screen layout of an open menu and mapping of terminal cells back to
//! slots.
//!
//! ```text
//! row 0            title
//! rows 1..=R       menu grid, 9 cells per row
//! row R+1          blank
//! row R+2          player inventory, 9 cells
//! row R+4          status line
//! ```

use slotmenu_core::geom;
use slotmenu_core::{COLUMNS, Icon, Point};

/// Where a terminal cell falls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Region {
    /// A slot of the open menu.
    Menu(i32),
    /// A slot of the player inventory row.
    Inventory(i32),
    /// Anywhere else.
    Outside,
}

/// Layout of a menu `rows` tall drawn with cells `cell_width` columns wide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub cell_width: u16,
    pub rows: i32,
}

impl Layout {
    pub fn new(cell_width: u16, rows: i32) -> Self {
        Self {
            cell_width: cell_width.max(3),
            rows: rows.max(0),
        }
    }

    pub fn title_row(&self) -> u16 {
        0
    }

    pub fn menu_top(&self) -> u16 {
        1
    }

    pub fn inventory_row(&self) -> u16 {
        self.menu_top() + self.rows as u16 + 1
    }

    pub fn status_row(&self) -> u16 {
        self.inventory_row() + 2
    }

    /// Terminal columns spanned by one grid row.
    pub fn width(&self) -> u16 {
        self.cell_width * COLUMNS as u16
    }

    /// Terminal position of the top-left character of `slot` in a row
    /// starting at `top`.
    pub fn cell_origin(&self, top: u16, slot: i32) -> (u16, u16) {
        let at = geom::point_of(slot);
        (at.x as u16 * self.cell_width, top + at.y as u16)
    }

    /// Which region the terminal cell at (`column`, `row`) belongs to.
    pub fn locate(&self, column: u16, row: u16) -> Region {
        if column >= self.width() {
            return Region::Outside;
        }
        let x = i32::from(column / self.cell_width);
        let top = self.menu_top();
        if row >= top && i32::from(row - top) < self.rows {
            return Region::Menu(geom::slot_of(Point::new(x, i32::from(row - top))));
        }
        if row == self.inventory_row() {
            return Region::Inventory(x);
        }
        Region::Outside
    }
}

/// Text for one cell, padded or cut to exactly `width` characters.
pub fn cell_text(icon: Option<&Icon>, width: u16) -> String {
    let width = usize::from(width);
    let inner = width.saturating_sub(2);
    let body = match icon {
        Some(icon) if icon.amount > 1 => format!("{}x{}", icon.amount, icon.label()),
        Some(icon) => icon.label().to_string(),
        None => String::new(),
    };
    let mut body: String = body.chars().take(inner).collect();
    while body.chars().count() < inner {
        body.push(' ');
    }
    if icon.is_some() {
        format!("[{body}]")
    } else {
        format!(" {body} ")
    }
}
