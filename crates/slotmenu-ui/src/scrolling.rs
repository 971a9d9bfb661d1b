//! A menu whose content lives in an unbounded index space and is shown one
//! window of rows at a time.
//!
//! Content is keyed by *logical* index. Logical row `r` holds indices
//! `r*9..r*9+9`. The viewport shows `rows` logical rows starting at
//! [`current_line`](ScrollingMenu::current_line), so index `i` appears on
//! screen at slot `i - current_line*9`. Negative keys are accepted and kept
//! but never shown.
//!
//! Two corner slots are reserved for the scroll controls and always cover
//! whatever content would otherwise land there.

use std::collections::BTreeMap;

use slotmenu_core::geom::{self, COLUMNS};
use slotmenu_core::{ClickEvent, CloseEvent, Corner, Cue, Host, Icon, Point, ViewerId};

use crate::error::MenuError;
use crate::item::DisplayItem;
use crate::menu::{self, GridMenu, MenuBase, MenuIdentity};

/// Which way a scroll moves the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    /// Toward line 0.
    Up,
    /// Toward the highest line.
    Down,
}

/// Payloads shown on the two scroll controls, depending on whether that
/// direction can currently move.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollControls<I> {
    pub up: I,
    pub up_blocked: I,
    pub down: I,
    pub down_blocked: I,
}

impl<I: Clone> ScrollControls<I> {
    /// The payload for `direction`.
    pub fn payload(&self, direction: ScrollDirection, can_move: bool) -> &I {
        match (direction, can_move) {
            (ScrollDirection::Up, true) => &self.up,
            (ScrollDirection::Up, false) => &self.up_blocked,
            (ScrollDirection::Down, true) => &self.down,
            (ScrollDirection::Down, false) => &self.down_blocked,
        }
    }
}

impl ScrollControls<Icon> {
    /// Icons of `material` named "Scroll Up", "Cannot Scroll Up!",
    /// "Scroll Down" and "Cannot Scroll Down!".
    pub fn labelled(material: &str) -> Self {
        let icon = |name: &str| Icon::new(material).with_name(name);
        Self {
            up: icon("Scroll Up"),
            up_blocked: icon("Cannot Scroll Up!"),
            down: icon("Scroll Down"),
            down_blocked: icon("Cannot Scroll Down!"),
        }
    }
}

impl Default for ScrollControls<Icon> {
    fn default() -> Self {
        Self::labelled("LADDER")
    }
}

/// Configuration for a [`ScrollingMenu`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollingMenuConfig<I> {
    pub name: String,
    /// Viewport height, 1 to 6.
    pub rows: i32,
    /// Most rows a single scroll moves. Zero disables scrolling.
    pub scroll_step: i32,
    pub up_corner: Corner,
    pub down_corner: Corner,
    pub controls: ScrollControls<I>,
    /// Played when a scroll moves the viewport.
    pub scroll_cue: Option<Cue>,
    /// Played when a scroll is requested but cannot move.
    pub blocked_cue: Option<Cue>,
    /// Jump back to line 0 whenever a viewer closes the menu.
    pub reset_on_close: bool,
}

impl<I> ScrollingMenuConfig<I> {
    /// A config with the default step, corners and cues.
    pub fn new(name: &str, rows: i32, controls: ScrollControls<I>) -> Self {
        Self {
            name: name.to_string(),
            rows,
            scroll_step: 1,
            up_corner: Corner::TopRight,
            down_corner: Corner::BottomRight,
            controls,
            scroll_cue: None,
            blocked_cue: None,
            reset_on_close: true,
        }
    }

    /// Check the step and the corner placement.
    pub fn validate(&self) -> Result<(), MenuError> {
        if !geom::valid_rows(self.rows) {
            return Err(MenuError::InvalidRows(self.rows));
        }
        if self.scroll_step < 0 {
            return Err(MenuError::InvalidScrollStep(self.scroll_step));
        }
        validate_corners(self.rows, self.up_corner, self.down_corner)
    }
}

impl Default for ScrollingMenuConfig<Icon> {
    fn default() -> Self {
        Self::new("", 3, ScrollControls::default())
    }
}

fn validate_corners(rows: i32, up: Corner, down: Corner) -> Result<(), MenuError> {
    if up == down {
        return Err(MenuError::SameScrollCorners(up));
    }
    // One row: top and bottom are the same slot.
    if rows == 1 && up.is_left() == down.is_left() {
        return Err(MenuError::ScrollCornersSameSide { up, down });
    }
    Ok(())
}

/// A scrolling menu over a sparse map of items.
pub struct ScrollingMenu<H: Host> {
    base: MenuBase<H>,
    items: BTreeMap<i32, DisplayItem<H>>,
    current_line: i32,
    scroll_step: i32,
    up_corner: Corner,
    down_corner: Corner,
    controls: ScrollControls<H::Item>,
    scroll_cue: Option<Cue>,
    blocked_cue: Option<Cue>,
    reset_on_close: bool,
}

impl<H: Host> ScrollingMenu<H> {
    /// An empty menu at line 0.
    pub fn new(host: &mut H, config: ScrollingMenuConfig<H::Item>) -> Result<Self, MenuError> {
        Self::with_items(host, config, std::iter::empty())
    }

    /// A menu pre-filled with `items`.
    pub fn with_items<It>(
        host: &mut H,
        config: ScrollingMenuConfig<H::Item>,
        items: It,
    ) -> Result<Self, MenuError>
    where
        It: IntoIterator<Item = (i32, DisplayItem<H>)>,
    {
        config.validate()?;
        let identity = MenuIdentity::new(&config.name, config.rows)?;
        let base = MenuBase::new(host, identity, None);
        let mut menu = Self {
            base,
            items: items.into_iter().collect(),
            current_line: 0,
            scroll_step: config.scroll_step,
            up_corner: config.up_corner,
            down_corner: config.down_corner,
            controls: config.controls,
            scroll_cue: config.scroll_cue,
            blocked_cue: config.blocked_cue,
            reset_on_close: config.reset_on_close,
        };
        menu.refresh(host);
        Ok(menu)
    }

    /// Put `item` at logical `index` and refresh.
    pub fn add_item(&mut self, host: &mut H, index: i32, item: DisplayItem<H>) {
        self.items.insert(index, item);
        self.refresh(host);
    }

    /// Remove the item at logical `index` and refresh.
    pub fn remove_item(&mut self, host: &mut H, index: i32) -> Option<DisplayItem<H>> {
        let removed = self.items.remove(&index);
        self.refresh(host);
        removed
    }

    pub fn item(&self, index: i32) -> Option<&DisplayItem<H>> {
        self.items.get(&index)
    }

    pub fn items(&self) -> &BTreeMap<i32, DisplayItem<H>> {
        &self.items
    }

    /// Logical row of the largest non-negative key, 0 when there is none.
    pub fn highest_line(&self) -> i32 {
        self.items
            .range(0..)
            .next_back()
            .map_or(0, |(&index, _)| index / COLUMNS)
    }

    /// First logical row shown.
    pub fn current_line(&self) -> i32 {
        self.current_line
    }

    pub fn scroll_step(&self) -> i32 {
        self.scroll_step
    }

    pub fn set_scroll_step(&mut self, host: &mut H, step: i32) -> Result<(), MenuError> {
        if step < 0 {
            return Err(MenuError::InvalidScrollStep(step));
        }
        self.scroll_step = step;
        self.refresh(host);
        Ok(())
    }

    pub fn scroll_corners(&self) -> (Corner, Corner) {
        (self.up_corner, self.down_corner)
    }

    /// Move the controls. Content under the old corners shows through again.
    pub fn set_scroll_corners(&mut self, host: &mut H, up: Corner, down: Corner) -> Result<(), MenuError> {
        validate_corners(self.base.identity().rows(), up, down)?;
        self.up_corner = up;
        self.down_corner = down;
        self.refresh(host);
        Ok(())
    }

    pub fn reset_on_close(&self) -> bool {
        self.reset_on_close
    }

    pub fn set_reset_on_close(&mut self, reset: bool) {
        self.reset_on_close = reset;
    }

    pub fn scroll_cue(&self) -> Option<&Cue> {
        self.scroll_cue.as_ref()
    }

    /// Cue played after a successful scroll. `None` silences it.
    pub fn set_scroll_cue(&mut self, cue: Option<Cue>) {
        self.scroll_cue = cue;
    }

    pub fn blocked_cue(&self) -> Option<&Cue> {
        self.blocked_cue.as_ref()
    }

    /// Cue played when a scroll cannot move. `None` silences it.
    pub fn set_blocked_cue(&mut self, cue: Option<Cue>) {
        self.blocked_cue = cue;
    }

    pub fn controls(&self) -> &ScrollControls<H::Item> {
        &self.controls
    }

    /// Replace the control payloads and refresh.
    pub fn set_controls(&mut self, host: &mut H, controls: ScrollControls<H::Item>) {
        self.controls = controls;
        self.refresh(host);
    }

    fn rows(&self) -> i32 {
        self.base.identity().rows()
    }

    /// How many rows a scroll in `direction` would move right now.
    pub fn remaining_scroll(&self, direction: ScrollDirection) -> i32 {
        match direction {
            ScrollDirection::Up => self.scroll_step.min(self.current_line),
            ScrollDirection::Down => {
                let below = self.highest_line() + 1 - (self.current_line + self.rows());
                self.scroll_step.min(below).max(0)
            }
        }
    }

    /// Scroll toward line 0. Returns how many rows the viewport moved.
    pub fn scroll_up(&mut self, host: &mut H, viewer: Option<ViewerId>) -> i32 {
        self.scroll(host, ScrollDirection::Up, viewer)
    }

    /// Scroll toward the highest line. Returns how many rows the viewport
    /// moved.
    pub fn scroll_down(&mut self, host: &mut H, viewer: Option<ViewerId>) -> i32 {
        self.scroll(host, ScrollDirection::Down, viewer)
    }

    /// Move as far as [`remaining_scroll`](Self::remaining_scroll) allows
    /// and play the matching cue for `viewer`.
    pub fn scroll(&mut self, host: &mut H, direction: ScrollDirection, viewer: Option<ViewerId>) -> i32 {
        let amount = self.remaining_scroll(direction);
        if amount == 0 {
            menu::play_quietly(host, viewer, self.blocked_cue.as_ref());
            return 0;
        }
        self.current_line += match direction {
            ScrollDirection::Up => -amount,
            ScrollDirection::Down => amount,
        };
        log::debug!("{} scrolled {direction:?} to line {}", self.base.buffer(), self.current_line);
        menu::play_quietly(host, viewer, self.scroll_cue.as_ref());
        self.refresh(host);
        amount
    }

    /// Jump straight to `line`, which must be in `0..=highest_line`.
    pub fn go_to_line(&mut self, host: &mut H, line: i32) -> Result<(), MenuError> {
        let highest = self.highest_line();
        if !(0..=highest).contains(&line) {
            return Err(MenuError::LineOutOfRange { line, highest });
        }
        self.current_line = line;
        self.refresh(host);
        Ok(())
    }

    /// Whether logical `index` is inside the viewport.
    pub fn is_visible(&self, index: i32) -> bool {
        self.screen_slot(index).is_some()
    }

    /// Screen slot of logical `index`, if it is visible.
    pub fn screen_slot(&self, index: i32) -> Option<i32> {
        if index < 0 {
            return None;
        }
        let at = geom::point_of(index);
        let row = at.y - self.current_line;
        (0..self.rows())
            .contains(&row)
            .then(|| geom::slot_of(Point::new(at.x, row)))
    }

    /// Logical index currently shown at screen `slot`. `None` when it would
    /// lie past `i32::MAX`.
    pub fn logical_index(&self, slot: i32) -> Option<i32> {
        let at = geom::point_of(slot);
        let line = self.current_line.checked_add(at.y)?;
        line.checked_mul(COLUMNS)?.checked_add(at.x)
    }

    fn is_control(&self, slot: i32) -> Option<ScrollDirection> {
        let rows = self.rows();
        if slot == self.up_corner.slot(rows) {
            Some(ScrollDirection::Up)
        } else if slot == self.down_corner.slot(rows) {
            Some(ScrollDirection::Down)
        } else {
            None
        }
    }

    /// Full buffer contents for the current line.
    pub fn contents(&self) -> Vec<Option<H::Item>> {
        let rows = self.rows();
        let mut contents = vec![None; self.base.identity().capacity() as usize];
        let first = self.current_line.saturating_mul(COLUMNS);
        let shown = self
            .items
            .range(first..)
            .map_while(|(&index, item)| Some((self.screen_slot(index)?, item)));
        for (slot, item) in shown {
            contents[slot as usize] = Some(item.payload().clone());
        }
        for direction in [ScrollDirection::Down, ScrollDirection::Up] {
            let corner = match direction {
                ScrollDirection::Up => self.up_corner,
                ScrollDirection::Down => self.down_corner,
            };
            let can_move = self.remaining_scroll(direction) > 0;
            let payload = self.controls.payload(direction, can_move).clone();
            contents[corner.slot(rows) as usize] = Some(payload);
        }
        contents
    }
}

impl<H: Host> GridMenu<H> for ScrollingMenu<H> {
    fn base(&self) -> &MenuBase<H> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut MenuBase<H> {
        &mut self.base
    }

    fn refresh(&mut self, host: &mut H) {
        let contents = self.contents();
        host.set_contents(self.base.buffer(), &contents);
    }

    fn on_click(&mut self, host: &mut H, event: &mut ClickEvent) {
        if !self.base.owns(event.source) || event.target.is_none() {
            return;
        }
        event.cancel();
        if event.in_player_inventory() {
            self.base.player_inventory_click(host, event);
            return;
        }
        match self.is_control(event.slot) {
            Some(direction) => {
                self.scroll(host, direction, Some(event.viewer));
            }
            None => {
                let item = self
                    .logical_index(event.slot)
                    .and_then(|index| self.items.get(&index));
                if let Some(item) = item {
                    item.click(host, event);
                }
            }
        }
    }

    fn on_exit(&mut self, host: &mut H, event: &CloseEvent) {
        if !self.base.owns(event.source) {
            return;
        }
        if self.reset_on_close {
            self.current_line = 0;
            self.refresh(host);
        }
        self.base.reopen_parent_later(host, event.viewer);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::static_menu::{StaticMenu, StaticMenuConfig};
    use crate::test_host::RecordingHost;

    fn config(rows: i32) -> ScrollingMenuConfig<Icon> {
        let mut config = ScrollingMenuConfig::new("scroll", rows, ScrollControls::labelled("LADDER"));
        config.scroll_cue = Some(Cue::new("scroll"));
        config.blocked_cue = Some(Cue::new("blocked").with_volume(25.0));
        config
    }

    fn tall_menu(host: &mut RecordingHost) -> ScrollingMenu<RecordingHost> {
        // Highest content on logical row 10.
        let items = [0, 13, 40, 95].map(|i| (i, DisplayItem::inert(Icon::new(&format!("ITEM{i}")))));
        ScrollingMenu::with_items(host, config(3), items).unwrap()
    }

    #[test]
    fn config_validation() {
        let mut host = RecordingHost::new();

        let mut c = config(3);
        c.scroll_step = -1;
        assert!(matches!(
            ScrollingMenu::new(&mut host, c),
            Err(MenuError::InvalidScrollStep(-1))
        ));

        let mut c = config(3);
        c.up_corner = Corner::BottomLeft;
        c.down_corner = Corner::BottomLeft;
        assert!(matches!(
            ScrollingMenu::new(&mut host, c),
            Err(MenuError::SameScrollCorners(Corner::BottomLeft))
        ));

        let c = config(1);
        let err = ScrollingMenu::new(&mut host, c).err().unwrap();
        assert!(err.is_config());
        assert_eq!(
            err,
            MenuError::ScrollCornersSameSide {
                up: Corner::TopRight,
                down: Corner::BottomRight
            }
        );

        let mut c = config(1);
        c.up_corner = Corner::TopLeft;
        let menu = ScrollingMenu::new(&mut host, c).unwrap();
        assert_eq!(host.label_at(menu.buffer(), 0), Some("Cannot Scroll Up!"));
        assert_eq!(host.label_at(menu.buffer(), 8), Some("Cannot Scroll Down!"));

        assert!(matches!(
            ScrollingMenu::new(&mut host, config(7)),
            Err(MenuError::InvalidRows(7))
        ));
    }

    #[test]
    fn highest_line_ignores_negative_keys() {
        let mut host = RecordingHost::new();
        let mut menu = ScrollingMenu::new(&mut host, config(3)).unwrap();
        assert_eq!(menu.highest_line(), 0);

        menu.add_item(&mut host, -20, DisplayItem::inert(Icon::new("HIDDEN")));
        assert_eq!(menu.highest_line(), 0);
        assert!(menu.item(-20).is_some());
        assert!(!menu.is_visible(-20));

        menu.add_item(&mut host, 17, DisplayItem::inert(Icon::new("A")));
        assert_eq!(menu.highest_line(), 1);
        menu.add_item(&mut host, 18, DisplayItem::inert(Icon::new("B")));
        assert_eq!(menu.highest_line(), 2);
        assert!(
            host.contents(menu.buffer())
                .iter()
                .flatten()
                .all(|icon| icon.label() != "HIDDEN")
        );
    }

    #[test]
    fn remaining_scroll_formulas() {
        let mut host = RecordingHost::new();
        let mut menu = tall_menu(&mut host);
        for step in 0..4 {
            menu.set_scroll_step(&mut host, step).unwrap();
            for line in 0..=10 {
                menu.go_to_line(&mut host, line).unwrap();
                assert_eq!(menu.remaining_scroll(ScrollDirection::Up), step.min(line));
                let down = step.min(10 + 1 - (line + 3)).max(0);
                assert_eq!(menu.remaining_scroll(ScrollDirection::Down), down);
            }
        }
    }

    #[test]
    fn scroll_down_stops_at_last_full_window() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let mut menu = tall_menu(&mut host);
        assert_eq!(menu.highest_line(), 10);

        let mut moves = 0;
        while menu.scroll_down(&mut host, Some(viewer)) > 0 {
            moves += 1;
        }
        assert_eq!(moves, 8);
        assert_eq!(menu.current_line(), 8);
        assert_eq!(host.cues.len(), 9);
        assert_eq!(host.cues.last().map(|(_, c)| c.as_str()), Some("blocked"));

        let before = host.contents(menu.buffer()).to_vec();
        assert_eq!(menu.scroll_down(&mut host, Some(viewer)), 0);
        assert_eq!(menu.current_line(), 8);
        assert_eq!(host.contents(menu.buffer()), before.as_slice());
        assert_eq!(host.cues.len(), 10);

        // Logical 95 is on row 10, the last viewport row.
        assert_eq!(menu.screen_slot(95), Some(23));
        assert_eq!(host.label_at(menu.buffer(), 23), Some("ITEM95"));
        assert_eq!(host.label_at(menu.buffer(), 26), Some("Cannot Scroll Down!"));
        assert_eq!(host.label_at(menu.buffer(), 8), Some("Scroll Up"));
    }

    #[test]
    fn scroll_up_from_top_is_blocked() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let mut menu = tall_menu(&mut host);
        assert_eq!(menu.scroll_up(&mut host, Some(viewer)), 0);
        assert_eq!(menu.current_line(), 0);
        assert_eq!(host.cues, vec![(viewer, "blocked".to_string())]);

        assert_eq!(menu.scroll_up(&mut host, None), 0);
        assert_eq!(host.cues.len(), 1);
    }

    #[test]
    fn larger_step_is_clamped() {
        let mut host = RecordingHost::new();
        let mut menu = tall_menu(&mut host);
        menu.set_scroll_step(&mut host, 5).unwrap();
        assert_eq!(menu.scroll_down(&mut host, None), 5);
        assert_eq!(menu.scroll_down(&mut host, None), 3);
        assert_eq!(menu.current_line(), 8);
        assert_eq!(menu.scroll_up(&mut host, None), 5);
        assert_eq!(menu.scroll_up(&mut host, None), 3);
        assert_eq!(menu.current_line(), 0);
        assert_eq!(
            menu.set_scroll_step(&mut host, -2),
            Err(MenuError::InvalidScrollStep(-2))
        );
        assert_eq!(menu.scroll_step(), 5);
    }

    #[test]
    fn go_to_line_bounds() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let mut menu = tall_menu(&mut host);
        menu.scroll_down(&mut host, Some(viewer));
        let cues = host.cues.len();

        for line in [-1, 11] {
            assert_eq!(
                menu.go_to_line(&mut host, line),
                Err(MenuError::LineOutOfRange { line, highest: 10 })
            );
            assert_eq!(menu.current_line(), 1);
        }

        // Lines past the last full window are allowed.
        menu.go_to_line(&mut host, 10).unwrap();
        assert_eq!(menu.current_line(), 10);
        assert_eq!(menu.remaining_scroll(ScrollDirection::Down), 0);
        assert_eq!(host.cues.len(), cues);
        assert_eq!(host.label_at(menu.buffer(), 5), Some("ITEM95"));
    }

    #[test]
    fn controls_cover_content() {
        let mut host = RecordingHost::new();
        let mut menu = ScrollingMenu::new(&mut host, config(3)).unwrap();
        menu.add_item(&mut host, 8, DisplayItem::inert(Icon::new("UNDER")));
        assert_eq!(host.label_at(menu.buffer(), 8), Some("Cannot Scroll Up!"));

        menu.set_scroll_corners(&mut host, Corner::TopLeft, Corner::BottomLeft).unwrap();
        assert_eq!(host.label_at(menu.buffer(), 8), Some("UNDER"));
        assert_eq!(host.label_at(menu.buffer(), 0), Some("Cannot Scroll Up!"));
        assert_eq!(host.label_at(menu.buffer(), 18), Some("Cannot Scroll Down!"));

        assert_eq!(
            menu.set_scroll_corners(&mut host, Corner::TopLeft, Corner::TopLeft),
            Err(MenuError::SameScrollCorners(Corner::TopLeft))
        );
        assert_eq!(menu.scroll_corners(), (Corner::TopLeft, Corner::BottomLeft));
    }

    #[test]
    fn clicks_route_to_controls_and_items() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let mut menu = tall_menu(&mut host);
        let hit = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hit);
        menu.add_item(
            &mut host,
            19,
            DisplayItem::new(Icon::new("TARGET"), move |_, e| seen.set(e.slot)),
        );

        let mut down = ClickEvent::menu(menu.buffer(), 26, viewer);
        menu.on_click(&mut host, &mut down);
        assert!(down.is_cancelled());
        assert_eq!(menu.current_line(), 1);

        // Logical 19 now sits on screen slot 10.
        let mut click = ClickEvent::menu(menu.buffer(), 10, viewer);
        menu.on_click(&mut host, &mut click);
        assert_eq!(hit.get(), 10);

        let mut up = ClickEvent::menu(menu.buffer(), 8, viewer);
        menu.on_click(&mut host, &mut up);
        assert_eq!(menu.current_line(), 0);
        assert_eq!(host.cues.len(), 2);
    }

    #[test]
    fn close_resets_before_parent_reopen() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let parent = StaticMenu::new(&mut host, StaticMenuConfig::new("parent", 1)).unwrap();
        let mut menu = tall_menu(&mut host);
        menu.set_parent(&parent);
        menu.go_to_line(&mut host, 4).unwrap();

        menu.on_exit(&mut host, &CloseEvent::new(menu.buffer(), viewer));
        assert_eq!(menu.current_line(), 0);
        assert_eq!(host.label_at(menu.buffer(), 0), Some("ITEM0"));
        assert_eq!(host.pending_tasks(), 1);
        assert!(host.opens.is_empty());
        host.tick();
        assert_eq!(host.opens, vec![(viewer, parent.buffer())]);

        menu.set_reset_on_close(false);
        menu.go_to_line(&mut host, 4).unwrap();
        menu.on_exit(&mut host, &CloseEvent::new(menu.buffer(), viewer));
        assert_eq!(menu.current_line(), 4);
    }

    #[test]
    fn player_inventory_click_does_not_scroll() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let mut menu = tall_menu(&mut host);
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        menu.set_on_player_inventory_click(move |_, _| counter.set(counter.get() + 1));

        let mut event = ClickEvent::player_inventory(menu.buffer(), 26, viewer);
        menu.on_click(&mut host, &mut event);
        assert_eq!(hits.get(), 1);
        assert_eq!(menu.current_line(), 0);
    }

    #[test]
    fn offline_viewer_cue_is_silent() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        host.leave(viewer);
        let mut menu = tall_menu(&mut host);
        assert_eq!(menu.scroll_down(&mut host, Some(viewer)), 1);
        assert!(host.cues.is_empty());
    }

    #[test]
    fn content_at_the_top_of_the_index_space() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let mut menu = ScrollingMenu::new(&mut host, config(3)).unwrap();
        let hit = Rc::new(Cell::new(0));
        let seen = Rc::clone(&hit);
        menu.add_item(
            &mut host,
            i32::MAX,
            DisplayItem::new(Icon::new("LAST"), move |_, e| seen.set(e.slot)),
        );
        let highest = menu.highest_line();
        assert_eq!(highest, i32::MAX / 9);

        menu.go_to_line(&mut host, highest - 2).unwrap();
        // i32::MAX is column 1 of the bottom viewport row.
        assert!(menu.is_visible(i32::MAX));
        assert_eq!(menu.screen_slot(i32::MAX), Some(19));
        assert_eq!(host.label_at(menu.buffer(), 19), Some("LAST"));
        assert_eq!(menu.logical_index(19), Some(i32::MAX));
        assert_eq!(menu.logical_index(20), None);
        assert_eq!(menu.remaining_scroll(ScrollDirection::Down), 0);
        assert_eq!(menu.scroll_down(&mut host, Some(viewer)), 0);

        let mut past_end = ClickEvent::menu(menu.buffer(), 20, viewer);
        menu.on_click(&mut host, &mut past_end);
        assert_eq!(hit.get(), 0);
        let mut click = ClickEvent::menu(menu.buffer(), 19, viewer);
        menu.on_click(&mut host, &mut click);
        assert_eq!(hit.get(), 19);

        menu.go_to_line(&mut host, highest).unwrap();
        assert_eq!(host.label_at(menu.buffer(), 1), Some("LAST"));
        assert_eq!(menu.scroll_up(&mut host, Some(viewer)), 1);
        assert_eq!(menu.screen_slot(i32::MAX), Some(10));
    }

    #[test]
    fn cues_can_be_replaced() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let mut menu = tall_menu(&mut host);

        menu.set_scroll_cue(Some(Cue::new("whoosh")));
        menu.set_blocked_cue(None);
        assert_eq!(menu.scroll_cue().map(|c| c.name.as_str()), Some("whoosh"));
        assert!(menu.blocked_cue().is_none());

        assert_eq!(menu.scroll_up(&mut host, Some(viewer)), 0);
        assert!(host.cues.is_empty());
        assert_eq!(menu.scroll_down(&mut host, Some(viewer)), 1);
        assert_eq!(host.cues, vec![(viewer, "whoosh".to_string())]);

        menu.set_blocked_cue(Some(Cue::new("clunk")));
        menu.go_to_line(&mut host, 0).unwrap();
        menu.scroll_up(&mut host, Some(viewer));
        assert_eq!(host.cues.last().map(|(_, c)| c.as_str()), Some("clunk"));
    }

    #[test]
    fn controls_can_be_replaced() {
        let mut host = RecordingHost::new();
        let mut menu = tall_menu(&mut host);
        let pushes = host.record(menu.buffer()).pushes;

        let mut arrows = ScrollControls::labelled("ARROW");
        arrows.down = Icon::new("ARROW").with_name("Onward");
        menu.set_controls(&mut host, arrows.clone());
        assert_eq!(menu.controls(), &arrows);
        assert_eq!(host.record(menu.buffer()).pushes, pushes + 1);
        assert_eq!(host.label_at(menu.buffer(), 26), Some("Onward"));
        assert_eq!(host.label_at(menu.buffer(), 8), Some("Cannot Scroll Up!"));
        assert_eq!(host.contents(menu.buffer())[8].as_ref().map(|i| i.material.as_str()), Some("ARROW"));
    }
}
