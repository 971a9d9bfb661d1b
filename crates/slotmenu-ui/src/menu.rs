//! The [`GridMenu`] trait and the state every menu shares, [`MenuBase`].

use slotmenu_core::geom::{self, COLUMNS};
use slotmenu_core::{BufferId, ClickEvent, CloseEvent, Cue, DragEvent, Host, HostError, ViewerId};

use crate::dispatch::EventDispatcher;
use crate::error::MenuError;

// ---------------------------------------------------------------------------
// MenuIdentity
// ---------------------------------------------------------------------------

/// Name and size of a menu. The width is always 9 columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuIdentity {
    name: String,
    rows: i32,
}

impl MenuIdentity {
    /// A menu `rows` tall. Fails unless `rows` is in `1..=6`.
    pub fn new(name: &str, rows: i32) -> Result<Self, MenuError> {
        if !geom::valid_rows(rows) {
            return Err(MenuError::InvalidRows(rows));
        }
        Ok(Self {
            name: name.to_string(),
            rows,
        })
    }

    /// A menu of `size` slots. Fails unless `size` is a multiple of 9 in
    /// `9..=54`.
    pub fn from_size(name: &str, size: i32) -> Result<Self, MenuError> {
        if size % COLUMNS != 0 || !geom::valid_rows(size / COLUMNS) {
            return Err(MenuError::InvalidSize(size));
        }
        Self::new(name, size / COLUMNS)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn columns(&self) -> i32 {
        COLUMNS
    }

    /// Number of slots.
    pub fn capacity(&self) -> i32 {
        geom::capacity(self.rows)
    }

    /// Whether `index` addresses a slot of this menu.
    pub fn contains(&self, index: i32) -> bool {
        (0..self.capacity()).contains(&index)
    }

    /// `index` as a vector position, or `SlotOutOfRange`.
    pub fn slot_index(&self, index: i32) -> Result<usize, MenuError> {
        if self.contains(index) {
            Ok(index as usize)
        } else {
            Err(MenuError::SlotOutOfRange {
                index,
                capacity: self.capacity(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// MenuBase
// ---------------------------------------------------------------------------

/// Called when the viewer clicks their own inventory while a menu is open.
pub type ClickHook<H> = Box<dyn FnMut(&mut H, &mut ClickEvent)>;

/// Identity, buffer handle, dispatcher and parent link of a menu.
pub struct MenuBase<H: Host> {
    identity: MenuIdentity,
    buffer: BufferId,
    dispatcher: EventDispatcher,
    parent: Option<BufferId>,
    player_click: Option<ClickHook<H>>,
}

impl<H: Host> MenuBase<H> {
    /// Create the backing buffer on `host`.
    pub fn new(host: &mut H, identity: MenuIdentity, owner: Option<ViewerId>) -> Self {
        let buffer = host.create_buffer(identity.capacity(), identity.name(), owner);
        log::debug!("created {buffer} \"{}\" ({} rows)", identity.name(), identity.rows());
        Self {
            identity,
            buffer,
            dispatcher: EventDispatcher::new(),
            parent: None,
            player_click: None,
        }
    }

    pub fn identity(&self) -> &MenuIdentity {
        &self.identity
    }

    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    /// Whether an event about `source` is about this menu.
    #[inline]
    pub fn owns(&self, source: BufferId) -> bool {
        source == self.buffer
    }

    pub fn parent(&self) -> Option<BufferId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<BufferId>) {
        self.parent = parent;
    }

    pub fn set_player_click(&mut self, hook: Option<ClickHook<H>>) {
        self.player_click = hook;
    }

    /// Run the player-inventory hook, if any.
    pub fn player_inventory_click(&mut self, host: &mut H, event: &mut ClickEvent) {
        if let Some(hook) = self.player_click.as_mut() {
            hook(host, event);
        }
    }

    /// Schedule the parent to reopen for `viewer` on the next tick.
    ///
    /// The host is still tearing down the closed session while close hooks
    /// run, so the reopen must never happen inline.
    pub fn reopen_parent_later(&self, host: &mut H, viewer: ViewerId) {
        let Some(parent) = self.parent else {
            return;
        };
        log::debug!("{} closed by {viewer}, reopening {parent} next tick", self.buffer);
        host.run_later(
            1,
            Box::new(move |host: &mut H| {
                open_quietly(host, viewer, parent);
            }),
        );
    }
}

/// Open `buffer` for `viewer`, treating a disconnected viewer as a no-op.
/// Returns whether the buffer was opened.
pub(crate) fn open_quietly<H: Host>(host: &mut H, viewer: ViewerId, buffer: BufferId) -> bool {
    match host.open(viewer, buffer) {
        Ok(()) => true,
        Err(HostError::ViewerOffline(_)) => {
            log::debug!("not opening {buffer}: {viewer} is offline");
            false
        }
        Err(e) => {
            log::warn!("could not open {buffer} for {viewer}: {e}");
            false
        }
    }
}

/// Play `cue` for `viewer` if both are present, ignoring offline viewers.
pub(crate) fn play_quietly<H: Host>(host: &mut H, viewer: Option<ViewerId>, cue: Option<&Cue>) {
    let (Some(viewer), Some(cue)) = (viewer, cue) else {
        return;
    };
    if let Err(e) = host.play_cue(viewer, cue) {
        log::debug!("cue \"{}\" dropped: {e}", cue.name);
    }
}

// ---------------------------------------------------------------------------
// GridMenu
// ---------------------------------------------------------------------------

/// A menu the host can deliver events to.
///
/// Implementors own a [`MenuBase`] and provide rendering and the three
/// event hooks. Hooks are only called by [`EventDispatcher::dispatch`],
/// which has already checked the bypass flags; each hook checks for itself
/// whether the event is about its own buffer.
pub trait GridMenu<H: Host> {
    fn base(&self) -> &MenuBase<H>;

    fn base_mut(&mut self) -> &mut MenuBase<H>;

    /// Rebuild the full buffer contents from logical state and push them
    /// to the host.
    fn refresh(&mut self, host: &mut H);

    fn on_click(&mut self, host: &mut H, event: &mut ClickEvent);

    /// Dragging is not a supported interaction: drags over this menu are
    /// cancelled.
    fn on_drag(&mut self, _host: &mut H, event: &mut DragEvent) {
        if self.base().owns(event.source) {
            event.cancel();
        }
    }

    fn on_exit(&mut self, host: &mut H, event: &CloseEvent);

    fn identity<'a>(&'a self) -> &'a MenuIdentity
    where
        H: 'a,
    {
        self.base().identity()
    }

    fn name<'a>(&'a self) -> &'a str
    where
        H: 'a,
    {
        self.base().identity().name()
    }

    fn capacity(&self) -> i32 {
        self.base().identity().capacity()
    }

    fn buffer(&self) -> BufferId {
        self.base().buffer()
    }

    fn dispatcher<'a>(&'a self) -> &'a EventDispatcher
    where
        H: 'a,
    {
        self.base().dispatcher()
    }

    fn dispatcher_mut<'a>(&'a mut self) -> &'a mut EventDispatcher
    where
        H: 'a,
    {
        self.base_mut().dispatcher_mut()
    }

    fn parent(&self) -> Option<BufferId> {
        self.base().parent()
    }

    /// Reopen `parent` whenever a viewer closes this menu.
    fn set_parent<P: GridMenu<H> + ?Sized>(&mut self, parent: &P)
    where
        Self: Sized,
    {
        let buffer = parent.buffer();
        self.base_mut().set_parent(Some(buffer));
    }

    fn clear_parent(&mut self) {
        self.base_mut().set_parent(None);
    }

    /// Run `hook` when the viewer clicks their own inventory below this
    /// menu.
    fn set_on_player_inventory_click<F>(&mut self, hook: F)
    where
        F: FnMut(&mut H, &mut ClickEvent) + 'static,
        Self: Sized,
    {
        self.base_mut().set_player_click(Some(Box::new(hook)));
    }

    /// Show this menu to `viewer`.
    fn open_for(&self, host: &mut H, viewer: ViewerId) -> Result<(), HostError> {
        host.open(viewer, self.buffer())
    }

    /// Close whatever `viewer` has open.
    fn close_for(&self, host: &mut H, viewer: ViewerId) -> Result<(), HostError> {
        host.close(viewer)
    }
}

#[cfg(test)]
mod tests {
    use slotmenu_core::EventKind;

    use super::*;
    use crate::static_menu::{StaticMenu, StaticMenuConfig};
    use crate::test_host::RecordingHost;

    #[test]
    fn identity_rows() {
        for rows in 1..=6 {
            let id = MenuIdentity::new("m", rows).unwrap();
            assert_eq!(id.capacity(), rows * 9);
            assert_eq!(id.columns(), 9);
        }
        assert_eq!(MenuIdentity::new("m", 0), Err(MenuError::InvalidRows(0)));
        assert_eq!(MenuIdentity::new("m", 7), Err(MenuError::InvalidRows(7)));
    }

    #[test]
    fn identity_from_size() {
        assert_eq!(MenuIdentity::from_size("m", 27).unwrap().rows(), 3);
        assert_eq!(MenuIdentity::from_size("m", 26), Err(MenuError::InvalidSize(26)));
        assert_eq!(MenuIdentity::from_size("m", 0), Err(MenuError::InvalidSize(0)));
        assert_eq!(MenuIdentity::from_size("m", 63), Err(MenuError::InvalidSize(63)));
    }

    #[test]
    fn slot_index_bounds() {
        let id = MenuIdentity::new("m", 1).unwrap();
        assert_eq!(id.slot_index(0), Ok(0));
        assert_eq!(id.slot_index(8), Ok(8));
        assert_eq!(
            id.slot_index(9),
            Err(MenuError::SlotOutOfRange { index: 9, capacity: 9 })
        );
        assert!(id.slot_index(-1).is_err());
    }

    #[test]
    fn reopen_is_deferred() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let parent = BufferId(99);
        host.register_buffer(parent);

        let mut base = MenuBase::<RecordingHost>::new(&mut host, MenuIdentity::new("m", 1).unwrap(), None);
        base.reopen_parent_later(&mut host, viewer);
        assert_eq!(host.pending_tasks(), 0, "no parent, nothing scheduled");

        base.set_parent(Some(parent));
        base.reopen_parent_later(&mut host, viewer);
        assert_eq!(host.pending_tasks(), 1);
        assert!(host.opens.is_empty());

        host.tick();
        assert_eq!(host.opens, vec![(viewer, parent)]);
    }

    #[test]
    fn reopen_for_departed_viewer_is_silent() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let mut base = MenuBase::<RecordingHost>::new(&mut host, MenuIdentity::new("m", 1).unwrap(), None);
        let parent = MenuBase::<RecordingHost>::new(&mut host, MenuIdentity::new("p", 1).unwrap(), None);
        base.set_parent(Some(parent.buffer()));

        base.reopen_parent_later(&mut host, viewer);
        host.leave(viewer);
        host.tick();
        assert!(host.opens.is_empty());
        assert_eq!(host.pending_tasks(), 0);
    }

    fn describe<H: Host, M: GridMenu<H>>(menu: &mut M) -> (String, i32, bool) {
        menu.dispatcher_mut().set_bypass(EventKind::Drag, true);
        let name = menu.name().to_string();
        (name, menu.identity().rows(), menu.dispatcher().bypass(EventKind::Drag))
    }

    #[test]
    fn accessors_through_generic_menu() {
        let mut host = RecordingHost::new();
        let mut menu = StaticMenu::new(&mut host, StaticMenuConfig::new("Shelf", 2)).unwrap();
        assert_eq!(describe(&mut menu), ("Shelf".to_string(), 2, true));
        assert_eq!(menu.capacity(), 18);
    }

    #[test]
    fn open_quietly_reports_outcome() {
        let mut host = RecordingHost::new();
        let viewer = host.join();
        let known = MenuBase::<RecordingHost>::new(&mut host, MenuIdentity::new("k", 1).unwrap(), None);
        assert!(open_quietly(&mut host, viewer, known.buffer()));
        assert!(!open_quietly(&mut host, viewer, BufferId(404)));
        host.leave(viewer);
        assert!(!open_quietly(&mut host, viewer, known.buffer()));
        assert_eq!(host.opens, vec![(viewer, known.buffer())]);
    }
}
