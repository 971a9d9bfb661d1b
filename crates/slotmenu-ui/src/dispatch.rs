//! Event routing: per-menu [`EventDispatcher`] with bypass flags, and the
//! [`ListenerSet`] a host uses to fan events out to registered menus.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmenu_core::{EventKind, Host, MenuEvent};

use crate::menu::GridMenu;

/// Handle returned when a menu subscribes to an [`EventSource`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Weak reference to a registered menu.
pub type MenuRef<H> = Weak<RefCell<dyn GridMenu<H>>>;

/// Something that delivers host events to subscribed menus.
pub trait EventSource<H: Host> {
    /// Start delivering events to `listener`. Delivery stops on its own once
    /// the menu is dropped.
    fn subscribe(&mut self, listener: MenuRef<H>) -> SubscriptionId;

    /// Stop delivering events for `id`. Returns whether it was subscribed.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

// ---------------------------------------------------------------------------
// EventDispatcher
// ---------------------------------------------------------------------------

/// A menu's subscription and its three bypass flags.
///
/// A bypassed event kind never reaches the menu's hook. Flags are read when
/// each event is delivered, so toggling one mid-session applies to the very
/// next event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDispatcher {
    bypass_click: bool,
    bypass_drag: bool,
    bypass_close: bool,
    subscription: Option<SubscriptionId>,
}

impl EventDispatcher {
    /// No bypass flags set, not subscribed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether events of `kind` are currently bypassed.
    pub fn bypass(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::Click => self.bypass_click,
            EventKind::Drag => self.bypass_drag,
            EventKind::Close => self.bypass_close,
        }
    }

    pub fn set_bypass(&mut self, kind: EventKind, bypass: bool) {
        match kind {
            EventKind::Click => self.bypass_click = bypass,
            EventKind::Drag => self.bypass_drag = bypass,
            EventKind::Close => self.bypass_close = bypass,
        }
    }

    pub fn subscription(&self) -> Option<SubscriptionId> {
        self.subscription
    }

    /// Subscribe `menu` to `source` and remember the handle.
    pub fn register<H, M, S>(menu: &Rc<RefCell<M>>, source: &mut S) -> SubscriptionId
    where
        H: Host + 'static,
        M: GridMenu<H> + 'static,
        S: EventSource<H> + ?Sized,
    {
        let listener: Rc<RefCell<dyn GridMenu<H>>> = menu.clone();
        let id = source.subscribe(Rc::downgrade(&listener));
        menu.borrow_mut().dispatcher_mut().subscription = Some(id);
        id
    }

    /// Undo [`register`](Self::register). Returns whether `menu` was
    /// subscribed.
    pub fn unregister<H, M, S>(menu: &Rc<RefCell<M>>, source: &mut S) -> bool
    where
        H: Host,
        M: GridMenu<H>,
        S: EventSource<H> + ?Sized,
    {
        let id = menu.borrow_mut().dispatcher_mut().subscription.take();
        id.is_some_and(|id| source.unsubscribe(id))
    }

    /// Hand `event` to the matching hook of `menu` unless that kind is
    /// bypassed. Returns whether a hook ran.
    pub fn dispatch<H, M>(menu: &mut M, host: &mut H, event: &mut MenuEvent) -> bool
    where
        H: Host,
        M: GridMenu<H> + ?Sized,
    {
        if menu.dispatcher().bypass(event.kind()) {
            return false;
        }
        match event {
            MenuEvent::Click(e) => menu.on_click(host, e),
            MenuEvent::Drag(e) => menu.on_drag(host, e),
            MenuEvent::Close(e) => menu.on_exit(host, e),
        }
        true
    }
}

// ---------------------------------------------------------------------------
// ListenerSet
// ---------------------------------------------------------------------------

/// The menus subscribed to one host's event stream.
///
/// Every delivered event goes to every live subscriber; each menu decides
/// for itself whether the event concerns its buffer.
pub struct ListenerSet<H: Host> {
    listeners: Vec<(SubscriptionId, MenuRef<H>)>,
    next_id: u64,
}

impl<H: Host> ListenerSet<H> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of subscriptions, including menus dropped since the last
    /// delivery.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every subscribed menu. Returns how many hooks ran.
    ///
    /// Dropped menus are forgotten. A menu that is already handling an event
    /// further up the stack is skipped rather than re-entered.
    pub fn deliver(&mut self, host: &mut H, event: &mut MenuEvent) -> usize {
        self.listeners.retain(|(_, l)| l.strong_count() > 0);
        let mut reached = 0;
        for (id, listener) in &self.listeners {
            let Some(rc) = listener.upgrade() else {
                continue;
            };
            let Ok(mut menu) = rc.try_borrow_mut() else {
                log::warn!("skipping {:?} event for busy subscriber {id:?}", event.kind());
                continue;
            };
            if EventDispatcher::dispatch(&mut *menu, host, event) {
                reached += 1;
            }
        }
        reached
    }
}

impl<H: Host> EventSource<H> for ListenerSet<H> {
    fn subscribe(&mut self, listener: MenuRef<H>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }
}

impl<H: Host> Default for ListenerSet<H> {
    fn default() -> Self {
        Self::new()
    }
}
