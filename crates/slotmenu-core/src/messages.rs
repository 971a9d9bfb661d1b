//! Events delivered by the host: [`ClickEvent`], [`DragEvent`],
//! [`CloseEvent`], wrapped in [`MenuEvent`].

use crate::host::{BufferId, ViewerId};

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// The three kinds of event a menu can react to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Click,
    Drag,
    Close,
}

// ---------------------------------------------------------------------------
// ClickEvent
// ---------------------------------------------------------------------------

/// Which part of the viewer's screen a click landed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClickTarget {
    /// The open menu buffer.
    Menu,
    /// The viewer's own inventory, shown below the menu.
    PlayerInventory,
}

/// A click inside a viewer's open session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickEvent {
    /// The buffer the viewer has open.
    pub source: BufferId,
    /// Where the click landed; `None` for empty space outside any inventory.
    pub target: Option<ClickTarget>,
    /// Slot inside `target`.
    pub slot: i32,
    /// Who clicked.
    pub viewer: ViewerId,
    cancelled: bool,
}

impl ClickEvent {
    /// A click on `slot` of the open menu buffer.
    pub fn menu(source: BufferId, slot: i32, viewer: ViewerId) -> Self {
        Self {
            source,
            target: Some(ClickTarget::Menu),
            slot,
            viewer,
            cancelled: false,
        }
    }

    /// A click on `slot` of the viewer's own inventory while `source` is open.
    pub fn player_inventory(source: BufferId, slot: i32, viewer: ViewerId) -> Self {
        Self {
            source,
            target: Some(ClickTarget::PlayerInventory),
            slot,
            viewer,
            cancelled: false,
        }
    }

    /// A click on empty space while `source` is open.
    pub fn outside(source: BufferId, viewer: ViewerId) -> Self {
        Self {
            source,
            target: None,
            slot: -1,
            viewer,
            cancelled: false,
        }
    }

    /// Suppress the host's default handling of this click.
    #[inline]
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Whether the click landed in the viewer's own inventory.
    #[inline]
    pub fn in_player_inventory(&self) -> bool {
        self.target == Some(ClickTarget::PlayerInventory)
    }
}

// ---------------------------------------------------------------------------
// DragEvent
// ---------------------------------------------------------------------------

/// An item drag across one or more slots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragEvent {
    pub source: BufferId,
    pub viewer: ViewerId,
    /// Raw slots touched by the drag.
    pub slots: Vec<i32>,
    cancelled: bool,
}

impl DragEvent {
    pub fn new(source: BufferId, viewer: ViewerId, slots: Vec<i32>) -> Self {
        Self {
            source,
            viewer,
            slots,
            cancelled: false,
        }
    }

    #[inline]
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

// ---------------------------------------------------------------------------
// CloseEvent
// ---------------------------------------------------------------------------

/// A viewer closed the buffer `source`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CloseEvent {
    pub source: BufferId,
    pub viewer: ViewerId,
}

impl CloseEvent {
    pub fn new(source: BufferId, viewer: ViewerId) -> Self {
        Self { source, viewer }
    }
}

// ---------------------------------------------------------------------------
// MenuEvent
// ---------------------------------------------------------------------------

/// Any event the host hands to the menu layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MenuEvent {
    Click(ClickEvent),
    Drag(DragEvent),
    Close(CloseEvent),
}

impl MenuEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click(_) => EventKind::Click,
            Self::Drag(_) => EventKind::Drag,
            Self::Close(_) => EventKind::Close,
        }
    }

    /// The buffer the event refers to.
    pub fn source(&self) -> BufferId {
        match self {
            Self::Click(e) => e.source,
            Self::Drag(e) => e.source,
            Self::Close(e) => e.source,
        }
    }

    /// The viewer the event came from.
    pub fn viewer(&self) -> ViewerId {
        match self {
            Self::Click(e) => e.viewer,
            Self::Drag(e) => e.viewer,
            Self::Close(e) => e.viewer,
        }
    }

    /// Whether a click or drag was cancelled. Close events are never
    /// cancelled.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Click(e) => e.is_cancelled(),
            Self::Drag(e) => e.is_cancelled(),
            Self::Close(_) => false,
        }
    }
}

impl From<ClickEvent> for MenuEvent {
    fn from(e: ClickEvent) -> Self {
        Self::Click(e)
    }
}

impl From<DragEvent> for MenuEvent {
    fn from(e: DragEvent) -> Self {
        Self::Drag(e)
    }
}

impl From<CloseEvent> for MenuEvent {
    fn from(e: CloseEvent) -> Self {
        Self::Close(e)
    }
}
