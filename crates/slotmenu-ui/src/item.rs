use std::fmt;

use slotmenu_core::{ClickEvent, Host};

/// A slot's content: what it shows and what happens when it is clicked.
///
/// Items are immutable once built. To change what a slot shows, put a new
/// item in it.
pub struct DisplayItem<H: Host> {
    payload: H::Item,
    on_click: Box<dyn Fn(&mut H, &mut ClickEvent)>,
}

impl<H: Host> DisplayItem<H> {
    /// An item that runs `on_click` when clicked.
    pub fn new<F>(payload: H::Item, on_click: F) -> Self
    where
        F: Fn(&mut H, &mut ClickEvent) + 'static,
    {
        Self {
            payload,
            on_click: Box::new(on_click),
        }
    }

    /// An item that does nothing when clicked.
    pub fn inert(payload: H::Item) -> Self {
        Self::new(payload, |_, _| {})
    }

    /// What the slot shows.
    pub fn payload(&self) -> &H::Item {
        &self.payload
    }

    /// Run the click callback.
    pub fn click(&self, host: &mut H, event: &mut ClickEvent) {
        (self.on_click)(host, event);
    }
}

impl<H: Host> fmt::Debug for DisplayItem<H>
where
    H::Item: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayItem")
            .field("payload", &self.payload)
            .finish_non_exhaustive()
    }
}
