use slotmenu_core::{ClickEvent, CloseEvent, Host, ViewerId};

use crate::error::MenuError;
use crate::item::DisplayItem;
use crate::menu::{GridMenu, MenuBase, MenuIdentity};

/// Configuration for a [`StaticMenu`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticMenuConfig {
    /// Title shown by the host.
    pub name: String,
    /// Height in rows, 1 to 6.
    pub rows: i32,
}

impl StaticMenuConfig {
    pub fn new(name: &str, rows: i32) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }
}

impl Default for StaticMenuConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            rows: 3,
        }
    }
}

/// A fixed grid where slot `i` shows item `i`. Every viewer sees the same
/// content.
pub struct StaticMenu<H: Host> {
    base: MenuBase<H>,
    items: Vec<Option<DisplayItem<H>>>,
}

impl<H: Host> StaticMenu<H> {
    /// An empty menu.
    pub fn new(host: &mut H, config: StaticMenuConfig) -> Result<Self, MenuError> {
        Self::with_owner(host, config, None)
    }

    /// A menu pre-filled with `items`. Fails on the first index outside the
    /// grid.
    pub fn with_items<I>(host: &mut H, config: StaticMenuConfig, items: I) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = (i32, DisplayItem<H>)>,
    {
        let mut menu = Self::with_owner(host, config, None)?;
        for (index, item) in items {
            let slot = menu.base.identity().slot_index(index)?;
            menu.items[slot] = Some(item);
        }
        menu.refresh(host);
        Ok(menu)
    }

    pub(crate) fn with_owner(
        host: &mut H,
        config: StaticMenuConfig,
        owner: Option<ViewerId>,
    ) -> Result<Self, MenuError> {
        let identity = MenuIdentity::new(&config.name, config.rows)?;
        let capacity = identity.capacity() as usize;
        let base = MenuBase::new(host, identity, owner);
        let mut items = Vec::with_capacity(capacity);
        items.resize_with(capacity, || None);
        Ok(Self { base, items })
    }

    /// Put `item` in slot `index`, replacing whatever was there, and
    /// refresh.
    pub fn add_item(&mut self, host: &mut H, index: i32, item: DisplayItem<H>) -> Result<(), MenuError> {
        let slot = self.base.identity().slot_index(index)?;
        self.items[slot] = Some(item);
        self.refresh(host);
        Ok(())
    }

    /// Empty slot `index` and refresh. Returns the item that was there.
    pub fn remove_item(&mut self, host: &mut H, index: i32) -> Result<Option<DisplayItem<H>>, MenuError> {
        let slot = self.base.identity().slot_index(index)?;
        let removed = self.items[slot].take();
        self.refresh(host);
        Ok(removed)
    }

    /// The item in slot `index`, if any.
    pub fn item(&self, index: i32) -> Option<&DisplayItem<H>> {
        let slot = usize::try_from(index).ok()?;
        self.items.get(slot)?.as_ref()
    }

    /// All slots, in order.
    pub fn items(&self) -> &[Option<DisplayItem<H>>] {
        &self.items
    }

    /// Payloads in slot order, as pushed to the host.
    pub fn contents(&self) -> Vec<Option<H::Item>> {
        self.items
            .iter()
            .map(|slot| slot.as_ref().map(|item| item.payload().clone()))
            .collect()
    }
}

impl<H: Host> GridMenu<H> for StaticMenu<H> {
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
        } else if let Some(item) = self.item(event.slot) {
            item.click(host, event);
        }
    }

    fn on_exit(&mut self, host: &mut H, event: &CloseEvent) {
        if self.base.owns(event.source) {
            self.base.reopen_parent_later(host, event.viewer);
        }
    }
}
