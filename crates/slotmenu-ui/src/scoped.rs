use std::ops::{Deref, DerefMut};

use slotmenu_core::{ClickEvent, CloseEvent, DragEvent, Host, ViewerId};

use crate::error::MenuError;
use crate::menu::{self, GridMenu, MenuBase};
use crate::static_menu::{StaticMenu, StaticMenuConfig};

/// A [`StaticMenu`] built for one viewer. Its buffer is tagged with that
/// viewer so the host can tell per-viewer copies apart.
pub struct ScopedMenu<H: Host> {
    menu: StaticMenu<H>,
    viewer: ViewerId,
}

impl<H: Host> ScopedMenu<H> {
    pub fn new(host: &mut H, config: StaticMenuConfig, viewer: ViewerId) -> Result<Self, MenuError> {
        let menu = StaticMenu::with_owner(host, config, Some(viewer))?;
        Ok(Self { menu, viewer })
    }

    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    /// Show the menu to its viewer. Does nothing and returns `false` when
    /// the viewer is not connected or the host refuses the open.
    pub fn open_inventory(&self, host: &mut H) -> bool {
        if !host.is_online(self.viewer) {
            log::debug!("{} not opened: {} is offline", self.menu.buffer(), self.viewer);
            return false;
        }
        menu::open_quietly(host, self.viewer, self.menu.buffer())
    }
}

impl<H: Host> Deref for ScopedMenu<H> {
    type Target = StaticMenu<H>;

    fn deref(&self) -> &StaticMenu<H> {
        &self.menu
    }
}

impl<H: Host> DerefMut for ScopedMenu<H> {
    fn deref_mut(&mut self) -> &mut StaticMenu<H> {
        &mut self.menu
    }
}

impl<H: Host> GridMenu<H> for ScopedMenu<H> {
    fn base(&self) -> &MenuBase<H> {
        self.menu.base()
    }

    fn base_mut(&mut self) -> &mut MenuBase<H> {
        self.menu.base_mut()
    }

    fn refresh(&mut self, host: &mut H) {
        self.menu.refresh(host);
    }

    fn on_click(&mut self, host: &mut H, event: &mut ClickEvent) {
        self.menu.on_click(host, event);
    }

    fn on_drag(&mut self, host: &mut H, event: &mut DragEvent) {
        self.menu.on_drag(host, event);
    }

    fn on_exit(&mut self, host: &mut H, event: &CloseEvent) {
        self.menu.on_exit(host, event);
    }
}
