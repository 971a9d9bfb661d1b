//! A sequence of static menus linked by generated next/back controls.

use std::cell::RefCell;
use std::rc::Rc;

use slotmenu_core::{EventKind, Host};

use crate::error::MenuError;
use crate::item::DisplayItem;
use crate::menu::{self, GridMenu};
use crate::static_menu::StaticMenu;

/// A static menu shared between a chain and whoever registered it with an
/// event source.
pub type SharedMenu<H> = Rc<RefCell<StaticMenu<H>>>;

/// An ordered sequence of [`StaticMenu`]s a viewer can page through.
///
/// Every menu except the last carries a "next" control in its last slot,
/// and every menu except the first carries a "back" control directly above
/// it. Chained menus bypass close events, since paging closes one menu and
/// opens another within the same session.
pub struct MenuChain<H: Host> {
    menus: Vec<SharedMenu<H>>,
    next: H::Item,
    back: H::Item,
}

impl<H: Host> MenuChain<H> {
    /// Link `menus` in order using `next` and `back` as control payloads.
    pub fn new<I>(host: &mut H, next: H::Item, back: H::Item, menus: I) -> Result<Self, MenuError>
    where
        I: IntoIterator<Item = SharedMenu<H>>,
    {
        let mut chain = Self {
            menus: menus.into_iter().collect(),
            next,
            back,
        };
        chain.rebuild(host)?;
        Ok(chain)
    }

    /// Insert `menu` at `index` and relink the whole chain.
    pub fn insert(&mut self, host: &mut H, index: usize, menu: SharedMenu<H>) -> Result<(), MenuError> {
        if index > self.menus.len() {
            return Err(MenuError::MenuIndexOutOfRange {
                index,
                len: self.menus.len(),
            });
        }
        self.menus.insert(index, menu);
        self.rebuild(host)
    }

    /// Append `menu` and relink the whole chain.
    pub fn push(&mut self, host: &mut H, menu: SharedMenu<H>) -> Result<(), MenuError> {
        self.insert(host, self.menus.len(), menu)
    }

    pub fn get(&self, index: usize) -> Option<&SharedMenu<H>> {
        self.menus.get(index)
    }

    pub fn menus(&self) -> &[SharedMenu<H>] {
        &self.menus
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    fn rebuild(&mut self, host: &mut H) -> Result<(), MenuError> {
        let buffers: Vec<_> = self.menus.iter().map(|m| m.borrow().buffer()).collect();
        let last = self.menus.len().saturating_sub(1);
        for (i, shared) in self.menus.iter().enumerate() {
            let mut menu = shared.borrow_mut();
            menu.dispatcher_mut().set_bypass(EventKind::Close, true);
            let last_slot = menu.capacity() - 1;
            if i < last {
                let target = buffers[i + 1];
                let item = DisplayItem::new(self.next.clone(), move |host: &mut H, event| {
                    menu::open_quietly(host, event.viewer, target);
                });
                menu.add_item(host, last_slot, item)?;
            }
            if i > 0 {
                let target = buffers[i - 1];
                let item = DisplayItem::new(self.back.clone(), move |host: &mut H, event| {
                    menu::open_quietly(host, event.viewer, target);
                });
                menu.add_item(host, last_slot - 8, item)?;
            }
        }
        log::debug!("linked a chain of {} menus", self.menus.len());
        Ok(())
    }
}
