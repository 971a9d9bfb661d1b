//! Grid menus for slotmenu: static, scrolling, chained and per-viewer menus,
//! plus the event routing that feeds them.

mod chain;
mod dispatch;
mod error;
mod item;
mod menu;
mod scoped;
mod scrolling;
mod static_menu;

#[cfg(test)]
mod test_host;

pub use chain::{MenuChain, SharedMenu};
pub use dispatch::{EventDispatcher, EventSource, ListenerSet, MenuRef, SubscriptionId};
pub use error::MenuError;
pub use item::DisplayItem;
pub use menu::{ClickHook, GridMenu, MenuBase, MenuIdentity};
pub use scoped::ScopedMenu;
pub use scrolling::{ScrollControls, ScrollDirection, ScrollingMenu, ScrollingMenuConfig};
pub use static_menu::{StaticMenu, StaticMenuConfig};
