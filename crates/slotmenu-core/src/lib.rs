//! **slotmenu-core**: grid menu framework, host boundary.
//!
//! This crate provides the types shared by the menu engine and the hosts
//! that embed it: slot geometry, the [`Host`] trait, the events a host
//! delivers, a tick-based [`TaskQueue`] for deferred work, and a default
//! slot payload, [`Icon`].

pub mod geom;
pub mod host;
pub mod item;
pub mod messages;
pub mod schedule;

pub use geom::{COLUMNS, Corner, MAX_ROWS, MIN_ROWS, Point};
pub use host::{BufferId, Cue, Host, HostError, Task, ViewerId};
pub use item::Icon;
pub use messages::*;
pub use schedule::TaskQueue;
