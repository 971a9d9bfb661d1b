//! Terminal shop demo.
//!
//! Run: cargo run --bin shop

use slotmenu_crossterm::{TerminalHost, TerminalHostConfig};
use slotmenu_demos::build;
use slotmenu_ui::GridMenu;

fn main() {
    let mut host = TerminalHost::new(TerminalHostConfig::default());
    host.set_inventory((0..9).map(|i| (i % 3 == 0).then(|| slotmenu_core::Icon::new("BREAD"))));

    let mut shop = match build(&mut host, &mut rand::rng()) {
        Ok(shop) => shop,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let viewer = host.viewer();
    if let Err(e) = shop.main.borrow().open_for(&mut host, viewer) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = host.run(&mut shop.listeners) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
