//! A small shop built from every kind of menu, shared by the demo binaries.
//!
//! The main menu leads to a scrolling catalogue with random stock, a
//! three-page guide linked as a chain, and a profile page built for the
//! local viewer. Closing the catalogue or the profile returns to the main
//! menu on the next tick.

use std::cell::RefCell;
use std::rc::Rc;

use rand::{Rng, RngExt};
use slotmenu_core::{Corner, Cue, Host, Icon};
use slotmenu_crossterm::TerminalHost;
use slotmenu_ui::{
    DisplayItem, EventDispatcher, GridMenu, ListenerSet, MenuChain, MenuError, ScopedMenu,
    ScrollControls, ScrollingMenu, ScrollingMenuConfig, StaticMenu, StaticMenuConfig,
};

type H = TerminalHost;

pub const GOODS: [&str; 12] = [
    "APPLE", "BREAD", "CARROT", "TORCH", "ROPE", "LANTERN", "ARROW", "BOW", "SHIELD", "BOOTS",
    "HELMET", "MAP",
];

/// Number of catalogue entries.
pub const CATALOGUE_LEN: i32 = 40;

const GUIDE: [&[&str]; 3] = [
    &["Click an item", "to buy it."],
    &["Use the ladders", "to scroll the", "catalogue."],
    &["Esc closes a menu.", "Esc again quits."],
];

/// Every menu of the shop plus the listener set they are registered with.
pub struct Shop {
    pub main: Rc<RefCell<StaticMenu<H>>>,
    pub catalogue: Rc<RefCell<ScrollingMenu<H>>>,
    pub guide: MenuChain<H>,
    pub profile: Rc<RefCell<ScopedMenu<H>>>,
    pub listeners: ListenerSet<H>,
}

fn label(material: &str, name: &str) -> Icon {
    Icon::new(material).with_name(name)
}

fn catalogue<R: Rng>(host: &mut H, rng: &mut R) -> Result<ScrollingMenu<H>, MenuError> {
    let mut config = ScrollingMenuConfig::new("Catalogue", 4, ScrollControls::labelled("LADDER"));
    config.scroll_step = 2;
    config.up_corner = Corner::TopLeft;
    config.down_corner = Corner::BottomLeft;
    config.scroll_cue = Some(Cue::new("page turn"));
    config.blocked_cue = Some(Cue::new("thud"));

    // Column 0 holds the ladders, so each row carries eight goods.
    let goods = (0..CATALOGUE_LEN).map(|n| {
        let index = (n / 8) * 9 + 1 + n % 8;
        let material = GOODS[n as usize % GOODS.len()];
        let stock = rng.random_range(1..=64u8);
        let price = rng.random_range(2..40u32);
        let icon = Icon::new(material)
            .with_amount(stock)
            .with_lore_line(&format!("{price} coins"));
        let cue = Cue::new(&format!("bought {material}"));
        let item = DisplayItem::new(icon, move |host: &mut H, event| {
            if let Err(e) = host.play_cue(event.viewer, &cue) {
                log::debug!("purchase cue dropped: {e}");
            }
        });
        (index, item)
    });
    let goods: Vec<_> = goods.collect();
    ScrollingMenu::with_items(host, config, goods)
}

fn guide_page(host: &mut H, page: usize) -> Result<Rc<RefCell<StaticMenu<H>>>, MenuError> {
    let name = format!("Guide {}/{}", page + 1, GUIDE.len());
    let items = GUIDE[page]
        .iter()
        .enumerate()
        .map(|(i, line)| (i as i32 + 1, DisplayItem::inert(label("PAPER", line))));
    let menu = StaticMenu::with_items(host, StaticMenuConfig::new(&name, 3), items)?;
    Ok(Rc::new(RefCell::new(menu)))
}

/// Build the shop and register every menu.
pub fn build<R: Rng>(host: &mut H, rng: &mut R) -> Result<Shop, MenuError> {
    let mut listeners = ListenerSet::new();
    let viewer = host.viewer();

    let mut main = StaticMenu::new(host, StaticMenuConfig::new("Shop", 1))?;

    let mut catalogue = catalogue(host, rng)?;
    catalogue.set_parent(&main);

    let pages = (0..GUIDE.len())
        .map(|page| guide_page(host, page))
        .collect::<Result<Vec<_>, _>>()?;
    let guide = MenuChain::new(
        host,
        label("ARROW", "Next page"),
        label("ARROW", "Previous page"),
        pages,
    )?;

    let mut profile = ScopedMenu::new(host, StaticMenuConfig::new("Profile", 1), viewer)?;
    profile.set_parent(&main);
    profile.add_item(host, 4, DisplayItem::inert(label("PLAYER_HEAD", "You").with_glow(true)))?;
    profile.set_on_player_inventory_click(|host: &mut H, event| {
        if let Err(e) = host.play_cue(event.viewer, &Cue::new("rummage")) {
            log::debug!("inventory cue dropped: {e}");
        }
    });

    let catalogue_buffer = catalogue.buffer();
    let catalogue = Rc::new(RefCell::new(catalogue));
    let profile = Rc::new(RefCell::new(profile));
    let first_page = guide.get(0).map(|page| page.borrow().buffer());

    main.add_item(
        host,
        1,
        DisplayItem::new(label("CHEST", "Catalogue"), move |host: &mut H, event| {
            if let Err(e) = host.open(event.viewer, catalogue_buffer) {
                log::warn!("catalogue did not open: {e}");
            }
        }),
    )?;
    if let Some(first_page) = first_page {
        main.add_item(
            host,
            3,
            DisplayItem::new(label("BOOK", "Guide"), move |host: &mut H, event| {
                if let Err(e) = host.open(event.viewer, first_page) {
                    log::warn!("guide did not open: {e}");
                }
            }),
        )?;
    }
    let profile_ref = Rc::clone(&profile);
    main.add_item(
        host,
        5,
        DisplayItem::new(label("PLAYER_HEAD", "Profile"), move |host: &mut H, _| {
            profile_ref.borrow().open_inventory(host);
        }),
    )?;
    main.add_item(
        host,
        7,
        DisplayItem::new(label("BARRIER", "Leave"), |host: &mut H, _| host.quit()),
    )?;
    let main = Rc::new(RefCell::new(main));

    EventDispatcher::register(&main, &mut listeners);
    EventDispatcher::register(&catalogue, &mut listeners);
    EventDispatcher::register(&profile, &mut listeners);
    for page in guide.menus() {
        EventDispatcher::register(page, &mut listeners);
    }

    Ok(Shop {
        main,
        catalogue,
        guide,
        profile,
        listeners,
    })
}
