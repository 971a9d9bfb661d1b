//! Crossterm terminal host for slotmenu.
//!
//! [`TerminalHost`] implements [`slotmenu_core::Host`] for a single local
//! viewer. The open menu is drawn as a grid of text cells with the viewer's
//! own inventory row below it. Mouse clicks become click events, mouse drags
//! become drag events and `Esc`/`q` closes the open menu.
//!
//! Each pass through [`TerminalHost::run`] is one tick: input is read,
//! events are delivered, then any deferred tasks that fell due are run.

mod layout;

pub use layout::{Layout, Region, cell_text};

use std::collections::{HashMap, VecDeque};
use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{self, Attribute},
    terminal::{self, ClearType},
};

use slotmenu_core::{
    BufferId, ClickEvent, CloseEvent, Cue, DragEvent, Host, HostError, Icon, MenuEvent, Task,
    TaskQueue, ViewerId, COLUMNS,
};
use slotmenu_ui::ListenerSet;

/// Settings for a [`TerminalHost`].
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalHostConfig {
    /// Terminal columns per slot, including the brackets.
    pub cell_width: u16,
    /// Length of one tick.
    pub tick: Duration,
    /// Capture mouse input. Without it menus can only be closed.
    pub mouse: bool,
}

impl Default for TerminalHostConfig {
    fn default() -> Self {
        Self {
            cell_width: 12,
            tick: Duration::from_millis(50),
            mouse: true,
        }
    }
}

/// What the host keeps for each buffer it created.
#[derive(Debug, Clone)]
struct Buffer {
    name: String,
    owner: Option<ViewerId>,
    contents: Vec<Option<Icon>>,
}

/// Host input after mapping from crossterm, before it becomes a menu
/// event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Close,
    Quit,
}

fn to_command(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Close),
        _ => None,
    }
}

/// A terminal host with one local viewer.
pub struct TerminalHost {
    config: TerminalHostConfig,
    viewer: ViewerId,
    online: bool,
    buffers: HashMap<BufferId, Buffer>,
    next_buffer: u64,
    open: Option<BufferId>,
    inventory: Vec<Option<Icon>>,
    pending: VecDeque<MenuEvent>,
    tasks: TaskQueue<Task<Self>>,
    drag: Vec<i32>,
    status: String,
    running: bool,
    dirty: bool,
}

impl TerminalHost {
    pub fn new(config: TerminalHostConfig) -> Self {
        Self {
            config,
            viewer: ViewerId::random(),
            online: true,
            buffers: HashMap::new(),
            next_buffer: 1,
            open: None,
            inventory: vec![None; COLUMNS as usize],
            pending: VecDeque::new(),
            tasks: TaskQueue::new(),
            drag: Vec::new(),
            status: String::new(),
            running: false,
            dirty: true,
        }
    }

    /// The local viewer.
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    /// The buffer the viewer has open, if any.
    pub fn open_buffer(&self) -> Option<BufferId> {
        self.open
    }

    /// Fill the inventory row shown under the menu. Extra items are
    /// dropped.
    pub fn set_inventory<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = Option<Icon>>,
    {
        self.inventory = items.into_iter().take(COLUMNS as usize).collect();
        self.inventory.resize(COLUMNS as usize, None);
        self.dirty = true;
    }

    /// Stop the loop after the current tick.
    pub fn quit(&mut self) {
        self.running = false;
    }

    fn layout(&self) -> Option<Layout> {
        let buffer = self.buffers.get(&self.open?)?;
        Some(Layout::new(
            self.config.cell_width,
            buffer.contents.len() as i32 / COLUMNS,
        ))
    }

    /// Turn a click at terminal (`column`, `row`) into a click event on the
    /// open buffer.
    fn click_at(&self, column: u16, row: u16) -> Option<ClickEvent> {
        let source = self.open?;
        let layout = self.layout()?;
        Some(match layout.locate(column, row) {
            Region::Menu(slot) => ClickEvent::menu(source, slot, self.viewer),
            Region::Inventory(slot) => ClickEvent::player_inventory(source, slot, self.viewer),
            Region::Outside => ClickEvent::outside(source, self.viewer),
        })
    }

    fn close_open(&mut self) {
        if let Some(previous) = self.open.take() {
            self.pending.push_back(CloseEvent::new(previous, self.viewer).into());
            self.dirty = true;
        }
    }

    fn handle(&mut self, event: Event) {
        match event {
            Event::Key(key) => match to_command(key) {
                Some(Command::Quit) => self.quit(),
                Some(Command::Close) if self.open.is_some() => self.close_open(),
                Some(Command::Close) => self.quit(),
                None => {}
            },
            Event::Mouse(me) => match me.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.drag.clear();
                    if let Some(click) = self.click_at(me.column, me.row) {
                        self.pending.push_back(click.into());
                    }
                }
                MouseEventKind::Drag(MouseButton::Left) => {
                    let region = self.layout().map(|l| l.locate(me.column, me.row));
                    if let Some(Region::Menu(slot)) = region {
                        if !self.drag.contains(&slot) {
                            self.drag.push(slot);
                        }
                    }
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    let slots = std::mem::take(&mut self.drag);
                    if let (Some(source), false) = (self.open, slots.is_empty()) {
                        self.pending
                            .push_back(DragEvent::new(source, self.viewer, slots).into());
                    }
                }
                _ => {}
            },
            Event::Resize(..) => self.dirty = true,
            _ => {}
        }
    }

    /// Deliver queued events until none are left. Menus may queue more
    /// while handling one, for example by opening another buffer.
    fn deliver_pending(&mut self, listeners: &mut ListenerSet<Self>) {
        while let Some(mut event) = self.pending.pop_front() {
            let reached = listeners.deliver(self, &mut event);
            log::trace!("{:?} on {} reached {reached} menus", event.kind(), event.source());
        }
    }

    /// Advance the clock one tick and run what fell due.
    fn tick(&mut self) {
        let due = self.tasks.advance();
        for task in due {
            task(self);
        }
    }

    /// Run the terminal loop until the viewer quits.
    ///
    /// The terminal is restored even when drawing or input fails.
    pub fn run(&mut self, listeners: &mut ListenerSet<Self>) -> Result<(), Box<dyn std::error::Error>> {
        self.init()?;
        let result = self.run_loop(listeners);
        self.restore();
        result
    }

    fn run_loop(&mut self, listeners: &mut ListenerSet<Self>) -> Result<(), Box<dyn std::error::Error>> {
        self.running = true;
        while self.running {
            if self.dirty {
                self.draw()?;
                self.dirty = false;
            }
            if event::poll(self.config.tick)? {
                while event::poll(Duration::ZERO)? {
                    let ev = event::read()?;
                    self.handle(ev);
                }
            }
            self.deliver_pending(listeners);
            self.tick();
            self.deliver_pending(listeners);
        }
        Ok(())
    }

    fn init(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.config.mouse {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        Ok(())
    }

    fn restore(&mut self) {
        let mut stdout = io::stdout();
        if self.config.mouse {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    fn draw(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;

        let (Some(buffer), Some(layout)) = (self.open.and_then(|b| self.buffers.get(&b)), self.layout())
        else {
            queue!(
                stdout,
                cursor::MoveTo(0, 0),
                style::Print("No menu open. Press q to quit."),
                cursor::MoveTo(0, 2),
                style::Print(&self.status)
            )?;
            return stdout.flush();
        };

        queue!(
            stdout,
            cursor::MoveTo(0, layout.title_row()),
            style::SetAttribute(Attribute::Bold),
            style::Print(&buffer.name),
            style::SetAttribute(Attribute::Reset)
        )?;
        if let Some(owner) = buffer.owner {
            queue!(stdout, style::Print(format!("  ({owner})")))?;
        }

        draw_row(&mut stdout, &layout, layout.menu_top(), &buffer.contents)?;
        draw_row(&mut stdout, &layout, layout.inventory_row(), &self.inventory)?;

        queue!(
            stdout,
            cursor::MoveTo(0, layout.status_row()),
            style::Print(&self.status)
        )?;
        stdout.flush()
    }
}

fn draw_row<W: Write>(out: &mut W, layout: &Layout, top: u16, contents: &[Option<Icon>]) -> io::Result<()> {
    for (slot, icon) in contents.iter().enumerate() {
        let (x, y) = layout.cell_origin(top, slot as i32);
        queue!(out, cursor::MoveTo(x, y))?;
        let glowing = icon.as_ref().is_some_and(|i| i.glowing);
        if glowing {
            queue!(out, style::SetAttribute(Attribute::Bold))?;
        }
        queue!(out, style::Print(cell_text(icon.as_ref(), layout.cell_width)))?;
        if glowing {
            queue!(out, style::SetAttribute(Attribute::Reset))?;
        }
    }
    Ok(())
}

impl Default for TerminalHost {
    fn default() -> Self {
        Self::new(TerminalHostConfig::default())
    }
}

impl Host for TerminalHost {
    type Item = Icon;

    fn create_buffer(&mut self, size: i32, name: &str, owner: Option<ViewerId>) -> BufferId {
        let id = BufferId(self.next_buffer);
        self.next_buffer += 1;
        self.buffers.insert(
            id,
            Buffer {
                name: name.to_string(),
                owner,
                contents: vec![None; size.max(0) as usize],
            },
        );
        id
    }

    fn set_contents(&mut self, buffer: BufferId, contents: &[Option<Icon>]) {
        match self.buffers.get_mut(&buffer) {
            Some(b) => {
                b.contents.clear();
                b.contents.extend_from_slice(contents);
                self.dirty |= self.open == Some(buffer);
            }
            None => log::warn!("contents pushed to unknown {buffer}"),
        }
    }

    /// Opening a buffer closes the one currently open. The close event is
    /// queued and delivered after the current event finishes.
    fn open(&mut self, viewer: ViewerId, buffer: BufferId) -> Result<(), HostError> {
        if !self.is_online(viewer) {
            return Err(HostError::ViewerOffline(viewer));
        }
        if !self.buffers.contains_key(&buffer) {
            return Err(HostError::UnknownBuffer(buffer));
        }
        self.close_open();
        self.open = Some(buffer);
        self.dirty = true;
        Ok(())
    }

    fn close(&mut self, viewer: ViewerId) -> Result<(), HostError> {
        if !self.is_online(viewer) {
            return Err(HostError::ViewerOffline(viewer));
        }
        self.close_open();
        Ok(())
    }

    fn is_online(&self, viewer: ViewerId) -> bool {
        self.online && viewer == self.viewer
    }

    fn play_cue(&mut self, viewer: ViewerId, cue: &Cue) -> Result<(), HostError> {
        if !self.is_online(viewer) {
            return Err(HostError::ViewerOffline(viewer));
        }
        self.status = format!("~ {} ~", cue.name);
        self.dirty = true;
        Ok(())
    }

    fn run_later(&mut self, delay: u32, task: Task<Self>) {
        self.tasks.push(task, delay);
    }
}
