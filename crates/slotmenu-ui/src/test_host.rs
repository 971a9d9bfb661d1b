//! An in-memory [`Host`] that records everything menus ask of it.

use std::collections::{HashMap, HashSet};

use slotmenu_core::{BufferId, Cue, Host, HostError, Icon, Task, TaskQueue, ViewerId};

/// What the host knows about one buffer.
#[derive(Debug, Clone)]
pub struct BufferRecord {
    pub name: String,
    pub size: i32,
    pub owner: Option<ViewerId>,
    pub contents: Vec<Option<Icon>>,
    /// How many times `set_contents` was called.
    pub pushes: usize,
}

pub struct RecordingHost {
    buffers: HashMap<BufferId, BufferRecord>,
    next_buffer: u64,
    online: HashSet<ViewerId>,
    open: HashMap<ViewerId, BufferId>,
    /// Every successful `open`, in order.
    pub opens: Vec<(ViewerId, BufferId)>,
    /// Every cue played, in order.
    pub cues: Vec<(ViewerId, String)>,
    tasks: TaskQueue<Task<Self>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            buffers: HashMap::new(),
            next_buffer: 1,
            online: HashSet::new(),
            open: HashMap::new(),
            opens: Vec::new(),
            cues: Vec::new(),
            tasks: TaskQueue::new(),
        }
    }

    /// Connect a new viewer.
    pub fn join(&mut self) -> ViewerId {
        let viewer = ViewerId::random();
        self.online.insert(viewer);
        viewer
    }

    /// Disconnect `viewer`.
    pub fn leave(&mut self, viewer: ViewerId) {
        self.online.remove(&viewer);
        self.open.remove(&viewer);
    }

    /// Make `buffer` known without going through `create_buffer`.
    pub fn register_buffer(&mut self, buffer: BufferId) {
        self.buffers.entry(buffer).or_insert_with(|| BufferRecord {
            name: String::new(),
            size: 9,
            owner: None,
            contents: vec![None; 9],
            pushes: 0,
        });
        self.next_buffer = self.next_buffer.max(buffer.0 + 1);
    }

    /// Drop `buffer` so later opens fail with `UnknownBuffer`.
    pub fn forget_buffer(&mut self, buffer: BufferId) {
        self.buffers.remove(&buffer);
    }

    pub fn record(&self, buffer: BufferId) -> &BufferRecord {
        &self.buffers[&buffer]
    }

    pub fn contents(&self, buffer: BufferId) -> &[Option<Icon>] {
        &self.buffers[&buffer].contents
    }

    /// Label of the icon shown in `slot`, if any.
    pub fn label_at(&self, buffer: BufferId, slot: i32) -> Option<&str> {
        let slot = usize::try_from(slot).ok()?;
        self.buffers[&buffer].contents.get(slot)?.as_ref().map(Icon::label)
    }

    pub fn open_buffer(&self, viewer: ViewerId) -> Option<BufferId> {
        self.open.get(&viewer).copied()
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Advance one tick and run whatever became due.
    pub fn tick(&mut self) {
        let due = self.tasks.advance();
        for task in due {
            task(self);
        }
    }
}

impl Host for RecordingHost {
    type Item = Icon;

    fn create_buffer(&mut self, size: i32, name: &str, owner: Option<ViewerId>) -> BufferId {
        let id = BufferId(self.next_buffer);
        self.next_buffer += 1;
        self.buffers.insert(
            id,
            BufferRecord {
                name: name.to_string(),
                size,
                owner,
                contents: vec![None; size.max(0) as usize],
                pushes: 0,
            },
        );
        id
    }

    fn set_contents(&mut self, buffer: BufferId, contents: &[Option<Icon>]) {
        if let Some(record) = self.buffers.get_mut(&buffer) {
            record.contents = contents.to_vec();
            record.pushes += 1;
        }
    }

    fn open(&mut self, viewer: ViewerId, buffer: BufferId) -> Result<(), HostError> {
        if !self.online.contains(&viewer) {
            return Err(HostError::ViewerOffline(viewer));
        }
        if !self.buffers.contains_key(&buffer) {
            return Err(HostError::UnknownBuffer(buffer));
        }
        self.open.insert(viewer, buffer);
        self.opens.push((viewer, buffer));
        Ok(())
    }

    fn close(&mut self, viewer: ViewerId) -> Result<(), HostError> {
        if !self.online.contains(&viewer) {
            return Err(HostError::ViewerOffline(viewer));
        }
        self.open.remove(&viewer);
        Ok(())
    }

    fn is_online(&self, viewer: ViewerId) -> bool {
        self.online.contains(&viewer)
    }

    fn play_cue(&mut self, viewer: ViewerId, cue: &Cue) -> Result<(), HostError> {
        if !self.online.contains(&viewer) {
            return Err(HostError::ViewerOffline(viewer));
        }
        self.cues.push((viewer, cue.name.clone()));
        Ok(())
    }

    fn run_later(&mut self, delay: u32, task: Task<Self>) {
        self.tasks.push(task, delay);
    }
}
