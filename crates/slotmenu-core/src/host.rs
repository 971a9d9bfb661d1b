//! The host boundary: [`Host`], [`BufferId`], [`ViewerId`], [`Cue`],
//! [`HostError`].
//!
//! The host owns the real display surface and the viewer sessions. Menus
//! only ever talk to it through this trait, passed in by `&mut` on every
//! operation that has a visible effect.

use std::fmt;

use uuid::Uuid;

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

/// Handle to a display buffer created by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferId(pub u64);

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buffer#{}", self.0)
    }
}

/// Stable identity of a viewer, independent of whether they are currently
/// connected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewerId(pub Uuid);

impl ViewerId {
    /// A fresh random identity.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Cue
// ---------------------------------------------------------------------------

/// A named feedback cue (usually a sound) played at a viewer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cue {
    pub name: String,
    pub volume: f32,
    pub pitch: f32,
}

impl Cue {
    /// A cue at volume 50 and pitch 50.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            volume: 50.0,
            pitch: 50.0,
        }
    }

    /// Set the volume (builder).
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume;
        self
    }

    /// Set the pitch (builder).
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }
}

// ---------------------------------------------------------------------------
// HostError
// ---------------------------------------------------------------------------

/// Failures a host can report back to the menu layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The viewer is not connected right now.
    ViewerOffline(ViewerId),
    /// The buffer handle was never created by this host.
    UnknownBuffer(BufferId),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ViewerOffline(v) => write!(f, "viewer {v} is not connected"),
            Self::UnknownBuffer(b) => write!(f, "unknown {b}"),
        }
    }
}

impl std::error::Error for HostError {}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// A deferred callback, run by the host on a later tick.
pub type Task<H> = Box<dyn FnOnce(&mut H)>;

/// The application that owns buffers, viewer sessions and the tick clock.
pub trait Host: Sized {
    /// The opaque payload shown in a slot.
    type Item: Clone;

    /// Create a buffer of `size` slots titled `name`, optionally tagged with
    /// the viewer it belongs to.
    fn create_buffer(&mut self, size: i32, name: &str, owner: Option<ViewerId>) -> BufferId;

    /// Replace the full contents of `buffer`. `contents` has one entry per
    /// slot.
    fn set_contents(&mut self, buffer: BufferId, contents: &[Option<Self::Item>]);

    /// Show `buffer` to `viewer`.
    fn open(&mut self, viewer: ViewerId, buffer: BufferId) -> Result<(), HostError>;

    /// Close whatever `viewer` has open.
    fn close(&mut self, viewer: ViewerId) -> Result<(), HostError>;

    /// Whether `viewer` is connected.
    fn is_online(&self, viewer: ViewerId) -> bool;

    /// Play `cue` at the viewer's current location.
    fn play_cue(&mut self, viewer: ViewerId, cue: &Cue) -> Result<(), HostError>;

    /// Run `task` once, `delay` ticks from now. A delay of 0 is treated as 1;
    /// the task never runs before the current call returns.
    fn run_later(&mut self, delay: u32, task: Task<Self>);
}
