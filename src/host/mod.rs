//! Host UI tree seam: the elements tooltips anchor to.

mod document;
mod event;

pub use document::{Document, Element};
pub use event::{HostEvent, ListenerId};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::positioning::Rect;

static NEXT_ANCHOR_ID: AtomicU64 = AtomicU64::new(1);

/// Generate a unique anchor ID.
pub fn next_anchor_id() -> u64 {
    NEXT_ANCHOR_ID.fetch_add(1, Ordering::Relaxed)
}

/// Stable identity of a host element. Assigned by the host, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor#{}", self.0)
    }
}

/// The UI tree a tooltip manager attaches to.
///
/// Anchors are owned by the host; the manager only borrows their identity,
/// listens to their interaction events and reads their geometry.
pub trait Host {
    /// Whether the anchor exists and is currently attached to the tree.
    fn is_mounted(&self, anchor: AnchorId) -> bool;

    /// Attach an interaction listener to the anchor.
    fn add_listener(&mut self, anchor: AnchorId, event: HostEvent) -> Result<ListenerId>;

    /// Detach a listener previously returned by [`Host::add_listener`].
    fn remove_listener(&mut self, anchor: AnchorId, listener: ListenerId) -> Result<()>;

    /// Current bounds of the anchor, `None` once it has left the tree.
    fn anchor_rect(&self, anchor: AnchorId) -> Option<Rect>;

    /// Visible area tooltips are kept inside.
    fn viewport(&self) -> Rect;
}
