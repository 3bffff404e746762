//! In-memory host document: a flat arena of elements keyed by anchor ID.

use std::collections::HashMap;

use super::{next_anchor_id, AnchorId, Host, HostEvent, ListenerId};
use crate::error::{Error, Result};
use crate::positioning::Rect;

/// An element in the document.
#[derive(Debug, Clone)]
pub struct Element {
    pub id: AnchorId,
    /// Tag name, informational only ("button", "span", ...).
    pub tag: String,
    pub rect: Rect,
    pub mounted: bool,
    listeners: Vec<(ListenerId, HostEvent)>,
}

/// Element arena plus viewport.
#[derive(Debug)]
pub struct Document {
    elements: HashMap<AnchorId, Element>,
    viewport: Rect,
    next_listener_id: u64,
}

impl Document {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            elements: HashMap::new(),
            viewport: Rect::new(0.0, 0.0, width, height),
            next_listener_id: 1,
        }
    }

    /// Create and mount an element.
    pub fn create_element(&mut self, tag: &str, rect: Rect) -> AnchorId {
        let id = AnchorId(next_anchor_id());
        self.elements.insert(
            id,
            Element {
                id,
                tag: tag.to_string(),
                rect,
                mounted: true,
                listeners: Vec::new(),
            },
        );
        id
    }

    pub fn get(&self, id: AnchorId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Detach an element from the tree. Its listeners stay registered until removed.
    pub fn unmount(&mut self, id: AnchorId) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.mounted = false;
        }
    }

    /// Remove an element from the arena entirely.
    pub fn remove(&mut self, id: AnchorId) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub fn listener_count(&self, id: AnchorId) -> usize {
        self.elements.get(&id).map(|el| el.listeners.len()).unwrap_or(0)
    }

    /// Events the element currently has listeners for, in attach order.
    pub fn listened_events(&self, id: AnchorId) -> Vec<HostEvent> {
        self.elements
            .get(&id)
            .map(|el| el.listeners.iter().map(|(_, ev)| *ev).collect())
            .unwrap_or_default()
    }

    /// Total listeners across the document.
    pub fn total_listeners(&self) -> usize {
        self.elements.values().map(|el| el.listeners.len()).sum()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

impl Host for Document {
    fn is_mounted(&self, anchor: AnchorId) -> bool {
        self.elements.get(&anchor).is_some_and(|el| el.mounted)
    }

    fn add_listener(&mut self, anchor: AnchorId, event: HostEvent) -> Result<ListenerId> {
        let el = self
            .elements
            .get_mut(&anchor)
            .ok_or(Error::InvalidAnchor(anchor))?;
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        el.listeners.push((id, event));
        Ok(id)
    }

    fn remove_listener(&mut self, anchor: AnchorId, listener: ListenerId) -> Result<()> {
        let el = self
            .elements
            .get_mut(&anchor)
            .ok_or(Error::InvalidAnchor(anchor))?;
        el.listeners.retain(|(id, _)| *id != listener);
        Ok(())
    }

    fn anchor_rect(&self, anchor: AnchorId) -> Option<Rect> {
        self.elements
            .get(&anchor)
            .filter(|el| el.mounted)
            .map(|el| el.rect)
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}
