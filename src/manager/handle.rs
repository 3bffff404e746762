//! Imperative handle to one tooltip instance.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::Inner;
use crate::config::EffectiveConfig;
use crate::error::{Error, Result};
use crate::host::{AnchorId, Document, Host};
use crate::positioning::{ComputedPlacement, Positioner, RectPositioner};
use crate::tooltip::{TooltipId, TooltipState};

/// Handle returned by `create_tooltip`.
///
/// Identifies one instance, not the anchor: once the instance is destroyed
/// or replaced by a newer tooltip on the same anchor, every operation fails
/// with [`Error::DestroyedInstance`] except [`TooltipHandle::destroy`].
pub struct TooltipHandle<H: Host = Document, P: Positioner = RectPositioner> {
    inner: Weak<RefCell<Inner<H, P>>>,
    anchor: AnchorId,
    id: TooltipId,
}

impl<H: Host, P: Positioner> Clone for TooltipHandle<H, P> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            anchor: self.anchor,
            id: self.id,
        }
    }
}

impl<H: Host, P: Positioner> std::fmt::Debug for TooltipHandle<H, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TooltipHandle")
            .field("anchor", &self.anchor)
            .field("id", &self.id)
            .finish()
    }
}

impl<H: Host, P: Positioner> TooltipHandle<H, P> {
    pub(super) fn new(inner: Weak<RefCell<Inner<H, P>>>, anchor: AnchorId, id: TooltipId) -> Self {
        Self { inner, anchor, id }
    }

    pub fn id(&self) -> TooltipId {
        self.id
    }

    pub fn anchor(&self) -> AnchorId {
        self.anchor
    }

    fn upgrade(&self) -> Result<Rc<RefCell<Inner<H, P>>>> {
        self.inner.upgrade().ok_or(Error::DestroyedInstance(self.id))
    }

    /// Show the tooltip after the configured show delay.
    pub fn show(&self) -> Result<()> {
        self.upgrade()?.borrow_mut().show(self.anchor, self.id)
    }

    /// Hide the tooltip after the configured hide delay, cancelling a
    /// pending show.
    pub fn hide(&self) -> Result<()> {
        self.upgrade()?.borrow_mut().hide(self.anchor, self.id)
    }

    /// Destroy this instance. No-op if it is already gone.
    pub fn destroy(&self) {
        let Ok(inner) = self.upgrade() else { return };
        let mut inner = inner.borrow_mut();
        if inner.tooltip(self.anchor, self.id).is_some() {
            inner.teardown(self.anchor);
        }
    }

    /// Replace the displayed content. A visible tooltip is repositioned.
    pub fn set_content(&self, content: impl Into<String>) -> Result<()> {
        self.upgrade()?
            .borrow_mut()
            .set_content(self.anchor, self.id, content.into())
    }

    pub fn state(&self) -> TooltipState {
        let Ok(inner) = self.upgrade() else { return TooltipState::Destroyed };
        let inner = inner.borrow();
        inner
            .tooltip(self.anchor, self.id)
            .map(|t| t.state)
            .unwrap_or(TooltipState::Destroyed)
    }

    pub fn is_visible(&self) -> bool {
        self.state() == TooltipState::Visible
    }

    pub fn is_destroyed(&self) -> bool {
        self.state() == TooltipState::Destroyed
    }

    /// Last placement computed by the positioning engine.
    pub fn placement(&self) -> Result<Option<ComputedPlacement>> {
        let inner = self.upgrade()?;
        let inner = inner.borrow();
        let tooltip = inner
            .tooltip(self.anchor, self.id)
            .ok_or(Error::DestroyedInstance(self.id))?;
        Ok(tooltip.placement)
    }

    pub fn config(&self) -> Result<EffectiveConfig> {
        let inner = self.upgrade()?;
        let inner = inner.borrow();
        let tooltip = inner
            .tooltip(self.anchor, self.id)
            .ok_or(Error::DestroyedInstance(self.id))?;
        Ok(tooltip.config.clone())
    }

    /// Number of host listeners this instance holds.
    pub fn listener_count(&self) -> Result<usize> {
        let inner = self.upgrade()?;
        let inner = inner.borrow();
        let tooltip = inner
            .tooltip(self.anchor, self.id)
            .ok_or(Error::DestroyedInstance(self.id))?;
        Ok(tooltip.listener_count())
    }
}
