//! Tooltip instance manager.
//!
//! Owns the registry mapping each anchor to its single live tooltip, drives
//! the show/hide state machine, and dispatches delay and dispose timers.
//! Everything runs on one thread; shared state lives behind
//! `Rc<RefCell<..>>` and handles keep only a weak reference.

mod handle;

pub use handle::TooltipHandle;

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use crate::config::{Delay, EffectiveConfig, PluginOptions, TooltipConfig};
use crate::error::{Error, Result};
use crate::host::{AnchorId, Document, Host, HostEvent, ListenerId};
use crate::positioning::{measure_content, PositionRequest, Positioner, Rect, RectPositioner};
use crate::timer::{Clock, PendingTimer, SystemClock, TimerKind, TimerQueue};
use crate::tooltip::{Tooltip, TooltipId, TooltipState};

pub struct TooltipManager<H: Host = Document, P: Positioner = RectPositioner> {
    inner: Rc<RefCell<Inner<H, P>>>,
}

pub(crate) struct Inner<H, P> {
    host: H,
    positioner: P,
    options: PluginOptions,
    clock: Box<dyn Clock>,
    timers: TimerQueue,
    tooltips: HashMap<AnchorId, Tooltip>,
}

impl<H: Host, P: Positioner> TooltipManager<H, P> {
    /// Install a manager on `host` with wall-clock timers.
    pub fn new(host: H, positioner: P, options: PluginOptions) -> Self {
        Self::with_clock(host, positioner, options, SystemClock::new())
    }

    pub fn with_clock(host: H, positioner: P, options: PluginOptions, clock: impl Clock + 'static) -> Self {
        tracing::debug!(
            "Tooltip manager installed (dispose timeout {:?} ms, delay {:?})",
            options.dispose_timeout,
            options.default_delay
        );
        Self {
            inner: Rc::new(RefCell::new(Inner {
                host,
                positioner,
                options,
                clock: Box::new(clock),
                timers: TimerQueue::new(),
                tooltips: HashMap::new(),
            })),
        }
    }

    /// Create a hidden tooltip on `anchor`, replacing (and destroying) any
    /// tooltip already registered there.
    pub fn create_tooltip(&self, anchor: AnchorId, config: TooltipConfig) -> Result<TooltipHandle<H, P>> {
        let id = self.inner.borrow_mut().create(anchor, &config)?;
        Ok(TooltipHandle::new(Rc::downgrade(&self.inner), anchor, id))
    }

    /// Destroy the tooltip on `anchor`. No-op when there is none.
    pub fn destroy_tooltip(&self, anchor: AnchorId) {
        self.inner.borrow_mut().teardown(anchor);
    }

    /// Destroy every registered tooltip. Returns how many were destroyed.
    pub fn destroy_all(&self) -> usize {
        self.inner.borrow_mut().destroy_all()
    }

    /// Handle to the tooltip currently registered on `anchor`.
    pub fn get(&self, anchor: AnchorId) -> Option<TooltipHandle<H, P>> {
        let id = self.inner.borrow().tooltips.get(&anchor)?.id;
        Some(TooltipHandle::new(Rc::downgrade(&self.inner), anchor, id))
    }

    pub fn contains(&self, anchor: AnchorId) -> bool {
        self.inner.borrow().tooltips.contains_key(&anchor)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().tooltips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().tooltips.is_empty()
    }

    /// Route a host interaction event to the tooltip on `anchor`.
    ///
    /// Returns false when no tooltip there listens to `event`.
    pub fn handle_event(&self, anchor: AnchorId, event: HostEvent) -> bool {
        self.inner.borrow_mut().handle_event(anchor, event)
    }

    /// Fire every due timer. Returns the number of timers fired.
    pub fn process_timers(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        let now = inner.clock.now();
        let mut fired = 0;
        while let Some(timer) = inner.timers.pop_due(now) {
            inner.fire(timer);
            fired += 1;
        }
        fired
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.pending()
    }

    /// Time until the next timer is due, `None` when nothing is scheduled.
    pub fn next_timer_in(&self) -> Option<Duration> {
        let inner = self.inner.borrow();
        let deadline = inner.timers.next_deadline()?;
        Some(deadline.saturating_sub(inner.clock.now()))
    }

    pub fn options(&self) -> PluginOptions {
        self.inner.borrow().options.clone()
    }

    /// Change the default show/hide delay. Applies to tooltips created afterwards.
    pub fn set_default_delay(&self, delay: Delay) {
        tracing::debug!("Default delay set to {:?}", delay);
        self.inner.borrow_mut().options.default_delay = delay;
    }

    /// Change the dispose timeout. Applies to tooltips created afterwards.
    pub fn set_dispose_timeout(&self, timeout_ms: Option<u64>) {
        tracing::debug!("Dispose timeout set to {:?} ms", timeout_ms);
        self.inner.borrow_mut().options.dispose_timeout = timeout_ms;
    }

    pub fn host(&self) -> Ref<'_, H> {
        Ref::map(self.inner.borrow(), |inner| &inner.host)
    }

    pub fn host_mut(&self) -> RefMut<'_, H> {
        RefMut::map(self.inner.borrow_mut(), |inner| &mut inner.host)
    }

    pub fn positioner(&self) -> Ref<'_, P> {
        Ref::map(self.inner.borrow(), |inner| &inner.positioner)
    }
}

impl<H: Host, P: Positioner> Drop for TooltipManager<H, P> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.destroy_all();
        }
    }
}

fn lookup_mut(
    tooltips: &mut HashMap<AnchorId, Tooltip>,
    anchor: AnchorId,
    id: TooltipId,
) -> Result<&mut Tooltip> {
    tooltips
        .get_mut(&anchor)
        .filter(|t| t.id == id)
        .ok_or(Error::DestroyedInstance(id))
}

/// Start the dispose countdown for a tooltip that just became hidden.
fn arm_dispose(timers: &mut TimerQueue, tooltip: &mut Tooltip, hidden_at: Duration) {
    if let Some(old) = tooltip.dispose.take() {
        timers.cancel(old);
    }
    if let Some(ms) = tooltip.config.dispose_timeout {
        tooltip.dispose = Some(timers.schedule(
            hidden_at + Duration::from_millis(ms),
            TimerKind::Dispose,
            tooltip.anchor,
            tooltip.id,
        ));
    }
}

fn position_request(config: &EffectiveConfig, anchor: Rect, viewport: Rect) -> PositionRequest {
    PositionRequest {
        anchor,
        tooltip: measure_content(&config.content, config.html),
        placement: config.placement,
        offset: config.offset,
        padding: config.padding,
        flip: config.flip,
        viewport,
    }
}

impl<H: Host, P: Positioner> Inner<H, P> {
    fn create(&mut self, anchor: AnchorId, config: &TooltipConfig) -> Result<TooltipId> {
        if !self.host.is_mounted(anchor) {
            return Err(Error::InvalidAnchor(anchor));
        }
        if self.teardown(anchor) {
            tracing::debug!("Replacing existing tooltip on {}", anchor);
        }

        let mut tooltip = Tooltip::new(anchor, config.resolve(&self.options));
        for event in Tooltip::wanted_events(&tooltip.config) {
            match self.host.add_listener(anchor, event) {
                Ok(listener) => tooltip.listeners.push((listener, event)),
                Err(e) => {
                    let attached = std::mem::take(&mut tooltip.listeners);
                    self.detach_listeners(anchor, attached);
                    return Err(e);
                }
            }
        }

        let id = tooltip.id;
        tracing::debug!(
            "Created {} on {} (trigger '{}', placement {})",
            id,
            anchor,
            tooltip.config.trigger.to_string_repr(),
            tooltip.config.placement.as_str()
        );
        self.tooltips.insert(anchor, tooltip);
        Ok(id)
    }

    pub(crate) fn show(&mut self, anchor: AnchorId, id: TooltipId) -> Result<()> {
        let now = self.clock.now();
        let tooltip = lookup_mut(&mut self.tooltips, anchor, id)?;
        match tooltip.state {
            TooltipState::Showing | TooltipState::Visible => return Ok(()),
            TooltipState::Hiding => {
                // Still on screen: dropping the pending hide is enough.
                if let Some(pending) = tooltip.pending.take() {
                    self.timers.cancel(pending);
                }
                tooltip.state = TooltipState::Visible;
                tracing::debug!("{}: hide cancelled", id);
                return Ok(());
            }
            TooltipState::Hidden => {}
            TooltipState::Destroyed => return Err(Error::DestroyedInstance(id)),
        }

        if let Some(dispose) = tooltip.dispose.take() {
            self.timers.cancel(dispose);
        }
        let delay = tooltip.config.delay.show;
        if delay == 0 {
            self.commit_show(anchor);
        } else {
            tooltip.state = TooltipState::Showing;
            tooltip.pending = Some(self.timers.schedule(
                now + Duration::from_millis(delay),
                TimerKind::CommitShow,
                anchor,
                id,
            ));
            tracing::debug!("{}: showing in {} ms", id, delay);
        }
        Ok(())
    }

    pub(crate) fn hide(&mut self, anchor: AnchorId, id: TooltipId) -> Result<()> {
        let now = self.clock.now();
        let tooltip = lookup_mut(&mut self.tooltips, anchor, id)?;
        match tooltip.state {
            TooltipState::Hidden | TooltipState::Hiding => Ok(()),
            TooltipState::Showing => {
                if let Some(pending) = tooltip.pending.take() {
                    self.timers.cancel(pending);
                }
                tooltip.state = TooltipState::Hidden;
                arm_dispose(&mut self.timers, tooltip, now);
                tracing::debug!("{}: show cancelled", id);
                Ok(())
            }
            TooltipState::Visible => {
                let delay = tooltip.config.delay.hide;
                if delay == 0 {
                    self.commit_hide(anchor, now);
                } else {
                    tooltip.state = TooltipState::Hiding;
                    tooltip.pending = Some(self.timers.schedule(
                        now + Duration::from_millis(delay),
                        TimerKind::CommitHide,
                        anchor,
                        id,
                    ));
                    tracing::debug!("{}: hiding in {} ms", id, delay);
                }
                Ok(())
            }
            TooltipState::Destroyed => Err(Error::DestroyedInstance(id)),
        }
    }

    pub(crate) fn set_content(&mut self, anchor: AnchorId, id: TooltipId, content: String) -> Result<()> {
        let tooltip = lookup_mut(&mut self.tooltips, anchor, id)?;
        tooltip.config.content = content;
        if tooltip.state.is_on_screen() {
            self.reposition(anchor);
        }
        Ok(())
    }

    fn commit_show(&mut self, anchor: AnchorId) {
        let Some(tooltip) = self.tooltips.get_mut(&anchor) else { return };
        tooltip.pending = None;
        tooltip.state = TooltipState::Visible;
        tracing::debug!("{}: visible", tooltip.id);
        self.reposition(anchor);
    }

    fn commit_hide(&mut self, anchor: AnchorId, hidden_at: Duration) {
        let Some(tooltip) = self.tooltips.get_mut(&anchor) else { return };
        tooltip.pending = None;
        tooltip.state = TooltipState::Hidden;
        arm_dispose(&mut self.timers, tooltip, hidden_at);
        tracing::debug!("{}: hidden", tooltip.id);
    }

    /// Run the positioning engine for a tooltip, attaching engine state on
    /// first use.
    fn reposition(&mut self, anchor: AnchorId) {
        let Some(tooltip) = self.tooltips.get_mut(&anchor) else { return };
        let Some(anchor_rect) = self.host.anchor_rect(anchor) else {
            tracing::warn!("{}: {} has no geometry, skipping positioning", tooltip.id, anchor);
            return;
        };
        let request = position_request(&tooltip.config, anchor_rect, self.host.viewport());
        let positioner = &mut self.positioner;
        let handle = *tooltip.popper.get_or_insert_with(|| positioner.attach(&request));
        tooltip.placement = positioner.compute(handle, &request);
    }

    fn handle_event(&mut self, anchor: AnchorId, event: HostEvent) -> bool {
        let Some(tooltip) = self.tooltips.get(&anchor) else { return false };
        if !tooltip.listens_to(event) {
            return false;
        }
        let id = tooltip.id;
        let open = matches!(tooltip.state, TooltipState::Showing | TooltipState::Visible);
        let click_toggles = tooltip.config.trigger.click;

        let result = match event {
            HostEvent::MouseEnter | HostEvent::Focus => self.show(anchor, id),
            HostEvent::MouseLeave | HostEvent::Blur => self.hide(anchor, id),
            HostEvent::Click if click_toggles && !open => self.show(anchor, id),
            HostEvent::Click if open => self.hide(anchor, id),
            HostEvent::Click => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!("{}: failed to handle {}: {}", id, event.as_str(), e);
        }
        true
    }

    fn fire(&mut self, timer: PendingTimer) {
        let Some(tooltip) = self.tooltips.get(&timer.anchor) else { return };
        if tooltip.id != timer.tooltip {
            return;
        }
        let (pending, dispose) = (tooltip.pending, tooltip.dispose);
        match timer.kind {
            TimerKind::CommitShow if pending == Some(timer.id) => self.commit_show(timer.anchor),
            TimerKind::CommitHide if pending == Some(timer.id) => {
                self.commit_hide(timer.anchor, timer.fire_at)
            }
            TimerKind::Dispose if dispose == Some(timer.id) => {
                tracing::debug!("{}: unused for dispose timeout, destroying", timer.tooltip);
                self.teardown(timer.anchor);
            }
            _ => {}
        }
    }

    /// Destroy the tooltip on `anchor`, releasing timers, listeners and
    /// positioning state. The anchor may already be gone from the host.
    pub(crate) fn teardown(&mut self, anchor: AnchorId) -> bool {
        let Some(mut tooltip) = self.tooltips.remove(&anchor) else { return false };
        for timer in [tooltip.pending.take(), tooltip.dispose.take()].into_iter().flatten() {
            self.timers.cancel(timer);
        }
        let listeners = std::mem::take(&mut tooltip.listeners);
        self.detach_listeners(anchor, listeners);
        if let Some(handle) = tooltip.popper.take() {
            self.positioner.release(handle);
        }
        tracing::debug!("Destroyed {} on {}", tooltip.id, anchor);
        true
    }

    fn destroy_all(&mut self) -> usize {
        let anchors: Vec<AnchorId> = self.tooltips.keys().copied().collect();
        anchors.into_iter().filter(|a| self.teardown(*a)).count()
    }

    fn detach_listeners(&mut self, anchor: AnchorId, listeners: Vec<(ListenerId, HostEvent)>) {
        for (listener, event) in listeners {
            if let Err(e) = self.host.remove_listener(anchor, listener) {
                tracing::warn!("Failed to detach {} listener from {}: {}", event.as_str(), anchor, e);
            }
        }
    }

    pub(crate) fn tooltip(&self, anchor: AnchorId, id: TooltipId) -> Option<&Tooltip> {
        self.tooltips.get(&anchor).filter(|t| t.id == id)
    }
}
