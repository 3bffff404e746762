//! Tooltip instances and their visibility state machine.

mod placement;
mod trigger;

pub use placement::{Alignment, Placement, Side};
pub use trigger::Trigger;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::EffectiveConfig;
use crate::host::{AnchorId, HostEvent, ListenerId};
use crate::positioning::{ComputedPlacement, PopperHandle};
use crate::timer::TimerId;

static NEXT_TOOLTIP_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identity of one tooltip instance. A replaced or destroyed instance's
/// ID is never handed out again, so stale handles can be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooltipId(pub u64);

impl TooltipId {
    pub fn next() -> Self {
        Self(NEXT_TOOLTIP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TooltipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tooltip#{}", self.0)
    }
}

/// Visibility state of a tooltip instance.
///
/// `Showing` and `Hiding` are pending transitions waiting on a delay timer.
/// `Destroyed` is terminal and only observed through stale handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipState {
    Hidden,
    Showing,
    Visible,
    Hiding,
    Destroyed,
}

impl TooltipState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Showing => "showing",
            Self::Visible => "visible",
            Self::Hiding => "hiding",
            Self::Destroyed => "destroyed",
        }
    }

    /// Whether the tooltip is on screen. A pending hide is still on screen.
    pub fn is_on_screen(&self) -> bool {
        matches!(self, Self::Visible | Self::Hiding)
    }
}

impl fmt::Display for TooltipState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live tooltip registered against one anchor.
#[derive(Debug)]
pub struct Tooltip {
    pub id: TooltipId,
    pub anchor: AnchorId,
    pub state: TooltipState,
    pub config: EffectiveConfig,
    /// Last placement computed by the positioning engine.
    pub placement: Option<ComputedPlacement>,
    pub(crate) listeners: Vec<(ListenerId, HostEvent)>,
    pub(crate) popper: Option<PopperHandle>,
    /// Pending show/hide commit.
    pub(crate) pending: Option<TimerId>,
    pub(crate) dispose: Option<TimerId>,
}

impl Tooltip {
    pub fn new(anchor: AnchorId, config: EffectiveConfig) -> Self {
        Self {
            id: TooltipId::next(),
            anchor,
            state: TooltipState::Hidden,
            config,
            placement: None,
            listeners: Vec::new(),
            popper: None,
            pending: None,
            dispose: None,
        }
    }

    pub fn listens_to(&self, event: HostEvent) -> bool {
        self.listeners.iter().any(|(_, ev)| *ev == event)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Events this tooltip attaches listeners for. Non-manual tooltips that
    /// hide on target click also need a click listener.
    pub fn wanted_events(config: &EffectiveConfig) -> Vec<HostEvent> {
        let mut events = config.trigger.events();
        if !config.trigger.is_manual()
            && config.hide_on_target_click
            && !events.contains(&HostEvent::Click)
        {
            events.push(HostEvent::Click);
        }
        events
    }
}
