//! Tooltip Manager
//!
//! Imperative tooltip lifecycle: create a tooltip against an anchor element,
//! show and hide it with cancellable delays, and destroy it, releasing its
//! listeners and positioning state. Hidden tooltips are disposed after a
//! configurable timeout.

pub mod config;
pub mod error;
pub mod host;
pub mod manager;
pub mod positioning;
pub mod timer;
pub mod tooltip;

pub use config::{Delay, PluginOptions, TooltipConfig};
pub use error::{Error, Result};
pub use host::{AnchorId, Document, Host, HostEvent};
pub use manager::{TooltipHandle, TooltipManager};
pub use positioning::{Positioner, Rect, RectPositioner};
pub use timer::{Clock, ManualClock, SystemClock};
pub use tooltip::{Placement, TooltipId, TooltipState, Trigger};
