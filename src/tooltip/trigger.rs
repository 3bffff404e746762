//! Trigger modes: which interactions open and close a tooltip.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::host::HostEvent;

/// Set of interaction modes. An empty set is `manual`: programmatic control only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Trigger {
    pub hover: bool,
    pub focus: bool,
    pub click: bool,
}

impl Trigger {
    pub const MANUAL: Self = Self { hover: false, focus: false, click: false };
    pub const HOVER: Self = Self { hover: true, focus: false, click: false };
    pub const FOCUS: Self = Self { hover: false, focus: true, click: false };
    pub const CLICK: Self = Self { hover: false, focus: false, click: true };
    pub const HOVER_FOCUS: Self = Self { hover: true, focus: true, click: false };

    /// Parse a space separated list such as `"hover focus"` or `"manual"`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let mut trigger = Self::MANUAL;
        let mut saw_manual = false;
        for mode in s.split_whitespace() {
            match mode.to_ascii_lowercase().as_str() {
                "hover" => trigger.hover = true,
                "focus" => trigger.focus = true,
                "click" => trigger.click = true,
                "manual" => saw_manual = true,
                _ => return Err(Error::InvalidTrigger(s.to_string())),
            }
        }
        if saw_manual && !trigger.is_manual() {
            return Err(Error::InvalidTrigger(s.to_string()));
        }
        if !saw_manual && trigger.is_manual() {
            return Err(Error::InvalidTrigger(s.to_string()));
        }
        Ok(trigger)
    }

    pub fn is_manual(&self) -> bool {
        !self.hover && !self.focus && !self.click
    }

    /// Host events to listen to, in attach order.
    pub fn events(&self) -> Vec<HostEvent> {
        let mut events = Vec::new();
        if self.hover {
            events.push(HostEvent::MouseEnter);
            events.push(HostEvent::MouseLeave);
        }
        if self.focus {
            events.push(HostEvent::Focus);
            events.push(HostEvent::Blur);
        }
        if self.click {
            events.push(HostEvent::Click);
        }
        events
    }

    pub fn to_string_repr(&self) -> String {
        if self.is_manual() {
            return "manual".to_string();
        }
        let mut modes = Vec::new();
        if self.hover {
            modes.push("hover");
        }
        if self.focus {
            modes.push("focus");
        }
        if self.click {
            modes.push("click");
        }
        modes.join(" ")
    }
}

impl TryFrom<String> for Trigger {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Trigger> for String {
    fn from(value: Trigger) -> Self {
        value.to_string_repr()
    }
}
