//! Interaction events delivered by the host to anchors.

use std::fmt;

/// Interaction events a tooltip trigger can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    MouseEnter,
    MouseLeave,
    Focus,
    Blur,
    Click,
}

impl HostEvent {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mouseenter" => Some(Self::MouseEnter),
            "mouseleave" => Some(Self::MouseLeave),
            "focus" => Some(Self::Focus),
            "blur" => Some(Self::Blur),
            "click" => Some(Self::Click),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::Focus => "focus",
            Self::Blur => "blur",
            Self::Click => "click",
        }
    }
}

/// Handle for one attached listener, unique within a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_case_insensitive() {
        assert_eq!(HostEvent::from_str("MouseEnter"), Some(HostEvent::MouseEnter));
        assert_eq!(HostEvent::from_str("blur"), Some(HostEvent::Blur));
        assert_eq!(HostEvent::from_str("hover"), None);
        assert_eq!(HostEvent::Click.as_str(), "click");
    }
}
