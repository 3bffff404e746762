//! Preferred tooltip position relative to its anchor.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which side of the anchor the tooltip sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Pick the side with the most room at positioning time.
    Auto,
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Auto => Self::Auto,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Alignment along the anchor edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    Start,
    #[default]
    Center,
    End,
}

/// Placement such as `bottom` or `right-start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Placement {
    pub side: Side,
    pub alignment: Alignment,
}

impl Placement {
    pub const AUTO: Self = Self::new(Side::Auto);
    pub const TOP: Self = Self::new(Side::Top);
    pub const BOTTOM: Self = Self::new(Side::Bottom);
    pub const LEFT: Self = Self::new(Side::Left);
    pub const RIGHT: Self = Self::new(Side::Right);

    pub const fn new(side: Side) -> Self {
        Self { side, alignment: Alignment::Center }
    }

    pub const fn aligned(side: Side, alignment: Alignment) -> Self {
        Self { side, alignment }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let (side, align) = match lower.split_once('-') {
            Some((side, align)) => (side, Some(align)),
            None => (lower.as_str(), None),
        };
        let side = match side {
            "auto" => Side::Auto,
            "top" => Side::Top,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            "right" => Side::Right,
            _ => return None,
        };
        let alignment = match align {
            None => Alignment::Center,
            Some("start") => Alignment::Start,
            Some("end") => Alignment::End,
            Some(_) => return None,
        };
        Some(Self { side, alignment })
    }

    pub fn as_str(&self) -> &'static str {
        match (self.side, self.alignment) {
            (Side::Auto, Alignment::Start) => "auto-start",
            (Side::Auto, Alignment::Center) => "auto",
            (Side::Auto, Alignment::End) => "auto-end",
            (Side::Top, Alignment::Start) => "top-start",
            (Side::Top, Alignment::Center) => "top",
            (Side::Top, Alignment::End) => "top-end",
            (Side::Bottom, Alignment::Start) => "bottom-start",
            (Side::Bottom, Alignment::Center) => "bottom",
            (Side::Bottom, Alignment::End) => "bottom-end",
            (Side::Left, Alignment::Start) => "left-start",
            (Side::Left, Alignment::Center) => "left",
            (Side::Left, Alignment::End) => "left-end",
            (Side::Right, Alignment::Start) => "right-start",
            (Side::Right, Alignment::Center) => "right",
            (Side::Right, Alignment::End) => "right-end",
        }
    }

    pub fn with_side(self, side: Side) -> Self {
        Self { side, ..self }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::TOP
    }
}

impl TryFrom<String> for Placement {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value).ok_or(Error::InvalidPlacement(value))
    }
}

impl From<Placement> for String {
    fn from(value: Placement) -> Self {
        value.as_str().to_string()
    }
}
