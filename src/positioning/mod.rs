//! Positioning engine seam.
//!
//! The engine computes where a tooltip goes relative to its anchor. It owns
//! per-tooltip state behind a [`PopperHandle`], created on first show and
//! released when the tooltip is destroyed.

mod engine;

pub use engine::RectPositioner;

use std::fmt;

use crate::tooltip::Placement;

/// Axis-aligned rectangle in host coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

const CHAR_WIDTH: f32 = 7.0;
const LINE_HEIGHT: f32 = 16.0;
const PADDING_H: f32 = 8.0;
const PADDING_V: f32 = 5.0;

/// Estimate the rendered size of tooltip content. Markup tags are skipped
/// when `html` is set.
pub fn measure_content(content: &str, html: bool) -> Size {
    let text = if html { strip_tags(content) } else { content.to_string() };
    let lines: Vec<&str> = text.lines().collect();
    let line_count = lines.len().max(1);
    let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    Size {
        width: longest as f32 * CHAR_WIDTH + PADDING_H * 2.0,
        height: line_count as f32 * LINE_HEIGHT + PADDING_V * 2.0,
    }
}

/// Drop markup tags. A `<` only opens a tag when followed by a letter, `/`
/// or `!`; anything else is literal text.
fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    let mut chars = markup.chars().peekable();
    while let Some(c) = chars.next() {
        if in_tag {
            if c == '>' {
                in_tag = false;
            }
            continue;
        }
        let opens_tag = c == '<'
            && chars
                .peek()
                .is_some_and(|next| next.is_ascii_alphabetic() || matches!(next, '/' | '!'));
        if opens_tag {
            in_tag = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Everything the engine needs to place one tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRequest {
    pub anchor: Rect,
    pub tooltip: Size,
    pub placement: Placement,
    /// Gap between anchor and tooltip along the main axis.
    pub offset: f32,
    /// Minimum distance from the viewport edge.
    pub padding: f32,
    pub flip: bool,
    pub viewport: Rect,
}

/// Result of positioning: final placement after flipping, and tooltip bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedPlacement {
    pub placement: Placement,
    pub rect: Rect,
}

/// Handle to engine-side state for one tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PopperHandle(pub u64);

impl fmt::Display for PopperHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popper#{}", self.0)
    }
}

/// External placement collaborator.
pub trait Positioner {
    /// Allocate engine state for a tooltip.
    fn attach(&mut self, request: &PositionRequest) -> PopperHandle;

    /// Compute (or recompute) the placement. `None` for an unknown handle.
    fn compute(&mut self, handle: PopperHandle, request: &PositionRequest) -> Option<ComputedPlacement>;

    /// Release engine state. Unknown handles are ignored.
    fn release(&mut self, handle: PopperHandle);
}
