//! Built-in rectangle positioning engine: side placement with alignment,
//! offset, flip to the opposite side on overflow, and viewport clamping with
//! padding.

use std::collections::HashMap;

use super::{ComputedPlacement, PopperHandle, PositionRequest, Positioner, Rect};
use crate::tooltip::{Alignment, Placement, Side};

#[derive(Debug, Default)]
pub struct RectPositioner {
    /// Live handles and their most recent placement.
    handles: HashMap<PopperHandle, Option<ComputedPlacement>>,
    next_id: u64,
}

impl RectPositioner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_handles(&self) -> usize {
        self.handles.len()
    }
}

impl Positioner for RectPositioner {
    fn attach(&mut self, _request: &PositionRequest) -> PopperHandle {
        self.next_id += 1;
        let handle = PopperHandle(self.next_id);
        self.handles.insert(handle, None);
        handle
    }

    fn compute(&mut self, handle: PopperHandle, request: &PositionRequest) -> Option<ComputedPlacement> {
        let slot = self.handles.get_mut(&handle)?;
        let computed = place(request);
        *slot = Some(computed);
        Some(computed)
    }

    fn release(&mut self, handle: PopperHandle) {
        self.handles.remove(&handle);
    }
}

/// Place a tooltip for `req`.
pub fn place(req: &PositionRequest) -> ComputedPlacement {
    let side = match req.placement.side {
        Side::Auto => roomiest_side(req),
        side => side,
    };
    let mut placement = req.placement.with_side(side);
    let mut rect = raw_rect(req, placement);

    if req.flip && !fits_main_axis(req, side, &rect) {
        let flipped = placement.with_side(side.opposite());
        let flipped_rect = raw_rect(req, flipped);
        if fits_main_axis(req, flipped.side, &flipped_rect) {
            placement = flipped;
            rect = flipped_rect;
        }
    }

    clamp_to_viewport(&mut rect, &req.viewport, req.padding);
    ComputedPlacement { placement, rect }
}

/// Side with the most free space between anchor and viewport edge.
fn roomiest_side(req: &PositionRequest) -> Side {
    let a = &req.anchor;
    let vp = &req.viewport;
    let candidates = [
        (Side::Top, a.y - vp.y),
        (Side::Bottom, vp.bottom() - a.bottom()),
        (Side::Right, vp.right() - a.right()),
        (Side::Left, a.x - vp.x),
    ];
    let mut best = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

fn align(start: f32, anchor_len: f32, tip_len: f32, alignment: Alignment) -> f32 {
    match alignment {
        Alignment::Start => start,
        Alignment::Center => start + (anchor_len - tip_len) / 2.0,
        Alignment::End => start + anchor_len - tip_len,
    }
}

fn raw_rect(req: &PositionRequest, placement: Placement) -> Rect {
    let a = &req.anchor;
    let tip = &req.tooltip;
    let (x, y) = match placement.side {
        Side::Top => (
            align(a.x, a.width, tip.width, placement.alignment),
            a.y - req.offset - tip.height,
        ),
        Side::Bottom | Side::Auto => (
            align(a.x, a.width, tip.width, placement.alignment),
            a.bottom() + req.offset,
        ),
        Side::Left => (
            a.x - req.offset - tip.width,
            align(a.y, a.height, tip.height, placement.alignment),
        ),
        Side::Right => (
            a.right() + req.offset,
            align(a.y, a.height, tip.height, placement.alignment),
        ),
    };
    Rect::new(x, y, tip.width, tip.height)
}

fn fits_main_axis(req: &PositionRequest, side: Side, rect: &Rect) -> bool {
    let vp = &req.viewport;
    let pad = req.padding;
    match side {
        Side::Top => rect.y >= vp.y + pad,
        Side::Bottom | Side::Auto => rect.bottom() <= vp.bottom() - pad,
        Side::Left => rect.x >= vp.x + pad,
        Side::Right => rect.right() <= vp.right() - pad,
    }
}

/// Keep the rect `padding` away from the viewport edges. When the tooltip is
/// larger than the padded viewport the top-left edge wins.
fn clamp_to_viewport(rect: &mut Rect, viewport: &Rect, padding: f32) {
    let min_x = viewport.x + padding;
    let max_x = viewport.right() - padding - rect.width;
    rect.x = rect.x.min(max_x).max(min_x);

    let min_y = viewport.y + padding;
    let max_y = viewport.bottom() - padding - rect.height;
    rect.y = rect.y.min(max_y).max(min_y);
}
