//! The single-slot pointer gesture state machine.

use super::{TimelineState, coords};
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    ResizeStart,
    ResizeEnd,
    Move,
}

/// Everything captured at pointer-down that later move ticks are measured
/// against. At most one session is alive at a time.
#[derive(Debug, Clone)]
pub struct DragSession {
    pub item_id: u64,
    pub kind: DragKind,
    pub anchor_day_offset: f64,
    #[allow(dead_code)]
    pub anchor_pointer_y: f32,
    pub anchor_date: NaiveDate,
    /// The item's lane at pointer-down; `Move` gestures only.
    pub anchor_lane: Option<usize>,
}

impl TimelineState {
    /// Open a drag session for the given item and grip. Refused while
    /// another session is alive (an active gesture is never preempted) and
    /// when the pointer does not map into the timeline.
    pub fn begin_drag(&mut self, item_id: u64, kind: DragKind, x: f32, y: f32) {
        if self.drag.is_some() {
            return;
        }
        let window = self.window();
        let Some(anchor_day_offset) =
            coords::x_to_day_offset(x, self.viewport_width, window.total_days, self.scale)
        else {
            return;
        };
        let Some(item) = self.items.iter().find(|item| item.id == item_id) else {
            return;
        };

        let anchor_date = match kind {
            DragKind::ResizeEnd => item.end,
            DragKind::ResizeStart | DragKind::Move => item.start,
        };
        let anchor_lane = match kind {
            DragKind::Move => {
                let Some(lane) = self
                    .positioned_items()
                    .iter()
                    .find(|positioned| positioned.item.id == item_id)
                    .map(|positioned| positioned.lane)
                else {
                    return;
                };
                Some(lane)
            }
            _ => None,
        };

        self.drag = Some(DragSession {
            item_id,
            kind,
            anchor_day_offset,
            anchor_pointer_y: y,
            anchor_date,
            anchor_lane,
        });
    }

    /// Apply one pointer-move tick to the open session. Pointer positions
    /// that do not map into the timeline leave everything untouched; the
    /// session stays open for later ticks.
    pub fn drag_moved(&mut self, x: f32, y: f32) {
        let Some(session) = self.drag.clone() else {
            return;
        };
        let window = self.window();
        let Some(offset) =
            coords::x_to_day_offset(x, self.viewport_width, window.total_days, self.scale)
        else {
            return;
        };
        let day_delta = (offset - session.anchor_day_offset).round() as i64;

        if session.kind == DragKind::Move {
            // Crossing into another lane pins the item there. The override
            // is not removed when the pointer returns to the anchor lane;
            // only reset-lanes clears it.
            if let Some(lane) = coords::y_to_lane(y) {
                if Some(lane) != session.anchor_lane {
                    self.manual_lanes.insert(session.item_id, lane);
                }
            }
        }

        let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.id == session.item_id)
        else {
            return;
        };
        match session.kind {
            DragKind::ResizeStart => {
                let candidate = session.anchor_date + Duration::days(day_delta);
                if candidate <= item.end {
                    item.start = candidate;
                }
            }
            DragKind::ResizeEnd => {
                let candidate = session.anchor_date + Duration::days(day_delta);
                if candidate >= item.start {
                    item.end = candidate;
                }
            }
            DragKind::Move => {
                let duration = item.end - item.start;
                let new_start = session.anchor_date + Duration::days(day_delta);
                item.start = new_start;
                item.end = new_start + duration;
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn dragged_item(&self) -> Option<u64> {
        self.drag.as_ref().map(|session| session.item_id)
    }
}
