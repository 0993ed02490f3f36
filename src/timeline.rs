use crate::Message;
use crate::data::Item;
use chrono::{Duration, NaiveDate};
use iced::widget::canvas::Canvas;
use iced::widget::{column, container, scrollable, text};
use iced::{Color, Element, Length};
use std::collections::HashMap;

pub mod coords;
pub mod drag;
pub mod editor;
pub mod header;
pub mod items;
pub mod lanes;

pub use drag::{DragKind, DragSession};
pub use editor::EditSession;
pub use lanes::PositionedItem;

/// Width of one day column at scale 1.
pub const DAY_WIDTH: f32 = 30.0;
pub const LANE_HEIGHT: f32 = 50.0;
pub const HEADER_HEIGHT: f32 = 30.0;
/// Width of the resize grip zones at either end of an item bar.
pub const RESIZE_GRIP_WIDTH: f32 = 8.0;
/// Pointer travel before a press counts as a drag rather than a click.
pub const DRAG_THRESHOLD: f32 = 4.0;

const WINDOW_PADDING_DAYS: i64 = 2;

/// The visible date range: two days of padding around the earliest start and
/// latest end across all items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: i64,
}

/// A `total_days` of zero means there is no timeline to render; that is the
/// empty-set case, not an error.
pub fn date_window(items: &[Item]) -> DateWindow {
    let Some(first) = items.first() else {
        let today = chrono::Local::now().date_naive();
        return DateWindow {
            start: today,
            end: today,
            total_days: 0,
        };
    };

    let mut min = first.start;
    let mut max = first.end;
    for item in items {
        min = min.min(item.start);
        max = max.max(item.end);
    }

    let start = min - Duration::days(WINDOW_PADDING_DAYS);
    let end = max + Duration::days(WINDOW_PADDING_DAYS);
    DateWindow {
        start,
        end,
        total_days: (end - start).num_days(),
    }
}

pub fn color_from_name(name: &str) -> Color {
    let mut hash = 0u64;
    for c in name.chars() {
        hash = hash.wrapping_add(c as u64);
        hash = hash.wrapping_mul(0x517cc1b727220a95);
    }

    let r = ((hash >> 16) & 0xFF) as f32 / 255.0;
    let g = ((hash >> 8) & 0xFF) as f32 / 255.0;
    let b = (hash & 0xFF) as f32 / 255.0;

    Color::from_rgb(0.35 + r * 0.45, 0.35 + g * 0.45, 0.35 + b * 0.45)
}

/// Working state of the timeline: the mutable item copy, manual lane
/// overrides, the zoom scale, the viewport width reported by the rendering
/// layer, and the single-slot drag and rename sessions.
#[derive(Debug, Clone)]
pub struct TimelineState {
    items: Vec<Item>,
    manual_lanes: HashMap<u64, usize>,
    scale: f32,
    viewport_width: f32,
    drag: Option<DragSession>,
    editor: Option<EditSession>,
}

impl TimelineState {
    pub fn new(items: Vec<Item>) -> Self {
        TimelineState {
            items,
            manual_lanes: HashMap::new(),
            scale: 1.0,
            viewport_width: 0.0,
            drag: None,
            editor: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn zoom_in(&mut self) {
        self.scale = (self.scale * coords::ZOOM_STEP).min(coords::MAX_SCALE);
    }

    pub fn zoom_out(&mut self) {
        self.scale = (self.scale / coords::ZOOM_STEP).max(coords::MIN_SCALE);
    }

    /// Drops every manual lane override; the next layout pass reproduces the
    /// pure automatic assignment. Idempotent.
    pub fn reset_lanes(&mut self) {
        self.manual_lanes.clear();
    }

    pub fn manual_lanes(&self) -> &HashMap<u64, usize> {
        &self.manual_lanes
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    pub fn window(&self) -> DateWindow {
        date_window(&self.items)
    }

    /// Recomputed from scratch on every call; the layout is a pure function
    /// of the items, the overrides and the window.
    pub fn positioned_items(&self) -> Vec<PositionedItem> {
        lanes::assign_lanes(&self.items, &self.manual_lanes, &self.window())
    }

    pub fn max_lane(&self) -> usize {
        self.positioned_items()
            .iter()
            .map(|positioned| positioned.lane)
            .max()
            .unwrap_or(0)
    }
}

pub fn view(state: &TimelineState) -> Element<'_, Message> {
    let window = state.window();
    if window.total_days == 0 {
        return container(text("No items to display"))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let canvas_width = window.total_days as f32 * state.scale() * DAY_WIDTH;
    let lane_count = state.max_lane() + 2;

    let header = Canvas::new(header::HeaderProgram {
        window,
        scale: state.scale(),
    })
    .width(Length::Fixed(canvas_width))
    .height(Length::Fixed(HEADER_HEIGHT));

    let items_canvas = Canvas::new(items::ItemsProgram {
        items: state.positioned_items(),
        scale: state.scale(),
        lane_count,
        dragged: state.dragged_item(),
        editing: state.editing().map(|session| session.item_id),
    })
    .width(Length::Fixed(canvas_width))
    .height(Length::Fixed(lane_count as f32 * LANE_HEIGHT));

    scrollable(column![header, items_canvas])
        .direction(scrollable::Direction::Both {
            vertical: scrollable::Scrollbar::default(),
            horizontal: scrollable::Scrollbar::default(),
        })
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(id: u64, start: NaiveDate, end: NaiveDate) -> Item {
        Item {
            id,
            start,
            end,
            name: format!("Item {id}"),
        }
    }

    #[test]
    fn window_pads_two_days_on_each_side() {
        let items = vec![
            item(1, date(2021, 1, 3), date(2021, 1, 5)),
            item(2, date(2021, 1, 4), date(2021, 1, 10)),
        ];
        let window = date_window(&items);
        assert_eq!(window.start, date(2021, 1, 1));
        assert_eq!(window.end, date(2021, 1, 12));
        assert_eq!(window.total_days, 11);
    }

    #[test]
    fn empty_item_set_yields_a_zero_span_window() {
        let window = date_window(&[]);
        assert_eq!(window.total_days, 0);
        assert_eq!(window.start, window.end);
    }

    #[test]
    fn zoom_steps_multiplicatively_and_clamps() {
        let mut state = TimelineState::new(Vec::new());
        state.zoom_in();
        assert_eq!(state.scale(), 1.5);
        for _ in 0..10 {
            state.zoom_in();
        }
        assert_eq!(state.scale(), coords::MAX_SCALE);
        for _ in 0..20 {
            state.zoom_out();
        }
        assert_eq!(state.scale(), coords::MIN_SCALE);
    }

    #[test]
    fn layout_is_deterministic_and_idempotent() {
        let mut state = TimelineState::new(vec![
            item(1, date(2021, 1, 1), date(2021, 1, 10)),
            item(2, date(2021, 1, 5), date(2021, 1, 15)),
            item(3, date(2021, 1, 8), date(2021, 1, 20)),
        ]);
        state.manual_lanes.insert(3, 4);
        let first = state.positioned_items();
        let second = state.positioned_items();
        assert_eq!(first, second);
    }

    #[test]
    fn reset_lanes_is_idempotent_and_restores_automatic_layout() {
        let mut state = TimelineState::new(vec![
            item(1, date(2021, 1, 1), date(2021, 1, 10)),
            item(2, date(2021, 1, 5), date(2021, 1, 15)),
        ]);
        let automatic = state.positioned_items();

        state.manual_lanes.insert(2, 7);
        assert_ne!(state.positioned_items(), automatic);

        state.reset_lanes();
        assert_eq!(state.positioned_items(), automatic);
        state.reset_lanes();
        assert_eq!(state.positioned_items(), automatic);
    }
}
