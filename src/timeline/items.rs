use crate::Message;
use iced::mouse;
use iced::widget::canvas::{self, Action, Geometry, Program};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};
use std::time::{Duration, Instant};

use super::{
    DRAG_THRESHOLD, DragKind, LANE_HEIGHT, PositionedItem, RESIZE_GRIP_WIDTH, color_from_name,
    coords,
};

const BAR_INSET: f32 = 5.0;

pub struct ItemsProgram {
    pub items: Vec<PositionedItem>,
    pub scale: f32,
    pub lane_count: usize,
    pub dragged: Option<u64>,
    pub editing: Option<u64>,
}

#[derive(Default)]
pub struct ItemsState {
    press_position: Option<Point>,
    pressed_item: Option<u64>,
    dragging: bool,
    last_click: Option<(u64, Instant)>,
}

fn bar_rect(positioned: &PositionedItem, scale: f32) -> Rectangle {
    Rectangle {
        x: coords::offset_to_x(positioned.start_offset_days, scale),
        y: coords::lane_to_y(positioned.lane) + BAR_INSET,
        width: coords::days_to_width(positioned.width_days, scale).max(1.0),
        height: LANE_HEIGHT - 2.0 * BAR_INSET,
    }
}

fn draw_item_bar(frame: &mut canvas::Frame, positioned: &PositionedItem, rect: Rectangle) {
    frame.fill_rectangle(rect.position(), rect.size(), color_from_name(&positioned.item.name));

    frame.stroke(
        &canvas::Path::rectangle(rect.position(), rect.size()),
        canvas::Stroke::default()
            .with_color(Color::from_rgba(0.0, 0.0, 0.0, 0.25))
            .with_width(1.0),
    );

    // Grip zones at both ends of the bar.
    let grip = RESIZE_GRIP_WIDTH.min(rect.width / 3.0);
    let grip_color = Color::from_rgba(0.0, 0.0, 0.0, 0.18);
    frame.fill_rectangle(rect.position(), Size::new(grip, rect.height), grip_color);
    frame.fill_rectangle(
        Point::new(rect.x + rect.width - grip, rect.y),
        Size::new(grip, rect.height),
        grip_color,
    );

    if rect.width > 40.0 {
        // Rely on the clip region to crop long names at the bar boundary.
        frame.with_clip(
            Rectangle {
                x: rect.x + grip + 1.0,
                y: rect.y + 1.0,
                width: rect.width - 2.0 * grip - 2.0,
                height: rect.height - 2.0,
            },
            |frame| {
                frame.fill_text(canvas::Text {
                    content: positioned.item.name.clone(),
                    position: Point::new(rect.x + grip + 2.0, rect.y + 3.0),
                    color: Color::from_rgb(0.1, 0.1, 0.1),
                    size: 13.0.into(),
                    ..Default::default()
                });
                frame.fill_text(canvas::Text {
                    content: format!("{} - {}", positioned.item.start, positioned.item.end),
                    position: Point::new(rect.x + grip + 2.0, rect.y + 20.0),
                    color: Color::from_rgba(0.1, 0.1, 0.1, 0.7),
                    size: 10.0.into(),
                    ..Default::default()
                });
            },
        );
    }
}

impl ItemsProgram {
    /// The item under the pointer and the grip it was hit on. The edge zones
    /// resize the start or end date; anywhere in between moves the whole bar.
    fn find_grip_at(&self, position: Point) -> Option<(u64, DragKind)> {
        for positioned in &self.items {
            let rect = bar_rect(positioned, self.scale);
            if !rect.contains(position) {
                continue;
            }
            let grip = RESIZE_GRIP_WIDTH.min(rect.width / 3.0);
            let kind = if position.x <= rect.x + grip {
                DragKind::ResizeStart
            } else if position.x >= rect.x + rect.width - grip {
                DragKind::ResizeEnd
            } else {
                DragKind::Move
            };
            return Some((positioned.item.id, kind));
        }
        None
    }
}

impl Program<Message> for ItemsProgram {
    type State = ItemsState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        // Lane guides.
        for lane in 0..=self.lane_count {
            let y = coords::lane_to_y(lane);
            frame.stroke(
                &canvas::Path::line(Point::new(0.0, y), Point::new(bounds.width, y)),
                canvas::Stroke::default()
                    .with_color(Color::from_rgb(0.9, 0.9, 0.9))
                    .with_width(1.0),
            );
        }

        for positioned in &self.items {
            draw_item_bar(&mut frame, positioned, bar_rect(positioned, self.scale));
        }

        // The active gesture's bar gets a highlight border on top.
        if let Some(dragged) = self.dragged {
            if let Some(positioned) = self.items.iter().find(|p| p.item.id == dragged) {
                let rect = bar_rect(positioned, self.scale);
                frame.stroke(
                    &canvas::Path::rectangle(rect.position(), rect.size()),
                    canvas::Stroke::default()
                        .with_color(Color::from_rgb(0.0, 0.4, 0.8))
                        .with_width(2.0),
                );
            }
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    match self.find_grip_at(position) {
                        Some((id, grip)) => {
                            state.press_position = cursor.position();
                            state.pressed_item = (grip == DragKind::Move).then_some(id);
                            state.dragging = false;
                            return Some(
                                Action::publish(Message::ItemPressed {
                                    id,
                                    grip,
                                    x: position.x,
                                    y: position.y,
                                    width: bounds.width,
                                })
                                .and_capture(),
                            );
                        }
                        None => {
                            // Pressing empty timeline is the "loss of focus"
                            // path for an open rename.
                            if self.editing.is_some() {
                                return Some(Action::publish(Message::BackgroundPressed));
                            }
                        }
                    }
                }
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if let Some(press_position) = state.press_position {
                    let delta = *position - press_position;
                    if !state.dragging && delta.x.hypot(delta.y) > DRAG_THRESHOLD {
                        state.dragging = true;
                    }
                }
                if self.dragged.is_some() {
                    if let Some(position) = cursor.position_in(bounds) {
                        return Some(Action::publish(Message::PointerMoved {
                            x: position.x,
                            y: position.y,
                            width: bounds.width,
                        }));
                    }
                }
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let was_click = !state.dragging;
                let pressed = state.pressed_item;
                state.press_position = None;
                state.pressed_item = None;
                state.dragging = false;

                if was_click {
                    if let (Some(pressed), Some(position)) = (pressed, cursor.position_in(bounds))
                    {
                        if let Some((id, DragKind::Move)) = self.find_grip_at(position) {
                            if id == pressed {
                                let now = Instant::now();
                                if let Some((last_id, last_time)) = state.last_click {
                                    if last_id == id
                                        && now.duration_since(last_time)
                                            <= Duration::from_millis(400)
                                    {
                                        state.last_click = None;
                                        return Some(Action::publish(
                                            Message::ItemDoubleClicked(id),
                                        ));
                                    }
                                }
                                state.last_click = Some((id, now));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
        None
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.dragged.is_some() {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        match self.find_grip_at(position) {
            Some((_, DragKind::ResizeStart | DragKind::ResizeEnd)) => {
                mouse::Interaction::ResizingHorizontally
            }
            Some((_, DragKind::Move)) => mouse::Interaction::Grab,
            None => mouse::Interaction::default(),
        }
    }
}
