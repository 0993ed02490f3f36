use crate::Message;
use chrono::{Datelike, Duration};
use iced::mouse;
use iced::widget::canvas::{self, Geometry, Program};
use iced::{Color, Point, Rectangle, Renderer, Size, Theme};

use super::{DAY_WIDTH, DateWindow};

pub struct HeaderProgram {
    pub window: DateWindow,
    pub scale: f32,
}

impl Program<Message> for HeaderProgram {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        frame.fill_rectangle(
            Point::new(0.0, 0.0),
            Size::new(bounds.width, bounds.height),
            Color::from_rgb(0.95, 0.95, 0.95),
        );

        if self.window.total_days == 0 {
            return vec![frame.into_geometry()];
        }

        let day_width = self.scale * DAY_WIDTH;

        for day in 0..=self.window.total_days {
            let x = day as f32 * day_width;
            if x > bounds.width {
                break;
            }

            let date = self.window.start + Duration::days(day);

            // First-of-month ticks stand out against the ordinary day grid.
            let (tick_color, tick_width) = if date.day() == 1 {
                (Color::from_rgb(0.35, 0.35, 0.35), 1.0)
            } else {
                (Color::from_rgb(0.75, 0.75, 0.75), 0.5)
            };
            frame.stroke(
                &canvas::Path::line(Point::new(x, 0.0), Point::new(x, bounds.height)),
                canvas::Stroke::default()
                    .with_color(tick_color)
                    .with_width(tick_width),
            );

            // Labels only fit on every other column.
            if day % 2 == 0 {
                frame.fill_text(canvas::Text {
                    content: date.format("%b %-d").to_string(),
                    position: Point::new(x + 3.0, 8.0),
                    color: Color::from_rgb(0.25, 0.25, 0.25),
                    size: 11.0.into(),
                    ..Default::default()
                });
            }
        }

        frame.stroke(
            &canvas::Path::line(
                Point::new(0.0, bounds.height - 0.5),
                Point::new(bounds.width, bounds.height - 0.5),
            ),
            canvas::Stroke::default()
                .with_color(Color::from_rgb(0.8, 0.8, 0.8))
                .with_width(1.0),
        );

        vec![frame.into_geometry()]
    }
}
