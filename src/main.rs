use iced::widget::{Space, button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length, Subscription, Task};

mod data;
mod timeline;
mod ui;

use timeline::DragKind;

pub fn main() -> iced::Result {
    // Resolve and validate the item set before the UI starts, so a bad
    // document fails with a clear error instead of an undefined layout.
    let items = match data::load_items() {
        Ok(items) => items,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    iced::application(
        move || Laneline::new(items.clone()),
        Laneline::update,
        Laneline::view,
    )
    .title(Laneline::title)
    .subscription(Laneline::subscription)
    .run()
}

#[derive(Debug, Clone)]
enum Message {
    ZoomIn,
    ZoomOut,
    ResetLanes,
    ItemPressed {
        id: u64,
        grip: DragKind,
        x: f32,
        y: f32,
        width: f32,
    },
    PointerMoved {
        x: f32,
        y: f32,
        width: f32,
    },
    PointerReleased,
    BackgroundPressed,
    ItemDoubleClicked(u64),
    RenameEdited(String),
    RenameSubmitted,
    RenameCancelled,
}

struct Laneline {
    timeline: timeline::TimelineState,
}

impl Laneline {
    fn new(items: Vec<data::Item>) -> (Self, Task<Message>) {
        (
            Laneline {
                timeline: timeline::TimelineState::new(items),
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        format!("Laneline - {} items", self.timeline.items().len())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ZoomIn => self.timeline.zoom_in(),
            Message::ZoomOut => self.timeline.zoom_out(),
            Message::ResetLanes => self.timeline.reset_lanes(),
            Message::ItemPressed { id, grip, x, y, width } => {
                self.timeline.set_viewport_width(width);
                // Grabbing a bar takes focus away from an open rename.
                self.timeline.commit_rename();
                self.timeline.begin_drag(id, grip, x, y);
            }
            Message::PointerMoved { x, y, width } => {
                self.timeline.set_viewport_width(width);
                self.timeline.drag_moved(x, y);
            }
            Message::PointerReleased => self.timeline.end_drag(),
            Message::BackgroundPressed => self.timeline.commit_rename(),
            Message::ItemDoubleClicked(id) => {
                self.timeline.end_drag();
                self.timeline.begin_rename(id);
            }
            Message::RenameEdited(value) => self.timeline.rename_edited(value),
            Message::RenameSubmitted => self.timeline.commit_rename(),
            Message::RenameCancelled => self.timeline.cancel_rename(),
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let controls = row![
            button("Zoom In")
                .on_press(Message::ZoomIn)
                .style(ui::neutral_button_style),
            button("Zoom Out")
                .on_press(Message::ZoomOut)
                .style(ui::neutral_button_style),
            button("Reset Lanes")
                .on_press(Message::ResetLanes)
                .style(ui::neutral_button_style),
            Space::new().width(Length::Fill),
            text(format!("{:.2}x", self.timeline.scale())).size(14),
        ]
        .spacing(10)
        .padding(5)
        .align_y(Alignment::Center);

        let rename_panel: Element<'_, Message> = if let Some(session) = self.timeline.editing() {
            container(
                column![
                    text("Rename item (Enter to apply, Escape to discard)").size(12),
                    text_input("Item name", &session.buffer)
                        .on_input(Message::RenameEdited)
                        .on_submit(Message::RenameSubmitted),
                ]
                .spacing(5)
                .padding(10),
            )
            .width(Length::Fill)
            .height(Length::Fixed(80.0))
            .into()
        } else {
            container(
                text("Drag a bar to move it, its edges to resize it, double-click to rename it")
                    .size(12),
            )
            .width(Length::Fill)
            .height(Length::Fixed(80.0))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
        };

        column![controls, timeline::view(&self.timeline), rename_panel].into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = Vec::new();

        // A gesture must end even when the pointer is released outside the
        // timeline, so a release listener spans the whole window for exactly
        // as long as a drag session is alive.
        if self.timeline.is_dragging() {
            subscriptions.push(iced::event::listen_with(on_pointer_released));
        }
        if self.timeline.editing().is_some() {
            subscriptions.push(iced::event::listen_with(on_escape_pressed));
        }

        Subscription::batch(subscriptions)
    }
}

fn on_pointer_released(
    event: iced::Event,
    _status: iced::event::Status,
    _window: iced::window::Id,
) -> Option<Message> {
    match event {
        iced::Event::Mouse(iced::mouse::Event::ButtonReleased(iced::mouse::Button::Left)) => {
            Some(Message::PointerReleased)
        }
        _ => None,
    }
}

fn on_escape_pressed(
    event: iced::Event,
    _status: iced::event::Status,
    _window: iced::window::Id,
) -> Option<Message> {
    match event {
        iced::Event::Keyboard(iced::keyboard::Event::KeyPressed {
            key: iced::keyboard::Key::Named(iced::keyboard::key::Named::Escape),
            ..
        }) => Some(Message::RenameCancelled),
        _ => None,
    }
}
