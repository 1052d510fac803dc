use iced::widget::{Space, button, column, container, horizontal_space, mouse_area, row, text};
use iced::{Alignment, Background, Border, Element, Length, Padding};

use super::{ButtonKind, button_style};
use crate::app::{App, Message};

impl App {
    /// The current card. Clicking it flips.
    pub fn view_card(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let flipped = self.frame.flipped;
        let empty = self.frame.is_empty();

        let front_color = if empty {
            palette.text_secondary
        } else {
            palette.text_primary
        };

        let mut faces = column![text(&self.frame.front).size(self.font_size).color(front_color)]
            .align_x(Alignment::Center);

        if let Some(back) = &self.frame.back {
            faces = faces.push(Space::with_height(16)).push(
                text(back)
                    .size(self.font_size * 0.8)
                    .color(palette.accent),
            );
        }

        let hint = match (empty, flipped) {
            (true, _) => "Add a card below to get started",
            (false, true) => "Click to hide the answer",
            (false, false) => "Click to show the answer",
        };
        let faces = faces
            .push(Space::with_height(24))
            .push(text(hint).size(11).color(palette.text_secondary));

        let card = container(faces)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .padding(24)
            .style(move |_| container::Style {
                background: Some(Background::Color(if flipped {
                    palette.card_flipped
                } else {
                    palette.card
                })),
                border: Border {
                    color: palette.border,
                    width: 1.0,
                    radius: 8.0.into(),
                },
                ..Default::default()
            });

        mouse_area(card).on_press(Message::Flip).into()
    }

    pub fn view_navigation(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let has_cards = !self.frame.is_empty();
        let idle = !self.viewer.is_busy();

        let nav_button = |label: &'static str, kind: ButtonKind, message: Message, enabled: bool| {
            button(text(label).size(13))
                .padding(Padding::from([8, 16]))
                .style(button_style(palette, kind))
                .on_press_maybe(enabled.then_some(message))
        };

        let flip_label = if self.frame.flipped { "Hide" } else { "Flip" };

        row![
            nav_button("Previous", ButtonKind::Secondary, Message::Prev, has_cards),
            Space::with_width(8),
            nav_button(flip_label, ButtonKind::Primary, Message::Flip, has_cards),
            Space::with_width(8),
            nav_button("Next", ButtonKind::Secondary, Message::Next, has_cards),
            horizontal_space(),
            nav_button("Reload", ButtonKind::Secondary, Message::Reload, idle),
            Space::with_width(8),
            nav_button("Delete", ButtonKind::Danger, Message::DeleteCard, has_cards && idle),
        ]
        .align_y(Alignment::Center)
        .into()
    }
}
