use iced::widget::{Space, button, column, row, text, text_input};
use iced::{Alignment, Element, Length, Padding};

use super::{ButtonKind, button_style};
use crate::app::{App, Message};

impl App {
    /// Inputs for a new card. Enter in either field submits.
    pub fn view_add_form(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let can_submit = !self.viewer.is_busy();

        let front = text_input("Front", &self.new_front)
            .on_input(Message::FrontInputChanged)
            .on_submit(Message::AddCard)
            .padding(Padding::from([8, 12]))
            .size(13);

        let back = text_input("Back", &self.new_back)
            .on_input(Message::BackInputChanged)
            .on_submit(Message::AddCard)
            .padding(Padding::from([8, 12]))
            .size(13);

        column![
            text("NEW CARD").size(11).color(palette.text_secondary),
            Space::with_height(8),
            row![
                front,
                Space::with_width(8),
                back,
                Space::with_width(8),
                button(text("Add").size(13))
                    .padding(Padding::from([8, 20]))
                    .style(button_style(palette, ButtonKind::Primary))
                    .on_press_maybe(can_submit.then_some(Message::AddCard)),
            ]
            .align_y(Alignment::Center),
        ]
        .width(Length::Fill)
        .into()
    }
}
