use iced::widget::{Column, Space, button, column, container, scrollable, text};
use iced::{Background, Border, Element, Length, Padding, Theme};

use crate::app::{App, Message};

impl App {
    /// Sidebar listing every card; the current one is highlighted.
    pub fn view_card_list(&self) -> Element<'_, Message> {
        let palette = self.palette;

        let header = text(format!("CARDS ({})", self.frame.entries.len()))
            .size(11)
            .color(palette.text_secondary);

        let entries: Column<'_, Message> = self
            .frame
            .entries
            .iter()
            .fold(Column::new().spacing(2), |list, entry| {
                let current = entry.current;
                list.push(
                    button(text(&entry.label).size(13))
                        .width(Length::Fill)
                        .padding(Padding::from([6, 10]))
                        .style(move |_: &Theme, status: button::Status| {
                            let bg = match (current, status) {
                                (true, _) => palette.accent,
                                (false, button::Status::Hovered) => palette.surface_hover,
                                (false, _) => palette.surface,
                            };
                            button::Style {
                                background: Some(Background::Color(bg)),
                                text_color: if current {
                                    iced::Color::WHITE
                                } else {
                                    palette.text_primary
                                },
                                border: Border {
                                    radius: 4.0.into(),
                                    ..Default::default()
                                },
                                ..Default::default()
                            }
                        })
                        .on_press(Message::Select(entry.position)),
                )
            });

        let content = column![
            header,
            Space::with_height(8),
            scrollable(entries).height(Length::Fill),
        ]
        .padding(12);

        container(content)
            .width(Length::Fixed(240.0))
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.surface)),
                border: Border {
                    color: palette.border,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}
