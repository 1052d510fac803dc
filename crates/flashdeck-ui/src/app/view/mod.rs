pub mod card;
pub mod form;
pub mod list;

use iced::widget::{Space, button, column, container, horizontal_space, mouse_area, row, stack, text};
use iced::{Background, Border, Color, Element, Length, Padding, Theme};

use crate::app::{App, Message};
use crate::theme::Palette;

/// Button flavours used across the views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Secondary,
    Danger,
}

/// Button style for the given flavour.
pub fn button_style(
    palette: Palette,
    kind: ButtonKind,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_: &Theme, status: button::Status| {
        let (bg, fg) = match (kind, status) {
            (_, button::Status::Disabled) => (palette.surface, palette.text_secondary),
            (ButtonKind::Primary, button::Status::Hovered) => (palette.accent_hover, Color::WHITE),
            (ButtonKind::Primary, _) => (palette.accent, Color::WHITE),
            (ButtonKind::Danger, button::Status::Hovered) => (palette.danger, Color::WHITE),
            (ButtonKind::Danger, _) => (palette.surface, palette.danger),
            (ButtonKind::Secondary, button::Status::Hovered) => (palette.surface_hover, palette.text_primary),
            (ButtonKind::Secondary, _) => (palette.surface, palette.text_primary),
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color: fg,
            border: Border {
                color: palette.border,
                width: if kind == ButtonKind::Primary { 0.0 } else { 1.0 },
                radius: 4.0.into(),
            },
            ..Default::default()
        }
    }
}

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let palette = self.palette;

        let content = column![
            row![self.view_card_list(), self.view_main_area()].height(Length::Fill),
            self.view_status_bar(),
        ];

        let main_view: Element<'_, Message> = container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(palette.background)),
                ..Default::default()
            })
            .into();

        match &self.notice {
            Some(_) => stack![
                main_view,
                mouse_area(
                    container(Space::new(Length::Fill, Length::Fill))
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .style(move |_| container::Style {
                            background: Some(Background::Color(palette.overlay)),
                            ..Default::default()
                        })
                )
                .on_press(Message::DismissNotice),
                self.view_notice_modal(),
            ]
            .into(),
            None => main_view,
        }
    }

    fn view_main_area(&self) -> Element<'_, Message> {
        column![
            self.view_card(),
            Space::with_height(16),
            self.view_navigation(),
            Space::with_height(24),
            self.view_add_form(),
        ]
        .padding(24)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn view_status_bar(&self) -> Element<'_, Message> {
        let palette = self.palette;

        let status_content = row![
            text(&self.status_message).size(12).color(palette.text_secondary),
            horizontal_space(),
            text(&self.shortcut_hint).size(11).color(palette.text_secondary),
            Space::with_width(24),
            text(&self.server_label).size(12).color(palette.text_secondary),
            Space::with_width(12),
        ]
        .padding(Padding::from([6, 12]));

        container(status_content)
            .width(Length::Fill)
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

    fn view_notice_modal(&self) -> Element<'_, Message> {
        let palette = self.palette;
        let (title, detail) = self
            .notice
            .as_ref()
            .map(|n| (n.title.as_str(), n.detail.as_str()))
            .unwrap_or_default();

        let modal_content = column![
            text(title).size(16).color(palette.text_primary),
            Space::with_height(12),
            text(detail).size(13).color(palette.text_secondary),
            Space::with_height(16),
            row![
                horizontal_space(),
                button(text("OK").size(13))
                    .padding(Padding::from([8, 20]))
                    .style(button_style(palette, ButtonKind::Primary))
                    .on_press(Message::DismissNotice),
            ],
        ]
        .padding(24)
        .width(Length::Fixed(380.0));

        container(
            container(modal_content).style(move |_| container::Style {
                background: Some(Background::Color(palette.surface)),
                border: Border {
                    color: palette.border,
                    width: 1.0,
                    radius: 8.0.into(),
                },
                ..Default::default()
            }),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
    }
}
