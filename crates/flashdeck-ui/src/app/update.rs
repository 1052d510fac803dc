use std::sync::Arc;

use flashdeck_core::session::run_effect;
use flashdeck_core::{Action, Completion, Effect, Key, KeyPress, Modifiers, NewCard, ViewerError};
use iced::{Task, keyboard};

use super::{App, Message, Notice};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::Next => self.apply(Action::Next),
            Message::Prev => self.apply(Action::Prev),
            Message::Flip => self.apply(Action::Flip),
            Message::Select(index) => self.apply(Action::Select(index)),
            Message::Reload => self.apply(Action::Load),
            Message::DeleteCard => self.apply(Action::Delete),

            Message::AddCard => {
                let card = NewCard::new(&self.new_front, &self.new_back);
                self.apply(Action::Add(card))
            }

            Message::Completed(completion) => self.finish(completion),

            Message::FrontInputChanged(value) => {
                self.new_front = value;
                Task::none()
            }

            Message::BackInputChanged(value) => {
                self.new_back = value;
                Task::none()
            }

            Message::KeyPressed(key, modifiers) => self.handle_key_pressed(key, modifiers),

            Message::DismissNotice => {
                self.notice = None;
                Task::none()
            }
        };

        self.frame = self.viewer.frame();
        task
    }

    /// Dispatches an action and starts whatever request it asks for.
    pub(crate) fn apply(&mut self, action: Action) -> Task<Message> {
        let name = action.display_name().to_string();

        match self.viewer.dispatch(action) {
            Ok(Some(effect)) => {
                self.status_message = match &effect {
                    Effect::Fetch => "Loading cards...".to_string(),
                    Effect::Create(_) => "Adding card...".to_string(),
                    Effect::Remove(_) => "Deleting card...".to_string(),
                };
                self.perform(effect)
            }
            Ok(None) => Task::none(),
            Err(ViewerError::Busy) => {
                self.status_message = format!("{name}: still waiting for the server");
                Task::none()
            }
            Err(e) => {
                let title = if e.is_validation() {
                    "Card not added".to_string()
                } else {
                    format!("{name} failed")
                };
                self.notice = Some(Notice {
                    title,
                    detail: e.to_string(),
                });
                Task::none()
            }
        }
    }

    fn perform(&self, effect: Effect) -> Task<Message> {
        let service = Arc::clone(&self.service);
        Task::perform(
            async move { run_effect(service.as_ref(), effect).await },
            Message::Completed,
        )
    }

    fn finish(&mut self, completion: Completion) -> Task<Message> {
        let added = matches!(completion, Completion::Created(Ok(())));
        let failure = match &completion {
            Completion::Fetched(Err(_)) => Some(("Could not load cards", false)),
            Completion::Created(Err(_)) => Some(("Could not add card", true)),
            Completion::Removed(Err(_)) => Some(("Could not delete card", true)),
            _ => None,
        };

        match self.viewer.complete(completion) {
            Ok(Some(effect)) => {
                if added {
                    self.new_front.clear();
                    self.new_back.clear();
                }
                self.perform(effect)
            }
            Ok(None) => {
                self.status_message = match self.viewer.deck().len() {
                    1 => "1 card".to_string(),
                    n => format!("{n} cards"),
                };
                Task::none()
            }
            Err(e) => {
                let (title, interrupt) = failure.unwrap_or(("Request failed", true));
                // A failed load keeps the old deck on screen.
                if interrupt {
                    self.status_message = title.to_string();
                    self.notice = Some(Notice {
                        title: title.to_string(),
                        detail: e.to_string(),
                    });
                } else {
                    self.status_message = format!("{title}: {e}");
                }
                Task::none()
            }
        }
    }

    pub fn handle_key_pressed(&mut self, key: keyboard::Key, modifiers: keyboard::Modifiers) -> Task<Message> {
        if self.notice.is_some() {
            use keyboard::key::Named;
            if matches!(key, keyboard::Key::Named(Named::Escape | Named::Enter)) {
                self.notice = None;
            }
            return Task::none();
        }

        let Some(press) = key_press(&key, modifiers) else {
            return Task::none();
        };

        match self.keymap.lookup(&press) {
            Some(action) => {
                tracing::trace!(key = %press, action = action.display_name(), "Key binding");
                self.apply(action)
            }
            None => Task::none(),
        }
    }
}

/// Converts an iced key event into the keymap's representation.
pub(crate) fn key_press(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> Option<KeyPress> {
    use iced::keyboard::key::Named;

    let key = match key {
        keyboard::Key::Named(named) => match named {
            Named::ArrowRight => Key::Right,
            Named::ArrowLeft => Key::Left,
            Named::ArrowUp => Key::Up,
            Named::ArrowDown => Key::Down,
            Named::Home => Key::Home,
            Named::End => Key::End,
            Named::Enter => Key::Enter,
            Named::Delete => Key::Delete,
            Named::Backspace => Key::Backspace,
            Named::Escape => Key::Escape,
            Named::Space => Key::Space,
            Named::F1 => Key::F(1),
            Named::F2 => Key::F(2),
            Named::F3 => Key::F(3),
            Named::F4 => Key::F(4),
            Named::F5 => Key::F(5),
            Named::F6 => Key::F(6),
            Named::F7 => Key::F(7),
            Named::F8 => Key::F(8),
            Named::F9 => Key::F(9),
            Named::F10 => Key::F(10),
            Named::F11 => Key::F(11),
            Named::F12 => Key::F(12),
            _ => return None,
        },
        keyboard::Key::Character(c) => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(' '), None) => Key::Space,
                (Some(ch), None) => Key::Char(ch.to_lowercase().next().unwrap_or(ch)),
                _ => return None,
            }
        }
        keyboard::Key::Unidentified => return None,
    };

    Some(KeyPress::new(
        key,
        Modifiers {
            ctrl: modifiers.control(),
            alt: modifiers.alt(),
            shift: modifiers.shift(),
            meta: modifiers.logo(),
        },
    ))
}
