use std::sync::Arc;

use flashdeck_core::config::ThemeChoice;
use flashdeck_core::{Action, CardService, Config, Frame, Keymap, Viewer};
use iced::{Size, Subscription, Task, keyboard};

use crate::theme::Palette;

pub mod messages;
pub mod update;
pub mod view;

pub use messages::*;

/// Everything the window needs at startup.
#[derive(Clone)]
pub struct Flags {
    pub config: Config,
    pub service: Arc<dyn CardService>,
}

/// A failure the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub detail: String,
}

pub struct App {
    pub viewer: Viewer,
    /// Rebuilt after every update; the views only read this
    pub frame: Frame,
    pub service: Arc<dyn CardService>,
    pub keymap: Keymap,
    pub new_front: String,
    pub new_back: String,
    pub notice: Option<Notice>,
    pub status_message: String,
    pub theme: ThemeChoice,
    pub palette: Palette,
    pub font_size: f32,
    pub server_label: String,
    /// One-line summary of the key bindings
    pub shortcut_hint: String,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags { config, service } = flags;

        let viewer = Viewer::new().with_placeholder(config.ui.placeholder.clone());
        let keymap = Keymap::from_config(&config);
        let mut app = Self {
            frame: viewer.frame(),
            viewer,
            service,
            shortcut_hint: shortcut_hint(&keymap),
            keymap,
            new_front: String::new(),
            new_back: String::new(),
            notice: None,
            status_message: "Loading cards...".to_string(),
            theme: config.ui.theme,
            palette: Palette::for_choice(config.ui.theme),
            font_size: config.ui.font_size,
            server_label: config.server.base_url.clone(),
        };

        let task = app.apply(Action::Load);
        (app, task)
    }

    pub fn title(&self) -> String {
        match self.frame.current_entry() {
            Some(entry) => format!(
                "Card {} of {} - Flashdeck",
                entry.position + 1,
                self.frame.entries.len()
            ),
            None => "Flashdeck".to_string(),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers)))
    }

    pub fn iced_theme(&self) -> iced::Theme {
        Palette::iced_theme(self.theme)
    }
}

/// `"Left: Previous  Right: Next ..."`, one entry per binding.
fn shortcut_hint(keymap: &Keymap) -> String {
    keymap
        .describe()
        .into_iter()
        .map(|(key, action)| format!("{key}: {action}"))
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn run(flags: Flags) -> iced::Result {
    let window = Size::new(flags.config.ui.window_width, flags.config.ui.window_height);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(window)
        .theme(App::iced_theme)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
