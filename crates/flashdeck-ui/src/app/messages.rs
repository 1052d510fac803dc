use flashdeck_core::Completion;
use iced::keyboard;

#[derive(Debug, Clone)]
pub enum Message {
    // Navigation
    Next,
    Prev,
    Flip,
    Select(usize),

    // Remote operations
    Reload,
    AddCard,
    DeleteCard,
    Completed(Completion),

    // Add-card inputs
    FrontInputChanged(String),
    BackInputChanged(String),

    // Keyboard
    KeyPressed(keyboard::Key, keyboard::Modifiers),

    // Error modal
    DismissNotice,
}
