use crate::ui::message::AppMessage;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('r'), KeyModifiers::CONTROL) => Some(AppMessage::Reset),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(AppMessage::ClearInput),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                Some(AppMessage::Input(c))
            }
            (KeyCode::Enter, _) => Some(AppMessage::Submit),
            (KeyCode::Backspace, _) => Some(AppMessage::Backspace),
            (KeyCode::Up, _) => Some(AppMessage::ScrollUp),
            (KeyCode::Down, _) => Some(AppMessage::ScrollDown),
            (KeyCode::PageUp, _) => Some(AppMessage::PageUp),
            (KeyCode::PageDown, _) => Some(AppMessage::PageDown),
            _ => None,
        }
    }
}
