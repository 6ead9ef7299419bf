#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    // User Input
    Quit,
    Input(char),
    Paste(String),
    Backspace,
    ClearInput,
    Submit,
    Reset,

    // Navigation
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
}
