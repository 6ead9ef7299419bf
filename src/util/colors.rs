use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00c084fc);
pub const SECONDARY: Color = Color::from_u32(0x009333ea);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const BACKGROUND: Color = Color::from_u32(0x000d0d0d);
pub const ACCENT: Color = Color::from_u32(0x00e9d5ff);
pub const ERROR: Color = Color::from_u32(0x00fca5a5);
