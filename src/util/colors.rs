use ratatui::style::Color;

pub const ACCENT: Color = Color::from_u32(0x0038bdf8);
pub const ACCENT_DIM: Color = Color::from_u32(0x000e7490);
pub const MUTED: Color = Color::from_u32(0x00525252);
pub const SURFACE: Color = Color::from_u32(0x00171717);
pub const TEXT: Color = Color::from_u32(0x00e5e5e5);
pub const ERROR: Color = Color::from_u32(0x00f87171);
