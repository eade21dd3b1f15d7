use ratatui::style::Color;

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const INBOX_BORDER: Color = Color::Magenta;
pub const SELECTED_BG: Color = Color::Blue;

pub const DONE_TEXT: Color = Color::DarkGray;
pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;

pub const DUE_EXPIRED: Color = Color::Red;
pub const DUE_SOON: Color = Color::Yellow;
pub const DUE_ON_TIME: Color = Color::Green;

pub const EDITING_BG: Color = Color::DarkGray;
pub const POPUP_BG: Color = Color::Black;
pub const ERROR_COLOR: Color = Color::Red;
pub const INFO_COLOR: Color = Color::Green;
