use super::colors::*;
use ratatui::style::{Color, Modifier, Style};
use taskboard_domain::{DueStatus, Tag};

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn inbox_border() -> Style {
    Style::default().fg(INBOX_BORDER)
}

pub fn selected_item(focused: bool) -> Style {
    if focused {
        Style::default().bg(SELECTED_BG)
    } else {
        Style::default()
    }
}

pub fn done_text() -> Style {
    Style::default()
        .fg(DONE_TEXT)
        .add_modifier(Modifier::CROSSED_OUT)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn highlight_text() -> Style {
    Style::default().fg(HIGHLIGHT_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn title_text() -> Style {
    Style::default()
        .fg(NORMAL_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn editing_text() -> Style {
    Style::default().bg(EDITING_BG).fg(NORMAL_TEXT)
}

pub fn due_style(status: DueStatus) -> Style {
    let color = match status {
        DueStatus::Expired => DUE_EXPIRED,
        DueStatus::DueSoon => DUE_SOON,
        DueStatus::OnTime => DUE_ON_TIME,
    };
    Style::default().fg(color)
}

/// Tag chip in the tag's own colour; tags with a malformed colour fall
/// back to the label colour.
pub fn tag_style(tag: &Tag) -> Style {
    match tag.rgb() {
        Some((r, g, b)) => Style::default().fg(Color::Rgb(r, g, b)),
        None => label_text(),
    }
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}

pub fn info_text() -> Style {
    Style::default().fg(INFO_COLOR)
}

pub fn popup_bg() -> Style {
    Style::default().bg(POPUP_BG)
}
