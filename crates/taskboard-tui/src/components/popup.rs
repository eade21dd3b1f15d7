use crate::theme::{focused_border, highlight_text, label_text, normal_text, popup_bg};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use taskboard_core::InputState;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Column of the cursor in terminal cells, counting characters rather than
/// bytes.
pub fn cursor_column(input: &InputState) -> u16 {
    let text = input.as_str();
    let line_start = text[..input.cursor_pos()].rfind('\n').map(|i| i + 1).unwrap_or(0);
    text[line_start..input.cursor_pos()].chars().count() as u16
}

pub fn render_input_popup(frame: &mut Frame, title: &str, label: &str, input: &InputState) {
    let area = centered_rect(60, 30, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focused_border())
        .style(popup_bg());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(label).style(highlight_text()), chunks[0]);

    let field = Paragraph::new(input.as_str())
        .style(normal_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(field, chunks[1]);

    let hint = Paragraph::new("Enter: confirm  Esc: cancel").style(label_text());
    frame.render_widget(hint, chunks[2]);

    frame.set_cursor_position((chunks[1].x + cursor_column(input) + 1, chunks[1].y + 1));
}

pub fn render_confirm_popup(frame: &mut Frame, title: &str, message: &str) {
    let area = centered_rect(50, 20, frame.area());

    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focused_border())
        .style(popup_bg());

    let body = Paragraph::new(format!("{}\n\ny: confirm  n/Esc: cancel", message))
        .style(normal_text())
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(body, area);
}
