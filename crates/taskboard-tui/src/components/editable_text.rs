use crate::components::popup::cursor_column;
use crate::editable::{EditableField, StyleDescriptor};
use crate::theme::{editing_text, label_text};
use ratatui::{
    layout::Rect,
    text::Text,
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Draws a field in place. While editing, the input takes the look the
/// field captured on activation, so nothing around it moves.
pub fn render_editable(
    frame: &mut Frame,
    field: &mut EditableField,
    area: Rect,
    display: &StyleDescriptor,
    placeholder: &str,
) {
    field.set_area(area);

    if field.is_editing() {
        let descriptor = *field.style();
        let outer = descriptor.outer(area);
        let block = descriptor.block();
        let inner = block.inner(outer);
        let input = field.input();
        let style = if input.is_selected_all() {
            editing_text()
        } else {
            descriptor.style
        };
        let widget = Paragraph::new(Text::raw(input.as_str().to_string()))
            .style(style)
            .wrap(Wrap { trim: false })
            .block(block);
        frame.render_widget(widget, outer);

        let line = input.as_str()[..input.cursor_pos()].matches('\n').count() as u16;
        let x = (inner.x + cursor_column(input)).min(inner.right().saturating_sub(1));
        let y = (inner.y + line).min(inner.bottom().saturating_sub(1));
        frame.set_cursor_position((x, y));
        return;
    }

    let outer = display.outer(area);
    let (text, style) = if field.text().is_empty() {
        (placeholder.to_string(), label_text())
    } else {
        (field.text().to_string(), display.style)
    };
    let widget = Paragraph::new(Text::raw(text))
        .style(style)
        .wrap(Wrap { trim: false })
        .block(display.block());
    frame.render_widget(widget, outer);
}
