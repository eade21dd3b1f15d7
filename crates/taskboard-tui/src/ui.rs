use crate::app::{App, AppMode, ColumnRef, EditTarget, Screen};
use crate::components::*;
use crate::editable::StyleDescriptor;
use crate::login::{AuthField, AuthMode};
use crate::theme::*;
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};
use taskboard_domain::{due, tag_choices, Task};

pub fn render(app: &mut App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.area());

    match app.screen {
        Screen::Login => render_login(app, frame, chunks[0]),
        Screen::Dashboard => render_dashboard(app, frame, chunks[0]),
        Screen::Board => render_board(app, frame, chunks[0]),
        Screen::TaskDetail => render_task_detail(app, frame, chunks[0]),
    }
    render_footer(app, frame, chunks[1]);

    match app.mode {
        AppMode::CreateBoard => render_input_popup(frame, "New Board", "Board name:", &app.input),
        AppMode::CreateColumn => render_input_popup(frame, "New List", "List name:", &app.input),
        AppMode::CreateTask => render_input_popup(frame, "New Task", "Task name:", &app.input),
        AppMode::ConfirmDeleteTask => {
            render_confirm_popup(frame, "Delete Task", "Delete this task?")
        }
        AppMode::ConfirmDeleteColumn => render_confirm_popup(
            frame,
            "Delete List",
            "Delete this list and every task in it?",
        ),
        AppMode::Normal => {}
    }
}

/// How each editable field looks in its display state; the editor reuses it.
pub fn field_style(target: EditTarget) -> StyleDescriptor {
    match target {
        EditTarget::BoardName => StyleDescriptor::new(title_text())
            .with_borders(Borders::BOTTOM, BorderType::Plain)
            .with_margin(Margin::new(1, 0)),
        EditTarget::ColumnName(_) => StyleDescriptor::new(bold_highlight()),
        EditTarget::TaskName => StyleDescriptor::new(title_text())
            .with_borders(Borders::ALL, BorderType::Rounded)
            .with_padding(Padding::horizontal(1)),
        EditTarget::TaskDescription => StyleDescriptor::new(normal_text())
            .with_borders(Borders::ALL, BorderType::Rounded)
            .with_padding(Padding::horizontal(1)),
    }
}

fn render_login(app: &mut App, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(50, 60, area);
    let title = match app.login.mode {
        AuthMode::Login => " Log in ",
        AuthMode::Register => " Create account ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(focused_border());
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let fields = app.login.fields();
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(2));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(constraints)
        .split(inner);

    for (idx, field) in fields.iter().enumerate() {
        let focused = *field == app.login.focus;
        let label = match field {
            AuthField::Email => "Email",
            AuthField::Username => "Username",
            AuthField::Password => "Password",
        };
        let input = app.login.input(*field);
        let shown = if *field == AuthField::Password {
            "*".repeat(input.char_len())
        } else {
            input.as_str().to_string()
        };
        let border = if focused { focused_border() } else { unfocused_border() };
        let widget = Paragraph::new(shown).style(normal_text()).block(
            Block::default()
                .title(label)
                .borders(Borders::ALL)
                .border_style(border),
        );
        frame.render_widget(widget, rows[idx]);
        if focused {
            let column = if *field == AuthField::Password {
                input.as_str()[..input.cursor_pos()].chars().count() as u16
            } else {
                popup::cursor_column(input)
            };
            frame.set_cursor_position((rows[idx].x + column + 1, rows[idx].y + 1));
        }
    }

    let message = match (&app.login.error, &app.login.notice) {
        (Some(error), _) => Line::from(Span::styled(error.clone(), error_text())),
        (None, Some(notice)) => Line::from(Span::styled(notice.clone(), info_text())),
        (None, None) => Line::from(""),
    };
    frame.render_widget(
        Paragraph::new(message).wrap(Wrap { trim: true }),
        rows[fields.len()],
    );
}

fn render_dashboard(app: &mut App, frame: &mut Frame, area: Rect) {
    let username = app
        .auth
        .user()
        .map(|u| u.username.clone())
        .unwrap_or_default();
    let selected = app.board_selection.get();

    let items: Vec<ListItem> = app
        .directory
        .boards()
        .iter()
        .enumerate()
        .map(|(idx, board)| {
            let style = selected_item(selected == Some(idx));
            ListItem::new(Line::from(vec![
                Span::styled(board.name.clone(), normal_text()),
                Span::styled(format!("  /{}", board.slug()), label_text()),
            ]))
            .style(style)
        })
        .collect();

    let title = format!(" Boards of {} ", username);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focused_border());

    if items.is_empty() {
        let empty = Paragraph::new("No boards yet. Press n to create one.")
            .style(label_text())
            .block(block);
        frame.render_widget(empty, area);
    } else {
        frame.render_widget(List::new(items).block(block), area);
    }
}

fn render_board(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(workspace) = app.workspace.as_ref() else {
        return;
    };
    let board_name_area;
    {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);
        board_name_area = rows[0];

        let columns = app.visible_columns();
        if columns.is_empty() {
            frame.render_widget(
                Paragraph::new("This board has no lists. Press N to add one.").style(label_text()),
                rows[1],
            );
        }
        let constraints: Vec<Constraint> = columns
            .iter()
            .map(|_| Constraint::Ratio(1, columns.len().max(1) as u32))
            .collect();
        let areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[1]);

        let now = Utc::now();
        let mut name_areas = Vec::new();
        for (idx, column) in columns.iter().enumerate() {
            let focused = idx == app.column_focus;
            let session = workspace.session(column.inbox);
            let tasks = session.sorted_tasks(column.column_id);
            let done = tasks.iter().filter(|t| t.is_done).count();

            let border = if column.inbox {
                inbox_border()
            } else if focused {
                focused_border()
            } else {
                unfocused_border()
            };
            let title = if column.inbox {
                format!(" {} ", session.snapshot().name)
            } else {
                format!(" {}/{} ", done, tasks.len())
            };
            let block = Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(if focused { focused_border() } else { border });
            let inner = block.inner(areas[idx]);
            frame.render_widget(block, areas[idx]);

            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(inner);
            name_areas.push((*column, parts[0]));

            let selected = if focused { app.task_selection.get() } else { None };
            let items: Vec<ListItem> = tasks
                .iter()
                .enumerate()
                .map(|(i, task)| task_item(task, now).style(selected_item(selected == Some(i))))
                .collect();
            frame.render_widget(List::new(items), parts[1]);
        }

        for (column, name_area) in name_areas {
            render_column_name(app, frame, column, name_area);
        }
    }

    let style = field_style(EditTarget::BoardName);
    render_editable(frame, &mut app.fields.board_name, board_name_area, &style, "Untitled board");
}

fn render_column_name(app: &mut App, frame: &mut Frame, column: ColumnRef, area: Rect) {
    let style = field_style(EditTarget::ColumnName(column));
    if let Some(field) = app.fields.column_names.get_mut(&column) {
        render_editable(frame, field, area, &style, "Untitled list");
    }
}

fn task_item(task: &Task, now: chrono::DateTime<Utc>) -> ListItem<'static> {
    let check = if task.is_done { "[x] " } else { "[ ] " };
    let name_style = if task.is_done { done_text() } else { normal_text() };
    let mut spans = vec![
        Span::styled(check, label_text()),
        Span::styled(task.name.clone(), name_style),
    ];
    for tag in &task.tags {
        spans.push(Span::styled(format!(" #{}", tag.label()), tag_style(tag)));
    }
    if let (Some(status), Some(due_at)) = (task.due_status(now), task.due_at()) {
        spans.push(Span::styled(
            format!("  {}", due::display(due_at)),
            due_style(status),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn render_task_detail(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(task) = app.detail_task().cloned() else {
        return;
    };
    let Some(detail) = app.detail else {
        return;
    };
    let choices = app
        .workspace
        .as_ref()
        .map(|w| tag_choices(w.session(detail.column.inbox).snapshot(), &task))
        .unwrap_or_default();

    let block = Block::default()
        .title(" Task ")
        .borders(Borders::ALL)
        .border_style(focused_border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let tag_rows = (choices.len() as u16).max(1) + 1;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(tag_rows),
            Constraint::Min(3),
        ])
        .split(inner);

    let name_style = field_style(EditTarget::TaskName);
    render_editable(frame, &mut app.fields.task_name, rows[0], &name_style, "Untitled task");

    let now = Utc::now();
    let mut meta = vec![
        Span::styled("List: ", label_text()),
        Span::styled(task.list_name().to_string(), normal_text()),
        Span::styled("   Done: ", label_text()),
        Span::styled(if task.is_done { "yes" } else { "no" }, normal_text()),
        Span::styled("   Due: ", label_text()),
    ];
    match task.due_at() {
        Some(due_at) => {
            let style = task.due_status(now).map(due_style).unwrap_or_else(normal_text);
            meta.push(Span::styled(due::display(due_at), style));
            if let Some(status) = task.due_status(now) {
                meta.push(Span::styled(format!(" ({})", status.label()), due_style(status)));
            }
        }
        None => meta.push(Span::styled("none", label_text())),
    }
    frame.render_widget(Paragraph::new(Line::from(meta)), rows[1]);

    let mut tag_lines = vec![Line::from(Span::styled("Tags", label_text()))];
    if choices.is_empty() {
        tag_lines.push(Line::from(Span::styled("  This board has no tags", label_text())));
    }
    for (idx, choice) in choices.iter().enumerate() {
        let mark = if choice.checked { "[x]" } else { "[ ]" };
        tag_lines.push(Line::from(vec![
            Span::styled(format!("  {} {} ", idx + 1, mark), label_text()),
            Span::styled(choice.tag.label().to_string(), tag_style(&choice.tag)),
        ]));
    }
    frame.render_widget(Paragraph::new(tag_lines), rows[2]);

    let description_style = field_style(EditTarget::TaskDescription);
    render_editable(
        frame,
        &mut app.fields.task_description,
        rows[3],
        &description_style,
        "No description",
    );
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(status) = &app.status {
        let style = if status.is_error { error_text() } else { info_text() };
        let widget = Paragraph::new(status.text.clone())
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(widget, area);
        return;
    }

    let help = if app.fields.editing().is_some() {
        "Enter/Esc/click outside: save  Alt+Enter: newline"
    } else {
        match app.screen {
            Screen::Login => "Tab: next field  Enter: submit  Ctrl+R: login/register  Esc: quit",
            Screen::Dashboard => "j/k: navigate  Enter: open  n: new board  g: refresh  L: log out  q: quit",
            Screen::Board => {
                "h/l: list  j/k: task  n: task  N: list  r: rename list  R: rename board  x: done  d/D: delete  Enter: open  Esc: back"
            }
            Screen::TaskDetail => {
                "e: name  E: description  x: done  t: tomorrow  w: next week  c: clear due  1-9: tags  d: delete  Esc: back"
            }
        }
    };
    let widget = Paragraph::new(help)
        .style(label_text())
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}
