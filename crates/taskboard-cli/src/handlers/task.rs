use chrono::{DateTime, NaiveDate, Utc};
use taskboard_client::BoardSession;
use taskboard_core::TaskboardError;
use taskboard_domain::due::parse_due_date;
use taskboard_domain::tag::toggled_tag_ids_many;
use taskboard_domain::{ColumnId, FieldUpdate, TaskId, TaskUpdate};

use crate::cli::{TaskAction, TaskUpdateArgs};
use crate::context::CliContext;
use crate::output;

fn task_output(session: &BoardSession, column_id: ColumnId, task_id: TaskId) {
    match session.snapshot().task(column_id, task_id) {
        Some(task) => output::output_success(task),
        None => output::output_error(&format!("Task not found: {}", task_id)),
    }
}

fn ensure_task(session: &BoardSession, column_id: ColumnId, task_id: TaskId) -> anyhow::Result<()> {
    if session.snapshot().task(column_id, task_id).is_none() {
        return Err(TaskboardError::NotFound(format!(
            "Task {} not found in list {}",
            task_id, column_id
        ))
        .into());
    }
    Ok(())
}

/// Accepts a full timestamp or a bare date, read as midnight UTC.
fn parse_due_arg(value: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Some(due) = parse_due_date(value) {
        return Ok(due);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TaskboardError::validation(format!("invalid due date: {}", value)).into())
}

pub async fn handle(ctx: &mut CliContext, action: TaskAction) -> anyhow::Result<()> {
    match action {
        TaskAction::Create { target, name } => {
            let (mut session, column_id) = ctx.task_session(target).await?;
            let task_id = session.create_task(column_id, &name).await?;
            task_output(&session, column_id, task_id);
        }
        TaskAction::Update(args) => {
            let (mut session, column_id) = ctx.task_session(args.target).await?;
            ensure_task(&session, column_id, args.id)?;
            let task_id = args.id;
            let update = build_update(&session, column_id, args)?;
            session.update_task(column_id, task_id, &update).await?;
            task_output(&session, column_id, task_id);
        }
        TaskAction::Delete { target, id } => {
            let (mut session, column_id) = ctx.task_session(target).await?;
            ensure_task(&session, column_id, id)?;
            session.delete_task(column_id, id).await?;
            output::output_success(serde_json::json!({ "deleted": id }));
        }
        TaskAction::Done { target, id } => {
            set_done(ctx, target, id, true).await?;
        }
        TaskAction::Undone { target, id } => {
            set_done(ctx, target, id, false).await?;
        }
    }
    Ok(())
}

async fn set_done(
    ctx: &CliContext,
    target: crate::cli::TaskTarget,
    task_id: TaskId,
    is_done: bool,
) -> anyhow::Result<()> {
    let (mut session, column_id) = ctx.task_session(target).await?;
    ensure_task(&session, column_id, task_id)?;
    session
        .update_task(column_id, task_id, &TaskUpdate::done(is_done))
        .await?;
    task_output(&session, column_id, task_id);
    Ok(())
}

fn build_update(
    session: &BoardSession,
    column_id: ColumnId,
    args: TaskUpdateArgs,
) -> anyhow::Result<TaskUpdate> {
    let mut update = TaskUpdate {
        name: args.name.map(|name| name.trim().to_string()),
        description: args.description,
        ..Default::default()
    };

    if args.clear_due {
        update.due_date = FieldUpdate::Clear;
    } else if let Some(due) = args.due.as_deref() {
        update.due_date = TaskUpdate::due(parse_due_arg(due)?).due_date;
    }

    if !args.toggle_tags.is_empty() {
        let board = session.snapshot();
        if let Some(unknown) = args.toggle_tags.iter().find(|id| board.tag(**id).is_none()) {
            return Err(TaskboardError::NotFound(format!("Tag {} not found", unknown)).into());
        }
        let task = board.task(column_id, args.id).ok_or_else(|| {
            TaskboardError::NotFound(format!("Task {} not found in list {}", args.id, column_id))
        })?;
        update.tag_ids = Some(toggled_tag_ids_many(task, &args.toggle_tags));
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::TaskTarget;
    use std::sync::Arc;
    use std::time::Duration;
    use taskboard_client::{HttpApi, MemoryCredentialStore};
    use taskboard_domain::{Board, BoardKind, Column, Tag, Task};

    fn tag(id: i64) -> Tag {
        Tag {
            id,
            name: Some(format!("tag-{}", id)),
            color: "#336699".to_string(),
        }
    }

    fn session() -> BoardSession {
        let store = Arc::new(MemoryCredentialStore::new());
        let api =
            Arc::new(HttpApi::new("http://127.0.0.1:9", store, Duration::from_secs(1)).unwrap());
        let task = Task {
            id: 5,
            name: "Paint".to_string(),
            description: None,
            is_done: false,
            due_date: None,
            position: 0,
            tags: vec![tag(1), tag(2)],
            list: None,
        };
        let board = Board {
            id: 1,
            name: "Home".to_string(),
            description: None,
            image_url: None,
            kind: BoardKind::Board,
            lists: vec![Arc::new(Column {
                id: 10,
                name: "Todo".to_string(),
                position: 0,
                cards: vec![Arc::new(task)],
            })],
            tags: vec![tag(1), tag(2), tag(3)],
        };
        BoardSession::from_snapshot(api, board)
    }

    fn toggle_args(toggle_tags: Vec<i64>) -> TaskUpdateArgs {
        TaskUpdateArgs {
            target: TaskTarget {
                board_id: Some(1),
                inbox: false,
                column_id: Some(10),
            },
            id: 5,
            name: None,
            description: None,
            due: None,
            clear_due: false,
            toggle_tags,
        }
    }

    #[test]
    fn test_toggle_tags_flip_in_order() {
        let update = build_update(&session(), 10, toggle_args(vec![1, 3])).unwrap();
        assert_eq!(update.tag_ids, Some(vec![2, 3]));
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = build_update(&session(), 10, toggle_args(vec![3, 42])).unwrap_err();
        assert_eq!(err.to_string(), "Not found: Tag 42 not found");
    }

    #[test]
    fn test_parse_due_arg_accepts_bare_date() {
        let due = parse_due_arg("2025-06-11").unwrap();
        assert_eq!(due.to_rfc3339(), "2025-06-11T00:00:00+00:00");
    }

    #[test]
    fn test_parse_due_arg_accepts_timestamp() {
        let due = parse_due_arg("2025-06-11T09:30:00Z").unwrap();
        assert_eq!(due.to_rfc3339(), "2025-06-11T09:30:00+00:00");
    }

    #[test]
    fn test_parse_due_arg_rejects_garbage() {
        assert!(parse_due_arg("next tuesday").is_err());
    }
}
