use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::column::{Column, ColumnId};
use crate::slug::slugify;
use crate::tag::Tag;
use crate::task::{Task, TaskId};

pub type BoardId = i64;

/// Whether a board-shaped snapshot is a regular board or the user's inbox.
///
/// Both arrive in the same wire shape; the kind is decided by the endpoint
/// the snapshot was fetched from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardKind {
    #[default]
    Board,
    Inbox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub kind: BoardKind,
    #[serde(default)]
    pub lists: Vec<Arc<Column>>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Board {
    pub fn is_inbox(&self) -> bool {
        self.kind == BoardKind::Inbox
    }

    /// Marks a snapshot fetched from the inbox endpoint.
    pub fn into_inbox(mut self) -> Self {
        self.kind = BoardKind::Inbox;
        self
    }

    /// The single column of an inbox. For a regular board this is simply the
    /// first column in collection order.
    pub fn inbox_column(&self) -> Option<&Arc<Column>> {
        self.lists.first()
    }

    pub fn column(&self, column_id: ColumnId) -> Option<&Arc<Column>> {
        self.lists.iter().find(|c| c.id == column_id)
    }

    pub fn task(&self, column_id: ColumnId, task_id: TaskId) -> Option<&Arc<Task>> {
        self.column(column_id).and_then(|c| c.task(task_id))
    }

    /// Locates a task by id alone, returning the column that holds it.
    pub fn find_task(&self, task_id: TaskId) -> Option<(ColumnId, &Arc<Task>)> {
        self.lists
            .iter()
            .find_map(|c| c.task(task_id).map(|t| (c.id, t)))
    }

    pub fn task_count(&self) -> usize {
        self.lists.iter().map(|c| c.cards.len()).sum()
    }

    pub fn tag(&self, tag_id: crate::TagId) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == tag_id)
    }

    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INBOX_JSON: &str = r#"{
        "id": 7,
        "name": "Inbox",
        "description": null,
        "lists": [
            {"id": 70, "name": "Inbox", "position": 0, "cards": [
                {"id": 700, "name": "Call the bank", "text": "before noon",
                 "is_done": false, "position": 0, "list": {"id": 70, "name": "Inbox"}}
            ]}
        ]
    }"#;

    #[test]
    fn test_deserialize_board_shell_without_lists() {
        let board: Board =
            serde_json::from_str(r#"{"id": 1, "name": "Work", "image_url": "/bg/1.jpg"}"#)
                .unwrap();
        assert_eq!(board.kind, BoardKind::Board);
        assert!(board.lists.is_empty());
        assert!(board.tags.is_empty());
        assert_eq!(board.image_url.as_deref(), Some("/bg/1.jpg"));
    }

    #[test]
    fn test_inbox_shape() {
        let inbox: Board = serde_json::from_str(INBOX_JSON).unwrap();
        let inbox = inbox.into_inbox();

        assert!(inbox.is_inbox());
        let column = inbox.inbox_column().unwrap();
        assert_eq!(column.id, 70);
        assert_eq!(column.cards[0].description.as_deref(), Some("before noon"));
        assert_eq!(inbox.task_count(), 1);
    }

    #[test]
    fn test_find_task_reports_owning_column() {
        let inbox: Board = serde_json::from_str(INBOX_JSON).unwrap();
        let (column_id, task) = inbox.find_task(700).unwrap();
        assert_eq!(column_id, 70);
        assert_eq!(task.name, "Call the bank");
        assert!(inbox.find_task(1).is_none());
        assert!(inbox.task(71, 700).is_none());
    }

    #[test]
    fn test_slug() {
        let board: Board =
            serde_json::from_str(r#"{"id": 1, "name": "  Diseño Web 2024 "}"#).unwrap();
        assert_eq!(board.slug(), "diseno-web-2024");
    }
}
