use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::column::ColumnId;
use crate::due::{self, DueStatus};
use crate::tag::{Tag, TagId};

pub type TaskId = i64;

/// Display-only back-reference to the column a task was created in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRef {
    pub id: ColumnId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default, alias = "text")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub list: Option<ListRef>,
}

impl Task {
    pub fn has_tag(&self, tag_id: TagId) -> bool {
        self.tags.iter().any(|t| t.id == tag_id)
    }

    pub fn tag_ids(&self) -> Vec<TagId> {
        self.tags.iter().map(|t| t.id).collect()
    }

    /// The due date as an instant; unparseable values count as absent.
    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(due::parse_due_date)
    }

    pub fn due_status(&self, now: DateTime<Utc>) -> Option<DueStatus> {
        if self.is_done {
            return None;
        }
        self.due_at().map(|due| DueStatus::at(due, now))
    }

    pub fn list_name(&self) -> &str {
        self.list.as_ref().map(|l| l.name.as_str()).unwrap_or("")
    }
}
