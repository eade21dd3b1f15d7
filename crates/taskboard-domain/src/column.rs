use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::task::{Task, TaskId};

pub type ColumnId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub cards: Vec<Arc<Task>>,
}

impl Column {
    pub fn task(&self, task_id: TaskId) -> Option<&Arc<Task>> {
        self.cards.iter().find(|t| t.id == task_id)
    }
}
