//! A board snapshot bound to the API that mutates it.
//!
//! Every mutation validates its input, sends one request and, only when
//! the server accepts it, replaces the snapshot with the transformer's
//! result. A failed call leaves the snapshot exactly as it was.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::sort::by_position;
use taskboard_domain::tag::toggled_tag_ids;
use taskboard_domain::transform;
use taskboard_domain::{
    tag_choices, Board, BoardId, BoardUpdate, Column, ColumnId, ColumnUpdate, NewColumn,
    NewTask, TagChoice, TagId, Task, TaskId, TaskUpdate,
};

use crate::api::BoardApi;

pub struct BoardSession {
    api: Arc<dyn BoardApi>,
    board: Board,
}

/// Logs a failed call before handing the error back.
fn logged<T>(action: &str, result: TaskboardResult<T>) -> TaskboardResult<T> {
    if let Err(e) = &result {
        tracing::error!("Failed to {}: {}", action, e);
    }
    result
}

impl BoardSession {
    pub fn from_snapshot(api: Arc<dyn BoardApi>, board: Board) -> Self {
        Self { api, board }
    }

    /// Finds the board among the user's boards and attaches its lists.
    pub async fn load(api: Arc<dyn BoardApi>, board_id: BoardId) -> TaskboardResult<Self> {
        let boards = logged("load boards", api.list_boards().await)?;
        let shell = boards
            .into_iter()
            .find(|b| b.id == board_id)
            .ok_or_else(|| TaskboardError::NotFound(format!("Board {} not found", board_id)))?;
        let lists = logged("load lists", api.list_columns(board_id).await)?;
        let board = transform::setup(&shell, lists);
        tracing::debug!(
            "Loaded board {} with {} lists and {} tasks",
            board.id,
            board.lists.len(),
            board.task_count()
        );
        Ok(Self::from_snapshot(api, board))
    }

    pub async fn load_inbox(api: Arc<dyn BoardApi>) -> TaskboardResult<Self> {
        let inbox = logged("load inbox", api.inbox().await)?;
        Ok(Self::from_snapshot(api, inbox))
    }

    pub fn snapshot(&self) -> &Board {
        &self.board
    }

    pub fn id(&self) -> BoardId {
        self.board.id
    }

    pub fn is_inbox(&self) -> bool {
        self.board.is_inbox()
    }

    pub fn sorted_columns(&self) -> Vec<&Column> {
        by_position::<Column, _>(&self.board.lists)
    }

    /// Tasks of one column in display order; empty for an unknown column.
    pub fn sorted_tasks(&self, column_id: ColumnId) -> Vec<&Task> {
        self.board
            .column(column_id)
            .map(|c| by_position::<Task, _>(&c.cards))
            .unwrap_or_default()
    }

    pub fn tag_choices(&self, column_id: ColumnId, task_id: TaskId) -> Vec<TagChoice> {
        self.board
            .task(column_id, task_id)
            .map(|task| tag_choices(&self.board, task))
            .unwrap_or_default()
    }

    fn guard_inbox(&self, action: &str) -> TaskboardResult<()> {
        if self.board.is_inbox() {
            return Err(TaskboardError::validation(format!(
                "cannot {} of the inbox",
                action
            )));
        }
        Ok(())
    }

    fn existing_task(&self, column_id: ColumnId, task_id: TaskId) -> TaskboardResult<&Arc<Task>> {
        self.board.task(column_id, task_id).ok_or_else(|| {
            TaskboardError::NotFound(format!("Task {} not found in list {}", task_id, column_id))
        })
    }

    pub async fn rename_board(&mut self, name: &str) -> TaskboardResult<()> {
        self.guard_inbox("rename the board")?;
        let update = BoardUpdate::rename(name);
        update.validate()?;
        let updated = logged(
            "rename board",
            self.api.update_board(self.board.id, &update).await,
        )?;
        self.board = transform::replace_board(&self.board, updated);
        Ok(())
    }

    pub async fn create_column(&mut self, name: &str) -> TaskboardResult<ColumnId> {
        self.guard_inbox("add a list")?;
        let column = NewColumn::new(name);
        column.validate()?;
        let created = logged(
            "create list",
            self.api.create_column(self.board.id, &column).await,
        )?;
        let column_id = created.id;
        self.board = transform::add_column(&self.board, created);
        Ok(column_id)
    }

    pub async fn rename_column(&mut self, column_id: ColumnId, name: &str) -> TaskboardResult<()> {
        self.guard_inbox("rename the list")?;
        let update = ColumnUpdate::rename(name);
        update.validate()?;
        let updated = logged(
            "rename list",
            self.api
                .update_column(self.board.id, column_id, &update)
                .await,
        )?;
        self.board = transform::replace_column(&self.board, column_id, updated);
        Ok(())
    }

    pub async fn delete_column(&mut self, column_id: ColumnId) -> TaskboardResult<()> {
        self.guard_inbox("delete the list")?;
        logged(
            "delete list",
            self.api.delete_column(self.board.id, column_id).await,
        )?;
        self.board = transform::remove_column(&self.board, column_id);
        Ok(())
    }

    pub async fn create_task(&mut self, column_id: ColumnId, name: &str) -> TaskboardResult<TaskId> {
        let task = NewTask::new(name);
        task.validate()?;
        let created = logged(
            "create task",
            self.api.create_task(self.board.id, column_id, &task).await,
        )?;
        let task_id = created.id;
        self.board = transform::add_task(&self.board, column_id, created);
        Ok(task_id)
    }

    pub async fn update_task(
        &mut self,
        column_id: ColumnId,
        task_id: TaskId,
        update: &TaskUpdate,
    ) -> TaskboardResult<()> {
        if update.is_empty() {
            return Ok(());
        }
        update.validate()?;
        let updated = logged(
            "update task",
            self.api
                .update_task(self.board.id, column_id, task_id, update)
                .await,
        )?;
        self.board = transform::replace_task(&self.board, column_id, task_id, updated);
        Ok(())
    }

    pub async fn delete_task(&mut self, column_id: ColumnId, task_id: TaskId) -> TaskboardResult<()> {
        logged(
            "delete task",
            self.api
                .delete_task(self.board.id, column_id, task_id)
                .await,
        )?;
        self.board = transform::remove_task(&self.board, column_id, task_id);
        Ok(())
    }

    pub async fn toggle_done(&mut self, column_id: ColumnId, task_id: TaskId) -> TaskboardResult<()> {
        let is_done = self.existing_task(column_id, task_id)?.is_done;
        self.update_task(column_id, task_id, &TaskUpdate::done(!is_done))
            .await
    }

    pub async fn set_due_date(
        &mut self,
        column_id: ColumnId,
        task_id: TaskId,
        due: DateTime<Utc>,
    ) -> TaskboardResult<()> {
        self.update_task(column_id, task_id, &TaskUpdate::due(due))
            .await
    }

    pub async fn clear_due_date(&mut self, column_id: ColumnId, task_id: TaskId) -> TaskboardResult<()> {
        self.update_task(column_id, task_id, &TaskUpdate::clear_due())
            .await
    }

    pub async fn toggle_tag(
        &mut self,
        column_id: ColumnId,
        task_id: TaskId,
        tag_id: TagId,
    ) -> TaskboardResult<()> {
        if self.board.tag(tag_id).is_none() {
            return Err(TaskboardError::NotFound(format!("Tag {} not found", tag_id)));
        }
        let tag_ids = toggled_tag_ids(self.existing_task(column_id, task_id)?, tag_id);
        self.update_task(column_id, task_id, &TaskUpdate::tags(tag_ids))
            .await
    }
}

/// The board page: the open board next to the user's inbox.
pub struct Workspace {
    pub board: BoardSession,
    pub inbox: BoardSession,
}

impl Workspace {
    pub async fn load(api: Arc<dyn BoardApi>, board_id: BoardId) -> TaskboardResult<Self> {
        let (board, inbox) = tokio::try_join!(
            BoardSession::load(Arc::clone(&api), board_id),
            BoardSession::load_inbox(Arc::clone(&api)),
        )?;
        Ok(Self { board, inbox })
    }

    pub fn session(&self, inbox: bool) -> &BoardSession {
        if inbox {
            &self.inbox
        } else {
            &self.board
        }
    }

    pub fn session_mut(&mut self, inbox: bool) -> &mut BoardSession {
        if inbox {
            &mut self.inbox
        } else {
            &mut self.board
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockBoardApi;
    use taskboard_domain::{BoardKind, FieldUpdate, Tag};

    fn task(id: TaskId, name: &str, position: i32) -> Task {
        Task {
            id,
            name: name.to_string(),
            description: None,
            is_done: false,
            due_date: None,
            position,
            tags: vec![],
            list: None,
        }
    }

    fn column(id: ColumnId, position: i32, cards: Vec<Task>) -> Column {
        Column {
            id,
            name: format!("list-{}", id),
            position,
            cards: cards.into_iter().map(Arc::new).collect(),
        }
    }

    fn shell(id: BoardId, kind: BoardKind) -> Board {
        Board {
            id,
            name: "Home".to_string(),
            description: None,
            image_url: None,
            kind,
            lists: vec![],
            tags: vec![Tag {
                id: 5,
                name: Some("urgent".to_string()),
                color: "#ff0000".to_string(),
            }],
        }
    }

    fn loaded(kind: BoardKind) -> Board {
        transform::setup(
            &shell(1, kind),
            vec![
                column(10, 2, vec![task(100, "a", 1), task(101, "b", 0)]),
                column(20, 1, vec![]),
            ],
        )
    }

    fn session(api: MockBoardApi, kind: BoardKind) -> BoardSession {
        BoardSession::from_snapshot(Arc::new(api), loaded(kind))
    }

    fn api_error() -> TaskboardError {
        TaskboardError::Api {
            status: 500,
            detail: "boom".to_string(),
        }
    }

    #[tokio::test]
    async fn test_load_attaches_lists() {
        let mut api = MockBoardApi::new();
        api.expect_list_boards()
            .returning(|| Ok(vec![shell(2, BoardKind::Board), shell(1, BoardKind::Board)]));
        api.expect_list_columns()
            .withf(|id| *id == 1)
            .returning(|_| Ok(vec![column(10, 0, vec![task(100, "a", 0)])]));

        let session = BoardSession::load(Arc::new(api), 1).await.unwrap();
        assert_eq!(session.id(), 1);
        assert_eq!(session.snapshot().task_count(), 1);
    }

    #[tokio::test]
    async fn test_load_unknown_board() {
        let mut api = MockBoardApi::new();
        api.expect_list_boards().returning(|| Ok(vec![]));
        api.expect_list_columns().never();

        let err = BoardSession::load(Arc::new(api), 9).await.err().unwrap();
        assert!(matches!(err, TaskboardError::NotFound(_)));
    }

    #[test]
    fn test_sorted_views() {
        let session = session(MockBoardApi::new(), BoardKind::Board);
        let columns: Vec<_> = session.sorted_columns().iter().map(|c| c.id).collect();
        assert_eq!(columns, vec![20, 10]);
        let tasks: Vec<_> = session.sorted_tasks(10).iter().map(|t| t.id).collect();
        assert_eq!(tasks, vec![101, 100]);
        assert!(session.sorted_tasks(99).is_empty());
    }

    #[tokio::test]
    async fn test_create_task_appends() {
        let mut api = MockBoardApi::new();
        api.expect_create_task()
            .withf(|board, column, t| *board == 1 && *column == 20 && t.name == "Write tests")
            .times(1)
            .returning(|_, _, _| Ok(task(300, "Write tests", 0)));

        let mut session = session(api, BoardKind::Board);
        let before = session.snapshot().clone();
        let id = session.create_task(20, " Write tests ").await.unwrap();

        assert_eq!(id, 300);
        let board = session.snapshot();
        assert_eq!(board.column(20).unwrap().cards.len(), 1);
        assert!(Arc::ptr_eq(&board.lists[0], &before.lists[0]));
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_snapshot() {
        let mut api = MockBoardApi::new();
        api.expect_delete_task().returning(|_, _, _| Err(api_error()));
        api.expect_update_column()
            .returning(|_, _, _| Err(api_error()));

        let mut session = session(api, BoardKind::Board);
        let before = session.snapshot().clone();

        assert!(session.delete_task(10, 100).await.is_err());
        assert!(session.rename_column(10, "Doing").await.is_err());
        assert_eq!(session.snapshot(), &before);
    }

    #[tokio::test]
    async fn test_validation_never_reaches_api() {
        let mut api = MockBoardApi::new();
        api.expect_create_column().never();
        api.expect_create_task().never();

        let mut session = session(api, BoardKind::Board);
        assert!(session.create_column("  ").await.is_err());
        assert!(session.create_task(10, &"x".repeat(101)).await.is_err());
    }

    #[tokio::test]
    async fn test_inbox_refuses_structural_changes() {
        let mut api = MockBoardApi::new();
        api.expect_update_board().never();
        api.expect_create_column().never();
        api.expect_update_column().never();
        api.expect_delete_column().never();

        let mut inbox = session(api, BoardKind::Inbox);
        for result in [
            inbox.rename_board("Other").await,
            inbox.create_column("More").await.map(|_| ()),
            inbox.rename_column(10, "x").await,
            inbox.delete_column(10).await,
        ] {
            assert!(matches!(result, Err(TaskboardError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_inbox_allows_task_operations() {
        let mut api = MockBoardApi::new();
        api.expect_create_task()
            .returning(|_, _, _| Ok(task(400, "Call mom", 0)));

        let mut inbox = session(api, BoardKind::Inbox);
        inbox.create_task(10, "Call mom").await.unwrap();
        assert_eq!(inbox.snapshot().column(10).unwrap().cards.len(), 3);
    }

    #[tokio::test]
    async fn test_rename_board_keeps_lists() {
        let mut api = MockBoardApi::new();
        api.expect_update_board()
            .withf(|id, u| *id == 1 && u.name.as_deref() == Some("Work"))
            .returning(|_, _| {
                let mut renamed = shell(1, BoardKind::Board);
                renamed.name = "Work".to_string();
                renamed.tags.clear();
                Ok(renamed)
            });

        let mut session = session(api, BoardKind::Board);
        session.rename_board("Work").await.unwrap();
        assert_eq!(session.snapshot().name, "Work");
        assert_eq!(session.snapshot().lists.len(), 2);
        assert_eq!(session.snapshot().tags.len(), 1);
    }

    #[tokio::test]
    async fn test_column_lifecycle() {
        let mut api = MockBoardApi::new();
        api.expect_create_column()
            .returning(|_, c| Ok(column(30, 3, vec![]).renamed(&c.name)));
        api.expect_update_column()
            .returning(|_, id, u| Ok(column(id, 3, vec![]).renamed(u.name.as_deref().unwrap_or(""))));
        api.expect_delete_column().returning(|_, _| Ok(()));

        let mut session = session(api, BoardKind::Board);
        let id = session.create_column("Done").await.unwrap();
        session.rename_column(id, "Shipped").await.unwrap();
        assert_eq!(session.snapshot().column(30).unwrap().name, "Shipped");

        session.delete_column(id).await.unwrap();
        assert_eq!(session.snapshot(), &loaded(BoardKind::Board));
    }

    #[tokio::test]
    async fn test_toggle_done_flips_flag() {
        let mut api = MockBoardApi::new();
        api.expect_update_task()
            .withf(|_, _, id, u| *id == 100 && u.is_done == Some(true))
            .returning(|_, _, _, _| {
                let mut done = task(100, "a", 1);
                done.is_done = true;
                Ok(done)
            });

        let mut session = session(api, BoardKind::Board);
        session.toggle_done(10, 100).await.unwrap();
        assert!(session.snapshot().task(10, 100).unwrap().is_done);
    }

    #[tokio::test]
    async fn test_toggle_done_unknown_task() {
        let mut api = MockBoardApi::new();
        api.expect_update_task().never();
        let mut session = session(api, BoardKind::Board);
        let err = session.toggle_done(10, 999).await.unwrap_err();
        assert!(matches!(err, TaskboardError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_clear_due_date_sends_clear() {
        let mut api = MockBoardApi::new();
        api.expect_update_task()
            .withf(|_, _, _, u| u.due_date == FieldUpdate::Clear)
            .returning(|_, _, _, _| Ok(task(101, "b", 0)));

        let mut session = session(api, BoardKind::Board);
        session.clear_due_date(10, 101).await.unwrap();
    }

    #[tokio::test]
    async fn test_toggle_tag_sends_new_set() {
        let mut api = MockBoardApi::new();
        api.expect_update_task()
            .withf(|_, _, _, u| u.tag_ids == Some(vec![5]))
            .returning(|_, _, _, _| {
                let mut tagged = task(100, "a", 1);
                tagged.tags = vec![Tag {
                    id: 5,
                    name: Some("urgent".to_string()),
                    color: "#ff0000".to_string(),
                }];
                Ok(tagged)
            });

        let mut session = session(api, BoardKind::Board);
        assert!(!session.tag_choices(10, 100)[0].checked);
        session.toggle_tag(10, 100, 5).await.unwrap();
        assert!(session.tag_choices(10, 100)[0].checked);
    }

    #[tokio::test]
    async fn test_workspace_loads_board_and_inbox() {
        let mut api = MockBoardApi::new();
        api.expect_list_boards()
            .returning(|| Ok(vec![shell(1, BoardKind::Board)]));
        api.expect_list_columns().returning(|_| Ok(vec![]));
        api.expect_inbox().returning(|| {
            Ok(transform::setup(&shell(7, BoardKind::Inbox), vec![column(70, 0, vec![])]))
        });

        let workspace = Workspace::load(Arc::new(api), 1).await.unwrap();
        assert_eq!(workspace.session(false).id(), 1);
        assert!(workspace.session(true).is_inbox());
    }

    trait Renamed {
        fn renamed(self, name: &str) -> Self;
    }

    impl Renamed for Column {
        fn renamed(mut self, name: &str) -> Self {
            self.name = name.to_string();
            self
        }
    }
}
