//! Snapshot transformers.
//!
//! Each function takes the current board snapshot plus the result of one
//! completed server call and returns the next snapshot. Nothing is mutated
//! in place: the new board reuses the `Arc`s of every column and task the
//! call did not touch, so `Arc::ptr_eq` tells a renderer which subtrees can
//! be skipped. Ids are not validated; an unknown id leaves the affected
//! collection as it was.

use std::sync::Arc;

use crate::board::Board;
use crate::column::{Column, ColumnId};
use crate::task::{Task, TaskId};

/// Attaches a freshly fetched list collection to a board shell.
pub fn setup(board: &Board, lists: Vec<Column>) -> Board {
    Board {
        lists: lists.into_iter().map(Arc::new).collect(),
        ..board.clone()
    }
}

/// Takes the server's board fields while keeping the nested collections,
/// which the update endpoint does not return.
pub fn replace_board(board: &Board, updated: Board) -> Board {
    let tags = if updated.tags.is_empty() {
        board.tags.clone()
    } else {
        updated.tags
    };
    Board {
        kind: board.kind,
        lists: board.lists.clone(),
        tags,
        ..updated
    }
}

pub fn add_column(board: &Board, column: Column) -> Board {
    let mut lists = board.lists.clone();
    lists.push(Arc::new(column));
    with_lists(board, lists)
}

pub fn remove_column(board: &Board, column_id: ColumnId) -> Board {
    let lists = board
        .lists
        .iter()
        .filter(|c| c.id != column_id)
        .cloned()
        .collect();
    with_lists(board, lists)
}

pub fn replace_column(board: &Board, column_id: ColumnId, updated: Column) -> Board {
    let updated = Arc::new(updated);
    let lists = board
        .lists
        .iter()
        .map(|c| {
            if c.id == column_id {
                Arc::clone(&updated)
            } else {
                Arc::clone(c)
            }
        })
        .collect();
    with_lists(board, lists)
}

pub fn add_task(board: &Board, column_id: ColumnId, task: Task) -> Board {
    let task = Arc::new(task);
    map_column(board, column_id, |cards| {
        let mut cards = cards.to_vec();
        cards.push(Arc::clone(&task));
        cards
    })
}

pub fn remove_task(board: &Board, column_id: ColumnId, task_id: TaskId) -> Board {
    map_column(board, column_id, |cards| {
        cards.iter().filter(|t| t.id != task_id).cloned().collect()
    })
}

pub fn replace_task(board: &Board, column_id: ColumnId, task_id: TaskId, updated: Task) -> Board {
    let updated = Arc::new(updated);
    map_column(board, column_id, |cards| {
        cards
            .iter()
            .map(|t| {
                if t.id == task_id {
                    Arc::clone(&updated)
                } else {
                    Arc::clone(t)
                }
            })
            .collect()
    })
}

fn with_lists(board: &Board, lists: Vec<Arc<Column>>) -> Board {
    Board {
        id: board.id,
        name: board.name.clone(),
        description: board.description.clone(),
        image_url: board.image_url.clone(),
        kind: board.kind,
        lists,
        tags: board.tags.clone(),
    }
}

/// Rebuilds only the column with `column_id`, giving it the cards produced
/// by `f`; every other column keeps its `Arc`.
fn map_column<F>(board: &Board, column_id: ColumnId, f: F) -> Board
where
    F: Fn(&[Arc<Task>]) -> Vec<Arc<Task>>,
{
    let lists = board
        .lists
        .iter()
        .map(|c| {
            if c.id == column_id {
                Arc::new(Column {
                    id: c.id,
                    name: c.name.clone(),
                    position: c.position,
                    cards: f(&c.cards),
                })
            } else {
                Arc::clone(c)
            }
        })
        .collect();
    with_lists(board, lists)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardKind;
    use crate::tag::Tag;

    fn task(id: TaskId, name: &str) -> Task {
        Task {
            id,
            name: name.to_string(),
            description: None,
            is_done: false,
            due_date: None,
            position: 0,
            tags: vec![],
            list: None,
        }
    }

    fn column(id: ColumnId, cards: Vec<Task>) -> Column {
        Column {
            id,
            name: format!("list-{}", id),
            position: 0,
            cards: cards.into_iter().map(Arc::new).collect(),
        }
    }

    fn board(lists: Vec<Column>) -> Board {
        Board {
            id: 1,
            name: "Board".to_string(),
            description: None,
            image_url: None,
            kind: BoardKind::Board,
            lists: lists.into_iter().map(Arc::new).collect(),
            tags: vec![],
        }
    }

    fn two_column_board() -> Board {
        board(vec![
            column(10, vec![task(100, "a"), task(101, "b")]),
            column(20, vec![task(200, "c")]),
        ])
    }

    #[test]
    fn test_setup_attaches_lists() {
        let shell = board(vec![]);
        let loaded = setup(&shell, vec![column(10, vec![]), column(11, vec![])]);
        assert_eq!(loaded.id, shell.id);
        assert_eq!(loaded.lists.len(), 2);
        assert!(shell.lists.is_empty());
    }

    #[test]
    fn test_replace_board_keeps_lists_kind_and_tags() {
        let mut current = two_column_board();
        current.kind = BoardKind::Inbox;
        current.tags = vec![Tag {
            id: 1,
            name: Some("x".to_string()),
            color: "#000000".to_string(),
        }];

        let mut from_server = board(vec![]);
        from_server.name = "Renamed".to_string();
        from_server.image_url = Some("/bg.png".to_string());

        let next = replace_board(&current, from_server);
        assert_eq!(next.name, "Renamed");
        assert_eq!(next.image_url.as_deref(), Some("/bg.png"));
        assert_eq!(next.kind, BoardKind::Inbox);
        assert_eq!(next.tags.len(), 1);
        assert!(Arc::ptr_eq(&next.lists[0], &current.lists[0]));
        assert!(Arc::ptr_eq(&next.lists[1], &current.lists[1]));
    }

    #[test]
    fn test_add_then_remove_column_round_trips() {
        let original = two_column_board();
        let added = add_column(&original, column(30, vec![task(300, "new")]));
        assert_eq!(added.lists.len(), 3);
        assert_eq!(added.lists[2].id, 30);

        let removed = remove_column(&added, 30);
        assert_eq!(removed, original);
    }

    #[test]
    fn test_remove_absent_column_is_noop() {
        let original = two_column_board();
        let next = remove_column(&original, 999);
        assert_eq!(next, original);
        assert!(Arc::ptr_eq(&next.lists[0], &original.lists[0]));
    }

    #[test]
    fn test_replace_column_shares_siblings() {
        let original = two_column_board();
        let mut renamed = (*original.lists[0]).clone();
        renamed.name = "Doing".to_string();

        let next = replace_column(&original, 10, renamed);
        assert_eq!(next.lists[0].name, "Doing");
        assert!(!Arc::ptr_eq(&next.lists[0], &original.lists[0]));
        assert!(Arc::ptr_eq(&next.lists[1], &original.lists[1]));
    }

    #[test]
    fn test_task_operations_share_other_columns() {
        let original = two_column_board();

        let added = add_task(&original, 10, task(102, "d"));
        assert!(Arc::ptr_eq(&added.lists[1], &original.lists[1]));

        let removed = remove_task(&original, 10, 100);
        assert!(Arc::ptr_eq(&removed.lists[1], &original.lists[1]));

        let replaced = replace_task(&original, 10, 101, task(101, "B"));
        assert!(Arc::ptr_eq(&replaced.lists[1], &original.lists[1]));
    }

    #[test]
    fn test_task_operations_share_untouched_tasks() {
        let original = two_column_board();
        let replaced = replace_task(&original, 10, 101, task(101, "B"));

        assert!(Arc::ptr_eq(
            &replaced.lists[0].cards[0],
            &original.lists[0].cards[0]
        ));
        assert_eq!(replaced.lists[0].cards[1].name, "B");
        assert_eq!(original.lists[0].cards[1].name, "b");
    }

    #[test]
    fn test_replace_unknown_task_leaves_cards_unchanged() {
        let original = two_column_board();
        let next = replace_task(&original, 10, 999, task(999, "ghost"));
        assert_eq!(next.lists[0].cards, original.lists[0].cards);
        assert_eq!(next, original);
    }

    #[test]
    fn test_task_in_unknown_column_is_noop() {
        let original = two_column_board();
        assert_eq!(add_task(&original, 99, task(1, "x")), original);
        assert_eq!(remove_task(&original, 99, 100), original);
    }

    #[test]
    fn test_add_then_remove_task_scenario() {
        let original = board(vec![column(10, vec![])]);

        let with_task = add_task(&original, 10, task(100, "Test"));
        assert_eq!(with_task.id, 1);
        assert_eq!(with_task.lists.len(), 1);
        assert_eq!(with_task.lists[0].id, 10);
        assert_eq!(with_task.lists[0].cards.len(), 1);
        assert_eq!(with_task.lists[0].cards[0].id, 100);
        assert_eq!(with_task.lists[0].cards[0].name, "Test");

        let back = remove_task(&with_task, 10, 100);
        assert_eq!(back, original);
    }

    #[test]
    fn test_previous_snapshot_is_untouched() {
        let original = two_column_board();
        let before = original.clone();
        let _ = remove_task(&original, 10, 100);
        let _ = remove_column(&original, 20);
        assert_eq!(original, before);
    }
}
