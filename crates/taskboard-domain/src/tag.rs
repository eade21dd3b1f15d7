use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::task::Task;

pub type TagId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    #[serde(default)]
    pub name: Option<String>,
    pub color: String,
}

impl Tag {
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// `#rrggbb`, the only form the server stores.
    pub fn is_valid_color(color: &str) -> bool {
        color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        if !Self::is_valid_color(&self.color) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&self.color[range], 16).ok();
        Some((channel(1..3)?, channel(3..5)?, channel(5..7)?))
    }
}

/// A catalog tag paired with whether the task carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChoice {
    pub tag: Tag,
    pub checked: bool,
}

pub fn tag_choices(board: &Board, task: &Task) -> Vec<TagChoice> {
    board
        .tags
        .iter()
        .map(|tag| TagChoice {
            tag: tag.clone(),
            checked: task.has_tag(tag.id),
        })
        .collect()
}

/// Tag ids of `task` after flipping `tag_id`, preserving the existing order.
pub fn toggled_tag_ids(task: &Task, tag_id: TagId) -> Vec<TagId> {
    toggled_tag_ids_many(task, &[tag_id])
}

/// Flips each id in turn; an id listed twice ends where it started.
pub fn toggled_tag_ids_many(task: &Task, toggles: &[TagId]) -> Vec<TagId> {
    toggles.iter().fold(task.tag_ids(), |mut ids, tag_id| {
        match ids.iter().position(|id| id == tag_id) {
            Some(idx) => {
                ids.remove(idx);
            }
            None => ids.push(*tag_id),
        }
        ids
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: TagId, name: &str, color: &str) -> Tag {
        Tag {
            id,
            name: Some(name.to_string()),
            color: color.to_string(),
        }
    }

    fn board_with_catalog() -> Board {
        Board {
            id: 1,
            name: "Home".to_string(),
            description: None,
            image_url: None,
            kind: Default::default(),
            lists: vec![],
            tags: vec![tag(1, "urgent", "#ff0000"), tag(2, "later", "#00ff00")],
        }
    }

    fn task_with(tags: Vec<Tag>) -> Task {
        Task {
            id: 9,
            name: "Paint".to_string(),
            description: None,
            is_done: false,
            due_date: None,
            position: 0,
            tags,
            list: None,
        }
    }

    #[test]
    fn test_color_validation() {
        assert!(Tag::is_valid_color("#a1B2c3"));
        assert!(!Tag::is_valid_color("a1b2c3"));
        assert!(!Tag::is_valid_color("#a1b2c"));
        assert!(!Tag::is_valid_color("#a1b2cz"));
    }

    #[test]
    fn test_rgb() {
        assert_eq!(tag(1, "x", "#ff8000").rgb(), Some((255, 128, 0)));
        assert_eq!(tag(1, "x", "red").rgb(), None);
    }

    #[test]
    fn test_choices_mark_attached_tags() {
        let board = board_with_catalog();
        let task = task_with(vec![tag(2, "later", "#00ff00")]);

        let choices = tag_choices(&board, &task);
        assert_eq!(choices.len(), 2);
        assert!(!choices[0].checked);
        assert!(choices[1].checked);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let task = task_with(vec![tag(2, "later", "#00ff00")]);
        assert_eq!(toggled_tag_ids(&task, 1), vec![2, 1]);
        assert_eq!(toggled_tag_ids(&task, 2), Vec::<TagId>::new());
    }

    #[test]
    fn test_toggle_many_applies_in_order() {
        let task = task_with(vec![tag(1, "urgent", "#ff0000"), tag(2, "later", "#00ff00")]);
        assert_eq!(toggled_tag_ids_many(&task, &[1, 3]), vec![2, 3]);
        assert_eq!(toggled_tag_ids_many(&task, &[2, 2]), vec![1, 2]);
        assert_eq!(toggled_tag_ids_many(&task, &[]), vec![1, 2]);
    }
}
