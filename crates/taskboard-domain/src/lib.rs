pub mod board;
pub mod column;
pub mod due;
pub mod field_update;
pub mod payload;
pub mod slug;
pub mod sort;
pub mod tag;
pub mod task;
pub mod transform;
pub mod user;

pub use board::{Board, BoardId, BoardKind};
pub use column::{Column, ColumnId};
pub use due::DueStatus;
pub use field_update::FieldUpdate;
pub use payload::{
    BoardUpdate, ColumnUpdate, Credentials, NewBoard, NewColumn, NewTask, Registration,
    TaskUpdate,
};
pub use slug::slugify;
pub use tag::{tag_choices, Tag, TagChoice, TagId};
pub use task::{ListRef, Task, TaskId};
pub use user::{User, UserId};
