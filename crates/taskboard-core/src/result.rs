use crate::error::TaskboardError;

pub type TaskboardResult<T> = Result<T, TaskboardError>;
