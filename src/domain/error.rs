use thiserror::Error;

use super::todo_item::TodoItemId;

const DESCRIPTION_REQUIRED: &str = "Description is required";
const DESCRIPTION_EXISTS: &str = "Description already exists";

#[derive(Debug, Error)]
pub enum TodoError {
    #[error("{}", DESCRIPTION_REQUIRED)]
    DescriptionRequired,

    #[error("{}", DESCRIPTION_EXISTS)]
    DescriptionConflict,

    #[error("id {path} in path does not match id {body} in body")]
    IdMismatch { path: TodoItemId, body: TodoItemId },

    #[error("todo item {0} not found")]
    NotFound(TodoItemId),

    /// The stored description changed between read and write. Callers may
    /// re-read and retry; nothing retries automatically.
    #[error("todo item {0} was modified concurrently")]
    ConcurrencyConflict(TodoItemId),

    #[error("store failure: {0:#}")]
    Store(#[from] anyhow::Error),
}

pub type TodoResult<T> = Result<T, TodoError>;
