use async_trait::async_trait;

use super::todo_item::{TodoItem, TodoItemId};

/// Raw persistence capability. Enforces no domain rules; the facade in
/// `application::todo_item_service` does that.
#[async_trait]
pub trait TodoItemStore: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn insert(&self, item: &TodoItem) -> anyhow::Result<()>;
    async fn find(&self, id: TodoItemId) -> anyhow::Result<Option<TodoItem>>;
    async fn exists(&self, id: TodoItemId) -> anyhow::Result<bool>;
    async fn list_incomplete(&self) -> anyhow::Result<Vec<TodoItem>>;
    /// Writes `description` and `is_completed` only if the stored description
    /// still equals `expected_description`. Returns whether a row was written.
    async fn update(&self, item: &TodoItem, expected_description: &str) -> anyhow::Result<bool>;
    async fn delete(&self, id: TodoItemId) -> anyhow::Result<bool>;
}
