use async_trait::async_trait;

use crate::application::view::TodoItemView;
use crate::domain::error::{TodoError, TodoResult};
use crate::domain::repository::TodoItemStore;
use crate::domain::todo_item::{TodoItem, TodoItemId};

#[async_trait]
pub trait TodoItemService: Send + Sync + 'static {
    async fn list_incomplete(&self) -> TodoResult<Vec<TodoItemView>>;
    async fn find_by_id(&self, id: TodoItemId) -> TodoResult<TodoItemView>;
    async fn exists(&self, id: TodoItemId) -> TodoResult<bool>;
    async fn description_exists(&self, description: &str) -> TodoResult<bool>;
    async fn create(&self, candidate: TodoItemView) -> TodoResult<TodoItemView>;
    async fn update(&self, id: TodoItemId, candidate: TodoItemView) -> TodoResult<()>;
    async fn delete(&self, id: TodoItemId) -> TodoResult<()>;
}

/// Enforces the todo item rules on top of a raw [`TodoItemStore`].
/// Holds no per-call state; clones share the same store.
#[derive(Clone)]
pub struct TodoItemServiceImpl<S: TodoItemStore> {
    store: S,
}

impl<S: TodoItemStore> TodoItemServiceImpl<S> {
    pub fn new(store: S) -> Self { Self { store } }
}

#[async_trait]
impl<S: TodoItemStore> TodoItemService for TodoItemServiceImpl<S> {
    async fn list_incomplete(&self) -> TodoResult<Vec<TodoItemView>> {
        let items = self.store.list_incomplete().await?;
        Ok(items.into_iter().map(TodoItemView::from).collect())
    }

    async fn find_by_id(&self, id: TodoItemId) -> TodoResult<TodoItemView> {
        match self.store.find(id).await? {
            Some(item) => Ok(item.into()),
            None => Err(TodoError::NotFound(id)),
        }
    }

    async fn exists(&self, id: TodoItemId) -> TodoResult<bool> { Ok(self.store.exists(id).await?) }

    async fn description_exists(&self, description: &str) -> TodoResult<bool> {
        let needle = description.to_lowercase();
        let items = self.store.list_incomplete().await?;
        Ok(items.iter().any(|item| item.description.to_lowercase() == needle))
    }

    async fn create(&self, candidate: TodoItemView) -> TodoResult<TodoItemView> {
        if candidate.description.is_empty() {
            return Err(TodoError::DescriptionRequired);
        }
        if self.description_exists(&candidate.description).await? {
            return Err(TodoError::DescriptionConflict);
        }

        let item = TodoItem { id: TodoItemId::generate(), ..TodoItem::from(candidate) };
        self.store.insert(&item).await?;
        tracing::debug!(id = %item.id, "created todo item");
        Ok(item.into())
    }

    async fn update(&self, id: TodoItemId, candidate: TodoItemView) -> TodoResult<()> {
        if candidate.id != id {
            return Err(TodoError::IdMismatch { path: id, body: candidate.id });
        }

        // Existence is settled before any write is attempted.
        let Some(mut item) = self.store.find(id).await? else { return Err(TodoError::NotFound(id)) };
        let token = std::mem::replace(&mut item.description, candidate.description);
        item.is_completed = candidate.is_completed;

        if self.store.update(&item, &token).await? {
            tracing::debug!(%id, completed = item.is_completed, "updated todo item");
            return Ok(());
        }

        // The conditional write matched nothing: either the row vanished or its
        // description moved on since it was read.
        if self.exists(id).await? {
            tracing::warn!(%id, "concurrent modification of todo item");
            Err(TodoError::ConcurrencyConflict(id))
        } else {
            Err(TodoError::NotFound(id))
        }
    }

    async fn delete(&self, id: TodoItemId) -> TodoResult<()> {
        if self.store.delete(id).await? {
            tracing::debug!(%id, "deleted todo item");
            Ok(())
        } else {
            Err(TodoError::NotFound(id))
        }
    }
}
