use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, Row, Sqlite};

use crate::domain::{
    repository::TodoItemStore,
    todo_item::{TodoItem, TodoItemId},
};

#[derive(Clone)]
pub struct SqliteTodoItemStore {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoItemStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        // Every connection to `:memory:` opens a fresh database, so keep exactly one alive.
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new().max_connections(1).min_connections(1).idle_timeout(None::<Duration>).max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = options
            .connect(database_url)
            .await
            .with_context(|| format!("connecting to {database_url}"))?;
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoItemStore for SqliteTodoItemStore {
    async fn init(&self) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todo_items (
                id TEXT PRIMARY KEY,
                description TEXT NOT NULL,
                priority TEXT,
                is_completed INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    async fn insert(&self, item: &TodoItem) -> Result<()> {
        sqlx::query("INSERT INTO todo_items (id, description, priority, is_completed) VALUES (?1, ?2, ?3, ?4)")
            .bind(item.id.to_string())
            .bind(&item.description)
            .bind(&item.priority)
            .bind(item.is_completed)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn find(&self, id: TodoItemId) -> Result<Option<TodoItem>> {
        let row = sqlx::query("SELECT id, description, priority, is_completed FROM todo_items WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        row.map(row_to_item).transpose()
    }

    async fn exists(&self, id: TodoItemId) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM todo_items WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&*self.pool)
            .await?;
        Ok(found.is_some())
    }

    async fn list_incomplete(&self) -> Result<Vec<TodoItem>> {
        let rows = sqlx::query("SELECT id, description, priority, is_completed FROM todo_items WHERE is_completed = 0")
            .fetch_all(&*self.pool)
            .await?;
        rows.into_iter().map(row_to_item).collect()
    }

    async fn update(&self, item: &TodoItem, expected_description: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE todo_items SET description = ?2, is_completed = ?3 WHERE id = ?1 AND description = ?4")
            .bind(item.id.to_string())
            .bind(&item.description)
            .bind(item.is_completed)
            .bind(expected_description)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: TodoItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = ?1")
            .bind(id.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_item(row: SqliteRow) -> Result<TodoItem> {
    let id_str: String = row.try_get("id")?;
    let id = TodoItemId::parse(&id_str).with_context(|| format!("malformed todo item id {id_str:?}"))?;
    Ok(TodoItem {
        id,
        description: row.try_get("description")?,
        priority: row.try_get("priority")?,
        is_completed: row.try_get("is_completed")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteTodoItemStore {
        let store = SqliteTodoItemStore::connect("sqlite::memory:").await.unwrap();
        store.init().await.unwrap();
        store
    }

    fn item(description: &str) -> TodoItem {
        TodoItem { id: TodoItemId::generate(), description: description.into(), priority: Some("low".into()), is_completed: false }
    }

    #[tokio::test]
    async fn insert_then_find_keeps_every_column() {
        let store = store().await;
        let todo = item("water plants");
        store.insert(&todo).await.unwrap();
        assert_eq!(store.find(todo.id).await.unwrap(), Some(todo.clone()));
        assert!(store.exists(todo.id).await.unwrap());
        assert!(!store.exists(TodoItemId::generate()).await.unwrap());
    }

    #[tokio::test]
    async fn list_incomplete_filters_completed_rows() {
        let store = store().await;
        let open = item("open");
        let done = TodoItem { is_completed: true, ..item("done") };
        store.insert(&open).await.unwrap();
        store.insert(&done).await.unwrap();
        assert_eq!(store.list_incomplete().await.unwrap(), vec![open]);
    }

    #[tokio::test]
    async fn update_only_lands_with_current_description() {
        let store = store().await;
        let todo = item("draft");
        store.insert(&todo).await.unwrap();

        let edited = TodoItem { description: "final".into(), is_completed: true, ..todo.clone() };
        assert!(!store.update(&edited, "stale").await.unwrap());
        assert_eq!(store.find(todo.id).await.unwrap(), Some(todo.clone()));

        assert!(store.update(&edited, "draft").await.unwrap());
        assert_eq!(store.find(todo.id).await.unwrap(), Some(edited));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_row_report_false() {
        let store = store().await;
        let ghost = item("ghost");
        assert!(!store.update(&ghost, "ghost").await.unwrap());
        assert!(!store.delete(ghost.id).await.unwrap());
    }
}
