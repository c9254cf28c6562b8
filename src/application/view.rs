use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::todo_item::{TodoItem, TodoItemId};

/// Transfer representation of a [`TodoItem`].
///
/// Accepts the PascalCase field names browser clients send alongside the
/// camelCase ones it emits. Anything else, `priority` included, is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TodoItemView {
    #[serde(default = "TodoItemId::nil", alias = "Id")]
    pub id: TodoItemId,
    #[serde(default, alias = "Description", deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, alias = "IsCompleted")]
    pub is_completed: bool,
}

/// Treats an explicit `null` the same as an absent field.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<&TodoItem> for TodoItemView {
    fn from(item: &TodoItem) -> Self {
        Self { id: item.id, description: item.description.clone(), is_completed: item.is_completed }
    }
}

impl From<TodoItem> for TodoItemView {
    fn from(item: TodoItem) -> Self {
        Self { id: item.id, description: item.description, is_completed: item.is_completed }
    }
}

impl From<TodoItemView> for TodoItem {
    fn from(view: TodoItemView) -> Self {
        Self { id: view.id, description: view.description, priority: None, is_completed: view.is_completed }
    }
}
