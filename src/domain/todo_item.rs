use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TodoItemId(pub Uuid);

impl TodoItemId {
    pub fn generate() -> Self { Self(Uuid::new_v4()) }

    pub fn nil() -> Self { Self(Uuid::nil()) }

    pub fn parse(s: &str) -> Result<Self, uuid::Error> { Uuid::parse_str(s).map(Self) }
}

impl fmt::Display for TodoItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// Persisted todo item.
///
/// `description` doubles as the optimistic-concurrency token: a write only
/// lands if the stored description still matches the one that was read.
/// `priority` lives in storage only and never crosses the transfer boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoItemId,
    pub description: String,
    pub priority: Option<String>,
    pub is_completed: bool,
}
