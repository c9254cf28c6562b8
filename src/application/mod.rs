pub mod todo_item_service;
pub mod view;
