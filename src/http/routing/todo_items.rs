use axum::{extract::{rejection::JsonRejection, Path, State}, routing::get, Json, Router};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ::http::header::LOCATION;

use crate::application::{todo_item_service::TodoItemService, view::TodoItemView};
use crate::domain::todo_item::TodoItemId;
use crate::http::types::ApiFailure;

pub const COLLECTION: &str = "/todo-items";

#[derive(Clone)]
pub struct AppState<S: TodoItemService> { pub service: S }

pub fn router<S: TodoItemService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route(COLLECTION, get(list_todo_items::<S>).post(create_todo_item::<S>))
        .route("/todo-items/:id", get(get_todo_item::<S>).put(update_todo_item::<S>).delete(delete_todo_item::<S>))
        .with_state(state)
}

async fn list_todo_items<S: TodoItemService>(State(state): State<AppState<S>>) -> Result<Json<Vec<TodoItemView>>, ApiFailure> {
    Ok(Json(state.service.list_incomplete().await?))
}

async fn get_todo_item<S: TodoItemService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<Json<TodoItemView>, ApiFailure> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.find_by_id(id).await?))
}

async fn create_todo_item<S: TodoItemService>(State(state): State<AppState<S>>, payload: Result<Json<TodoItemView>, JsonRejection>) -> Result<impl IntoResponse, ApiFailure> {
    let Json(payload) = payload?;
    let created = state.service.create(payload).await?;
    let location = format!("{COLLECTION}/{}", created.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

async fn update_todo_item<S: TodoItemService>(State(state): State<AppState<S>>, Path(id): Path<String>, payload: Result<Json<TodoItemView>, JsonRejection>) -> Result<StatusCode, ApiFailure> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    state.service.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_todo_item<S: TodoItemService>(State(state): State<AppState<S>>, Path(id): Path<String>) -> Result<StatusCode, ApiFailure> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(s: &str) -> Result<TodoItemId, ApiFailure> { TodoItemId::parse(s).map_err(|_| ApiFailure::bad_request("invalid id")) }
