use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use todo_core::{Todo, TodoCreate, TodoId, TodoUpdate};
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Body returned by a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub success: bool,
}

pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<TodoCreate>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(input) = payload?;
    let gateway = state.gateway()?;
    let todo = gateway.create(input).await?;
    info!(id = %todo.id, "todo created");
    Ok(Json(todo))
}

pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.gateway()?.list().await?;
    Ok(Json(todos))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TodoUpdate>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(fields) = payload?;
    let gateway = state.gateway()?;
    let id = TodoId::parse(&id)?;
    let todo = gateway.update(&id, fields).await?;
    info!(%id, "todo updated");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let gateway = state.gateway()?;
    let id = TodoId::parse(&id)?;
    gateway.delete(&id).await?;
    info!(%id, "todo deleted");
    Ok(Json(Deleted { success: true }))
}
