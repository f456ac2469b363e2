//! HTTP handlers for lists and todos.
//!
//! Mutations answer with small JSON bodies; `GET /todos/{listId}` answers
//! with the assembled view-model.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use todos_core::models::ListView;
use todos_core::{ListId, TodoError, TodoId, TodoListId};

use crate::error::ApiError;
use crate::server::AppState;

// ── Request bodies ──

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub description: Option<String>,
    pub todolist_id: Option<ListId>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub completed: Option<bool>,
}

// ── Response bodies ──

#[derive(Debug, Serialize)]
pub struct CreatedList {
    pub id: TodoListId,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedTodo {
    pub id: TodoId,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct Outcome {
    pub successful: bool,
}

impl Outcome {
    fn ok() -> Json<Self> {
        Json(Self { successful: true })
    }
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, TodoError> {
    value.ok_or_else(|| TodoError::validation(format!("missing field `{field}`")))
}

// ── Handlers ──

/// GET /: redirect to the default list.
pub async fn index(State(state): State<AppState>) -> Result<Response, ApiError> {
    let target = state.service.default_list()?;
    Ok((StatusCode::FOUND, [(header::LOCATION, format!("/todos/{target}"))]).into_response())
}

/// POST /todos
pub async fn create_list(
    State(state): State<AppState>,
    payload: Result<Json<CreateListRequest>, JsonRejection>,
) -> Result<Json<CreatedList>, ApiError> {
    let Json(req) = payload?;
    let name = require(req.name, "name")?;
    let list = state.service.create_list(&name)?;
    Ok(Json(CreatedList {
        id: list.id,
        name: list.name,
    }))
}

/// POST /todos/{listId}
pub async fn create_todo(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<CreatedTodo>, ApiError> {
    let list: ListId = list_id.parse()?;
    let Json(req) = payload?;
    let description = require(req.description, "description")?;
    let declared = require(req.todolist_id, "todolist_id")?;
    if declared != list {
        return Err(TodoError::validation(format!(
            "todolist_id {declared} does not match list {list}"
        ))
        .into());
    }
    let item = state.service.create_todo(&list, &description)?;
    Ok(Json(CreatedTodo {
        id: item.id,
        description: item.description,
    }))
}

/// PATCH /todos/{listId}/{todoId}
pub async fn update_todo(
    State(state): State<AppState>,
    Path((list_id, todo_id)): Path<(String, String)>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<CompletionResponse>, ApiError> {
    let list: ListId = list_id.parse()?;
    let todo: TodoId = todo_id.parse()?;
    let Json(req) = payload?;
    let completed = require(req.completed, "completed")?;
    let completed = state.service.update_completion(&list, todo, completed)?;
    Ok(Json(CompletionResponse { completed }))
}

/// PUT /todos/{listId}: complete every todo of the list.
pub async fn complete_all(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    let list: ListId = list_id.parse()?;
    state.service.complete_all(&list)?;
    Ok(Outcome::ok())
}

/// DELETE /todos/{listId}/{todoId}
pub async fn delete_todo(
    State(state): State<AppState>,
    Path((list_id, todo_id)): Path<(String, String)>,
) -> Result<Json<Outcome>, ApiError> {
    let list: ListId = list_id.parse()?;
    let todo: TodoId = todo_id.parse()?;
    state.service.delete_todo(&list, todo)?;
    Ok(Outcome::ok())
}

/// DELETE /todos/{listId}
pub async fn delete_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<Outcome>, ApiError> {
    let list: ListId = list_id.parse()?;
    state.service.delete_list(&list)?;
    Ok(Outcome::ok())
}

/// GET /todos/{listId}
pub async fn list_view(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<ListView>, ApiError> {
    let list: ListId = list_id.parse()?;
    Ok(Json(state.service.list_view(&list)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_reports_field() {
        let err = require::<String>(None, "name").unwrap_err();
        assert_eq!(err, TodoError::validation("missing field `name`"));
        assert_eq!(require(Some(3), "x").unwrap(), 3);
    }

    #[test]
    fn create_todo_request_accepts_numeric_or_string_list() {
        let a: CreateTodoRequest =
            serde_json::from_str(r#"{"description":"x","todolist_id":1}"#).unwrap();
        let b: CreateTodoRequest =
            serde_json::from_str(r#"{"description":"x","todolist_id":"1"}"#).unwrap();
        assert_eq!(a.todolist_id, b.todolist_id);
    }

    #[test]
    fn outcome_shape() {
        let json = serde_json::to_value(Outcome { successful: true }).unwrap();
        assert_eq!(json, serde_json::json!({"successful": true}));
    }
}
