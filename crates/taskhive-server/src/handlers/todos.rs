//! Todo endpoints: create, list, fetch, update, archive, permanent
//! delete, and analytics.
//!
//! Request parsing is lenient where the product is lenient (unknown
//! filter values are ignored, junk page numbers fall back to defaults)
//! and strict where it is strict (enum and date fields in mutation
//! bodies must be well-formed).

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use taskhive_core::models::analytics::TodoAnalytics;
use taskhive_core::models::todo::{CreateTodo, Priority, Todo, TodoStatus, UpdateTodo};
use taskhive_core::repository::{PageRequest, TodoFilter};

use crate::error::ApiError;
use crate::extract::AuthUser;
use crate::response::{Envelope, PaginationMeta};
use crate::state::AppState;

/// Wire shape of a todo. Field names match the original API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    pub id: Uuid,
    pub user: Uuid,
    pub title: String,
    pub description: String,
    pub status: TodoStatus,
    pub priority: Priority,
    pub category: String,
    pub tags: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub reminder: Option<DateTime<Utc>>,
    pub is_archived: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            user: todo.user_id,
            title: todo.title,
            description: todo.description,
            status: todo.status,
            priority: todo.priority,
            category: todo.category,
            tags: todo.tags,
            due_date: todo.due_date,
            reminder: todo.reminder,
            is_archived: todo.is_archived,
            completed_at: todo.completed_at,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<String>,
    pub reminder: Option<String>,
}

/// Distinguishes an absent field from an explicit `null`: absent means
/// "leave unchanged", `null` means "clear".
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub reminder: Option<Option<String>>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub archived: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request("Invalid Todo ID"))
}

fn parse_status(raw: &str) -> Result<TodoStatus, ApiError> {
    TodoStatus::parse(raw).ok_or_else(|| ApiError::bad_request("Invalid status value"))
}

fn parse_priority(raw: &str) -> Result<Priority, ApiError> {
    Priority::parse(raw).ok_or_else(|| ApiError::bad_request("Invalid priority value"))
}

fn parse_date(field: &str, raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| ApiError::bad_request(format!("Invalid date for {field}")))
}

impl ListQuery {
    fn into_filter_and_page(self) -> (TodoFilter, PageRequest) {
        // Unknown enum values and junk numbers are ignored, not errors.
        let filter = TodoFilter {
            status: self.status.as_deref().and_then(TodoStatus::parse),
            priority: self.priority.as_deref().and_then(Priority::parse),
            category: self.category.filter(|c| !c.is_empty()),
            search: self.search.filter(|s| !s.is_empty()),
            archived: self.archived.as_deref() == Some("true"),
        };
        let page = PageRequest::normalized(
            self.page.and_then(|p| p.parse().ok()),
            self.limit.and_then(|l| l.parse().ok()),
        );
        (filter, page)
    }
}

/// POST /api/todos
pub async fn create_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Envelope<TodoDto>>), ApiError> {
    let title = req
        .title
        .ok_or_else(|| ApiError::bad_request("Title is required"))?;

    let input = CreateTodo {
        user_id,
        title,
        description: req.description,
        status: req.status.as_deref().map(parse_status).transpose()?,
        priority: req.priority.as_deref().map(parse_priority).transpose()?,
        category: req.category,
        tags: req.tags,
        due_date: req
            .due_date
            .as_deref()
            .map(|d| parse_date("dueDate", d))
            .transpose()?,
        reminder: req
            .reminder
            .as_deref()
            .map(|r| parse_date("reminder", r))
            .transpose()?,
    };

    let todo = state.todos.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Todo created successfully", todo.into())),
    ))
}

/// GET /api/todos
pub async fn list_todos(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<TodoDto>>>, ApiError> {
    let (filter, page) = query.into_filter_and_page();

    let result = state.todos.list(user_id, filter, page).await?;
    let meta = PaginationMeta::from_result(&result);
    let items: Vec<TodoDto> = result.items.into_iter().map(Into::into).collect();

    Ok(Json(Envelope::with_meta(
        "Todos fetched successfully",
        items,
        meta,
    )))
}

/// GET /api/todos/analytics
pub async fn analytics(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<TodoAnalytics>>, ApiError> {
    let analytics = state.todos.analytics(user_id).await?;
    Ok(Json(Envelope::ok(
        "Analytics fetched successfully",
        analytics,
    )))
}

/// GET /api/todos/{id}
pub async fn get_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Envelope<TodoDto>>, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.todos.get(user_id, id).await?;
    Ok(Json(Envelope::ok("Todo fetched successfully", todo.into())))
}

/// PUT /api/todos/{id}
pub async fn update_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateTodoRequest>,
) -> Result<Json<Envelope<TodoDto>>, ApiError> {
    let id = parse_id(&id)?;

    let input = UpdateTodo {
        title: req.title,
        description: req.description,
        status: req.status.as_deref().map(parse_status).transpose()?,
        priority: req.priority.as_deref().map(parse_priority).transpose()?,
        category: req.category,
        tags: req.tags,
        due_date: match req.due_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(Some(parse_date("dueDate", &raw)?)),
        },
        reminder: match req.reminder {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(Some(parse_date("reminder", &raw)?)),
        },
        is_archived: req.is_archived,
        completed_at: None,
    };

    let todo = state.todos.update(user_id, id, input).await?;
    Ok(Json(Envelope::ok("Todo updated successfully", todo.into())))
}

/// DELETE /api/todos/{id} — soft delete.
pub async fn archive_todo(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Envelope<TodoDto>>, ApiError> {
    let id = parse_id(&id)?;
    let todo = state.todos.archive(user_id, id).await?;
    Ok(Json(Envelope::ok("Todo archived successfully", todo.into())))
}

/// DELETE /api/todos/permanent/{id} — hard delete.
pub async fn delete_todo_permanently(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Envelope<TodoDto>>, ApiError> {
    let id = parse_id(&id)?;
    state.todos.delete_permanently(user_id, id).await?;
    Ok(Json(Envelope::message_only("Todo deleted permanently")))
}
