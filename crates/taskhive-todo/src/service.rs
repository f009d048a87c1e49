//! Todo service — mutation, query, and analytics orchestration.

use chrono::Utc;
use taskhive_core::error::TaskhiveResult;
use taskhive_core::models::analytics::TodoAnalytics;
use taskhive_core::models::todo::{CreateTodo, Todo, UpdateTodo};
use taskhive_core::repository::{PageRequest, PaginatedResult, TodoFilter, TodoRepository};
use uuid::Uuid;

use crate::lifecycle;
use crate::validate;

/// Todo service.
///
/// Generic over the repository implementation so the lifecycle rules can
/// be exercised against any store.
pub struct TodoService<T: TodoRepository> {
    todo_repo: T,
}

impl<T: TodoRepository> TodoService<T> {
    pub fn new(todo_repo: T) -> Self {
        Self { todo_repo }
    }

    /// Validate, normalize, and persist a new todo owned by the caller.
    pub async fn create(&self, mut input: CreateTodo) -> TaskhiveResult<Todo> {
        input.title = validate::new_title(&input.title)?;
        input.description = input
            .description
            .map(|d| validate::description(&d))
            .transpose()?;
        input.category = input.category.map(|c| c.trim().to_string());
        input.tags = input.tags.map(validate::tags);

        self.todo_repo.create(input).await
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> TaskhiveResult<Todo> {
        self.todo_repo.get_by_id(user_id, id).await
    }

    /// Apply an allow-listed partial update to a caller-owned todo.
    ///
    /// A status change derives `completed_at` through
    /// [`lifecycle::completed_at_transition`]; whatever the caller put in
    /// `completed_at` is discarded first.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        mut input: UpdateTodo,
    ) -> TaskhiveResult<Todo> {
        input.completed_at = None;

        input.title = input
            .title
            .map(|t| validate::updated_title(&t))
            .transpose()?;
        input.description = input
            .description
            .map(|d| validate::description(&d))
            .transpose()?;
        input.category = input.category.map(|c| c.trim().to_string());
        input.tags = input.tags.map(validate::tags);

        if let Some(next_status) = input.status {
            let existing = self.todo_repo.get_by_id(user_id, id).await?;
            input.completed_at =
                lifecycle::completed_at_transition(existing.status, next_status, Utc::now());
        }

        self.todo_repo.update(user_id, id, input).await
    }

    /// Soft delete: archive the todo, keeping it fetchable by id.
    pub async fn archive(&self, user_id: Uuid, id: Uuid) -> TaskhiveResult<Todo> {
        self.todo_repo.archive(user_id, id).await
    }

    /// Hard delete: remove the record permanently.
    pub async fn delete_permanently(&self, user_id: Uuid, id: Uuid) -> TaskhiveResult<()> {
        self.todo_repo.delete(user_id, id).await
    }

    pub async fn list(
        &self,
        user_id: Uuid,
        filter: TodoFilter,
        page: PageRequest,
    ) -> TaskhiveResult<PaginatedResult<Todo>> {
        self.todo_repo.list(user_id, filter, page).await
    }

    pub async fn analytics(&self, user_id: Uuid) -> TaskhiveResult<TodoAnalytics> {
        self.todo_repo.analytics(user_id).await
    }
}
