//! SurrealDB implementation of [`TodoRepository`].
//!
//! Every query is scoped to the owning user: an id owned by another user
//! yields the same not-found as an id that never existed.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use taskhive_core::error::TaskhiveResult;
use taskhive_core::models::analytics::{TodoAnalytics, TodoFacetRow};
use taskhive_core::models::todo::{CreateTodo, Priority, Todo, TodoStatus, UpdateTodo};
use taskhive_core::repository::{PageRequest, PaginatedResult, TodoFilter, TodoRepository};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct TodoRow {
    user_id: String,
    title: String,
    description: String,
    status: String,
    priority: String,
    category: String,
    tags: Vec<String>,
    due_date: Option<DateTime<Utc>>,
    reminder: Option<DateTime<Utc>>,
    is_archived: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct TodoRowWithId {
    record_id: String,
    user_id: String,
    title: String,
    description: String,
    status: String,
    priority: String,
    category: String,
    tags: Vec<String>,
    due_date: Option<DateTime<Utc>>,
    reminder: Option<DateTime<Utc>>,
    is_archived: bool,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Projection row for the analytics scan.
#[derive(Debug, SurrealValue)]
struct FacetRow {
    status: String,
    priority: String,
    category: String,
    is_archived: bool,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_status(s: &str) -> Result<TodoStatus, DbError> {
    TodoStatus::parse(s).ok_or_else(|| DbError::Decode(format!("unknown todo status: {s}")))
}

fn parse_priority(s: &str) -> Result<Priority, DbError> {
    Priority::parse(s).ok_or_else(|| DbError::Decode(format!("unknown todo priority: {s}")))
}

impl TodoRow {
    fn into_todo(self, id: Uuid) -> Result<Todo, DbError> {
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        Ok(Todo {
            id,
            user_id,
            title: self.title,
            description: self.description,
            status: parse_status(&self.status)?,
            priority: parse_priority(&self.priority)?,
            category: self.category,
            tags: self.tags,
            due_date: self.due_date,
            reminder: self.reminder,
            is_archived: self.is_archived,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TodoRowWithId {
    fn try_into_todo(self) -> Result<Todo, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let user_id = Uuid::parse_str(&self.user_id)
            .map_err(|e| DbError::Decode(format!("invalid user UUID: {e}")))?;
        Ok(Todo {
            id,
            user_id,
            title: self.title,
            description: self.description,
            status: parse_status(&self.status)?,
            priority: parse_priority(&self.priority)?,
            category: self.category,
            tags: self.tags,
            due_date: self.due_date,
            reminder: self.reminder,
            is_archived: self.is_archived,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl TryFrom<FacetRow> for TodoFacetRow {
    type Error = DbError;

    fn try_from(row: FacetRow) -> Result<Self, DbError> {
        Ok(TodoFacetRow {
            status: parse_status(&row.status)?,
            priority: parse_priority(&row.priority)?,
            category: row.category,
            is_archived: row.is_archived,
        })
    }
}

/// SurrealDB implementation of the Todo repository.
#[derive(Clone)]
pub struct SurrealTodoRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTodoRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> TodoRepository for SurrealTodoRepository<C> {
    async fn create(&self, input: CreateTodo) -> TaskhiveResult<Todo> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let status = input.status.unwrap_or_default();
        let priority = input.priority.unwrap_or_default();
        // The completed_at invariant holds from the first save.
        let completed_at = match status {
            TodoStatus::Completed => Some(Utc::now()),
            _ => None,
        };

        let result = self
            .db
            .query(
                "CREATE type::record('todo', $id) SET \
                 user_id = $user_id, \
                 title = $title, description = $description, \
                 status = $status, priority = $priority, \
                 category = $category, tags = $tags, \
                 due_date = $due_date, reminder = $reminder, \
                 is_archived = false, completed_at = $completed_at",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", input.user_id.to_string()))
            .bind(("title", input.title))
            .bind(("description", input.description.unwrap_or_default()))
            .bind(("status", status.as_str().to_string()))
            .bind(("priority", priority.as_str().to_string()))
            .bind((
                "category",
                input.category.unwrap_or_else(|| "general".to_string()),
            ))
            .bind(("tags", input.tags.unwrap_or_default()))
            .bind(("due_date", input.due_date))
            .bind(("reminder", input.reminder))
            .bind(("completed_at", completed_at))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TodoRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "todo".into(),
            id: id_str,
        })?;

        Ok(row.into_todo(id)?)
    }

    async fn get_by_id(&self, user_id: Uuid, id: Uuid) -> TaskhiveResult<Todo> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('todo', $id) \
                 WHERE user_id = $user_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TodoRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "todo".into(),
            id: id_str,
        })?;

        Ok(row.into_todo(id)?)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, input: UpdateTodo) -> TaskhiveResult<Todo> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.title.is_some() {
            sets.push("title = $title");
        }
        if input.description.is_some() {
            sets.push("description = $description");
        }
        if input.status.is_some() {
            sets.push("status = $status");
        }
        if input.priority.is_some() {
            sets.push("priority = $priority");
        }
        if input.category.is_some() {
            sets.push("category = $category");
        }
        if input.tags.is_some() {
            sets.push("tags = $tags");
        }
        if input.due_date.is_some() {
            sets.push("due_date = $due_date");
        }
        if input.reminder.is_some() {
            sets.push("reminder = $reminder");
        }
        if input.is_archived.is_some() {
            sets.push("is_archived = $is_archived");
        }
        if input.completed_at.is_some() {
            sets.push("completed_at = $completed_at");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('todo', $id) SET {} \
             WHERE user_id = $user_id",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("user_id", user_id.to_string()));

        if let Some(title) = input.title {
            builder = builder.bind(("title", title));
        }
        if let Some(description) = input.description {
            builder = builder.bind(("description", description));
        }
        if let Some(ref status) = input.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(ref priority) = input.priority {
            builder = builder.bind(("priority", priority.as_str().to_string()));
        }
        if let Some(category) = input.category {
            builder = builder.bind(("category", category));
        }
        if let Some(tags) = input.tags {
            builder = builder.bind(("tags", tags));
        }
        if let Some(due_date) = input.due_date {
            // Option<Option<_>>: Some(Some(v)) = set, Some(None) = clear
            builder = builder.bind(("due_date", due_date));
        }
        if let Some(reminder) = input.reminder {
            builder = builder.bind(("reminder", reminder));
        }
        if let Some(is_archived) = input.is_archived {
            builder = builder.bind(("is_archived", is_archived));
        }
        if let Some(completed_at) = input.completed_at {
            builder = builder.bind(("completed_at", completed_at));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<TodoRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "todo".into(),
            id: id_str,
        })?;

        Ok(row.into_todo(id)?)
    }

    async fn archive(&self, user_id: Uuid, id: Uuid) -> TaskhiveResult<Todo> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "UPDATE type::record('todo', $id) SET \
                 is_archived = true, updated_at = time::now() \
                 WHERE user_id = $user_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TodoRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "todo".into(),
            id: id_str,
        })?;

        Ok(row.into_todo(id)?)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> TaskhiveResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "DELETE type::record('todo', $id) \
                 WHERE user_id = $user_id RETURN BEFORE",
            )
            .bind(("id", id_str.clone()))
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TodoRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "todo".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn list(
        &self,
        user_id: Uuid,
        filter: TodoFilter,
        page: PageRequest,
    ) -> TaskhiveResult<PaginatedResult<Todo>> {
        let mut clauses = vec!["user_id = $user_id", "is_archived = $archived"];
        if filter.status.is_some() {
            clauses.push("status = $status");
        }
        if filter.priority.is_some() {
            clauses.push("priority = $priority");
        }
        if filter.category.is_some() {
            clauses.push("category = $category");
        }
        if filter.search.is_some() {
            clauses.push(
                "(string::contains(string::lowercase(title), $search) \
                 OR string::contains(string::lowercase(description), $search))",
            );
        }
        let where_clause = clauses.join(" AND ");

        let search = filter.search.as_ref().map(|s| s.to_lowercase());

        let count_query = format!(
            "SELECT count() AS total FROM todo WHERE {where_clause} GROUP ALL"
        );
        let mut count_builder = self
            .db
            .query(&count_query)
            .bind(("user_id", user_id.to_string()))
            .bind(("archived", filter.archived));
        if let Some(ref status) = filter.status {
            count_builder = count_builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(ref priority) = filter.priority {
            count_builder = count_builder.bind(("priority", priority.as_str().to_string()));
        }
        if let Some(ref category) = filter.category {
            count_builder = count_builder.bind(("category", category.clone()));
        }
        if let Some(ref search) = search {
            count_builder = count_builder.bind(("search", search.clone()));
        }
        let mut count_result = count_builder.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let page_query = format!(
            "SELECT meta::id(id) AS record_id, * FROM todo \
             WHERE {where_clause} \
             ORDER BY is_archived ASC, created_at DESC \
             LIMIT $limit START $offset"
        );
        let mut builder = self
            .db
            .query(&page_query)
            .bind(("user_id", user_id.to_string()))
            .bind(("archived", filter.archived))
            .bind(("limit", u64::from(page.limit)))
            .bind(("offset", page.offset()));
        if let Some(ref status) = filter.status {
            builder = builder.bind(("status", status.as_str().to_string()));
        }
        if let Some(ref priority) = filter.priority {
            builder = builder.bind(("priority", priority.as_str().to_string()));
        }
        if let Some(ref category) = filter.category {
            builder = builder.bind(("category", category.clone()));
        }
        if let Some(search) = search {
            builder = builder.bind(("search", search));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<TodoRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_todo())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult::new(items, total, page))
    }

    async fn analytics(&self, user_id: Uuid) -> TaskhiveResult<TodoAnalytics> {
        // One projection scan over the user's full collection; all
        // counters and breakdowns are folded from it in a single pass.
        let mut result = self
            .db
            .query(
                "SELECT status, priority, category, is_archived FROM todo \
                 WHERE user_id = $user_id",
            )
            .bind(("user_id", user_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FacetRow> = result.take(0).map_err(DbError::from)?;
        let facet_rows = rows
            .into_iter()
            .map(TodoFacetRow::try_from)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(TodoAnalytics::from_rows(facet_rows))
    }
}
