//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Todo repositories take a `user_id`
//! parameter on every read and write to enforce per-user isolation: an id
//! owned by someone else behaves exactly like an id that does not exist.

use uuid::Uuid;

use crate::error::TaskhiveResult;
use crate::models::{
    analytics::TodoAnalytics,
    todo::{CreateTodo, Priority, Todo, TodoStatus, UpdateTodo},
    user::{CreateUser, User},
};

/// Default number of items per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Normalized pagination parameters for list queries.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Build from raw query values: page floored at 1, limit defaulted and
    /// clamped to [`MAX_PAGE_SIZE`].
    pub fn normalized(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: PageRequest) -> Self {
        Self {
            items,
            total,
            page: page.page,
            limit: page.limit,
            total_pages: total.div_ceil(u64::from(page.limit)),
        }
    }
}

/// Filters for the todo listing query.
///
/// `status` and `priority` are `None` both when unfiltered and when the
/// caller supplied an unknown value — unknown enum members are ignored, not
/// rejected.
#[derive(Debug, Clone, Default)]
pub struct TodoFilter {
    pub status: Option<TodoStatus>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    /// Case-insensitive substring matched against title OR description.
    pub search: Option<String>,
    /// `false` (the default) lists active todos only; `true` lists archived
    /// todos only.
    pub archived: bool,
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = TaskhiveResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = TaskhiveResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = TaskhiveResult<User>> + Send;
    fn get_by_refresh_token_hash(
        &self,
        token_hash: &str,
    ) -> impl Future<Output = TaskhiveResult<User>> + Send;
    /// Rotate (`Some`) or clear (`None`) the stored refresh token hash.
    fn set_refresh_token_hash(
        &self,
        id: Uuid,
        token_hash: Option<String>,
    ) -> impl Future<Output = TaskhiveResult<()>> + Send;
}

pub trait TodoRepository: Send + Sync {
    fn create(&self, input: CreateTodo) -> impl Future<Output = TaskhiveResult<Todo>> + Send;
    fn get_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = TaskhiveResult<Todo>> + Send;
    fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateTodo,
    ) -> impl Future<Output = TaskhiveResult<Todo>> + Send;
    /// Soft delete: marks the record archived and returns it.
    fn archive(&self, user_id: Uuid, id: Uuid)
    -> impl Future<Output = TaskhiveResult<Todo>> + Send;
    /// Hard delete: removes the record entirely.
    fn delete(&self, user_id: Uuid, id: Uuid) -> impl Future<Output = TaskhiveResult<()>> + Send;
    fn list(
        &self,
        user_id: Uuid,
        filter: TodoFilter,
        page: PageRequest,
    ) -> impl Future<Output = TaskhiveResult<PaginatedResult<Todo>>> + Send;
    /// Single-scan facet aggregation over the user's todos.
    fn analytics(
        &self,
        user_id: Uuid,
    ) -> impl Future<Output = TaskhiveResult<TodoAnalytics>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_and_floors() {
        let p = PageRequest::normalized(None, None);
        assert_eq!((p.page, p.limit), (1, DEFAULT_PAGE_SIZE));

        let p = PageRequest::normalized(Some(0), Some(0));
        assert_eq!((p.page, p.limit), (1, 1));
    }

    #[test]
    fn limit_is_clamped() {
        let p = PageRequest::normalized(Some(3), Some(10_000));
        assert_eq!(p.limit, MAX_PAGE_SIZE);
        assert_eq!(p.offset(), 2 * u64::from(MAX_PAGE_SIZE));
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        let page = PageRequest { page: 2, limit: 5 };
        let r: PaginatedResult<u32> = PaginatedResult::new(vec![], 12, page);
        assert_eq!(r.total_pages, 3);

        let r: PaginatedResult<u32> = PaginatedResult::new(vec![], 0, page);
        assert_eq!(r.total_pages, 0);
    }
}
