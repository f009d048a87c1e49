//! Shared application state handed to every handler.

use std::sync::Arc;

use surrealdb::engine::remote::ws::Client;
use taskhive_auth::{AuthConfig, AuthService};
use taskhive_db::repository::{SurrealTodoRepository, SurrealUserRepository};
use taskhive_todo::TodoService;

pub type UserRepo = SurrealUserRepository<Client>;
pub type TodoRepo = SurrealTodoRepository<Client>;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<UserRepo>>,
    pub todos: Arc<TodoService<TodoRepo>>,
    /// Kept alongside the services for stateless bearer validation in the
    /// extractor and for cookie lifetimes.
    pub auth_config: AuthConfig,
    pub cookie_secure: bool,
}
