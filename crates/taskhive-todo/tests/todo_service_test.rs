//! Integration tests for the todo service using in-memory SurrealDB.

use taskhive_core::error::TaskhiveError;
use taskhive_core::models::todo::{CreateTodo, Priority, TodoStatus, UpdateTodo};
use taskhive_core::repository::{PageRequest, TodoFilter};
use taskhive_db::repository::SurrealTodoRepository;
use taskhive_todo::TodoService;

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> TodoService<SurrealTodoRepository<surrealdb::engine::local::Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    taskhive_db::run_migrations(&db).await.unwrap();
    TodoService::new(SurrealTodoRepository::new(db))
}

fn new_todo(user_id: Uuid, title: &str) -> CreateTodo {
    CreateTodo {
        user_id,
        title: title.into(),
        description: None,
        status: None,
        priority: None,
        category: None,
        tags: None,
        due_date: None,
        reminder: None,
    }
}

#[tokio::test]
async fn create_trims_and_defaults() {
    let svc = setup().await;
    let owner = Uuid::new_v4();

    let todo = svc
        .create(CreateTodo {
            description: Some("  with whitespace  ".into()),
            tags: Some(vec![" home ".into(), " ".into()]),
            ..new_todo(owner, "  Buy milk  ")
        })
        .await
        .unwrap();

    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description, "with whitespace");
    assert_eq!(todo.tags, vec!["home".to_string()]);
    assert_eq!(todo.status, TodoStatus::Pending);
    assert_eq!(todo.priority, Priority::Medium);
    assert_eq!(todo.category, "general");
}

#[tokio::test]
async fn create_rejects_bad_titles() {
    let svc = setup().await;
    let owner = Uuid::new_v4();

    for bad in ["", "  ", "ab", &"x".repeat(101)] {
        let result = svc.create(new_todo(owner, bad)).await;
        assert!(
            matches!(result, Err(TaskhiveError::Validation { .. })),
            "expected validation error for title {bad:?}"
        );
    }
}

#[tokio::test]
async fn completing_a_todo_stamps_completed_at() {
    let svc = setup().await;
    let owner = Uuid::new_v4();
    let todo = svc.create(new_todo(owner, "Write report")).await.unwrap();

    let done = svc
        .update(
            owner,
            todo.id,
            UpdateTodo {
                status: Some(TodoStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(done.status, TodoStatus::Completed);
    assert!(done.completed_at.is_some());

    // Moving away from completed clears the stamp.
    let reopened = svc
        .update(
            owner,
            todo.id,
            UpdateTodo {
                status: Some(TodoStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(reopened.completed_at.is_none());
}

#[tokio::test]
async fn caller_supplied_completed_at_is_ignored() {
    let svc = setup().await;
    let owner = Uuid::new_v4();
    let todo = svc.create(new_todo(owner, "Sneaky update")).await.unwrap();

    // completed_at without a status change is discarded entirely.
    let updated = svc
        .update(
            owner,
            todo.id,
            UpdateTodo {
                completed_at: Some(Some(chrono::Utc::now())),
                title: Some("Sneaky update 2".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.completed_at.is_none());
    assert_eq!(updated.status, TodoStatus::Pending);
}

#[tokio::test]
async fn repeated_status_write_keeps_original_stamp() {
    let svc = setup().await;
    let owner = Uuid::new_v4();
    let todo = svc.create(new_todo(owner, "Idempotent done")).await.unwrap();

    let first = svc
        .update(
            owner,
            todo.id,
            UpdateTodo {
                status: Some(TodoStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Writing `completed` again is not a transition.
    let second = svc
        .update(
            owner,
            todo.id,
            UpdateTodo {
                status: Some(TodoStatus::Completed),
                priority: Some(Priority::Low),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(first.completed_at, second.completed_at);
}

#[tokio::test]
async fn update_rejects_empty_title() {
    let svc = setup().await;
    let owner = Uuid::new_v4();
    let todo = svc.create(new_todo(owner, "Valid title")).await.unwrap();

    let result = svc
        .update(
            owner,
            todo.id,
            UpdateTodo {
                title: Some("   ".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(TaskhiveError::Validation { .. })));
}

#[tokio::test]
async fn ownership_is_opaque_to_non_owners() {
    let svc = setup().await;
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let todo = svc.create(new_todo(owner, "Not yours")).await.unwrap();

    assert!(matches!(
        svc.get(stranger, todo.id).await,
        Err(TaskhiveError::NotFound { .. })
    ));
    assert!(matches!(
        svc.update(stranger, todo.id, UpdateTodo::default()).await,
        Err(TaskhiveError::NotFound { .. })
    ));
    assert!(matches!(
        svc.archive(stranger, todo.id).await,
        Err(TaskhiveError::NotFound { .. })
    ));
    assert!(matches!(
        svc.delete_permanently(stranger, todo.id).await,
        Err(TaskhiveError::NotFound { .. })
    ));
}

/// Create, complete, then archive a todo, checking visibility at each step.
#[tokio::test]
async fn full_lifecycle_walkthrough() {
    let svc = setup().await;
    let owner = Uuid::new_v4();

    let created = svc.create(new_todo(owner, "Buy milk")).await.unwrap();
    assert_eq!(created.status, TodoStatus::Pending);
    assert_eq!(created.priority, Priority::Medium);
    assert_eq!(created.category, "general");
    assert!(!created.is_archived);

    let completed = svc
        .update(
            owner,
            created.id,
            UpdateTodo {
                status: Some(TodoStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.status, TodoStatus::Completed);
    assert!(completed.completed_at.is_some());

    let archived = svc.archive(owner, created.id).await.unwrap();
    assert!(archived.is_archived);

    // Still fetchable by id.
    assert!(svc.get(owner, created.id).await.is_ok());

    // Absent from the default listing, present in the archived one.
    let active = svc
        .list(owner, TodoFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert!(active.items.is_empty());

    let shelved = svc
        .list(
            owner,
            TodoFilter {
                archived: true,
                ..Default::default()
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(shelved.items.len(), 1);
    assert_eq!(shelved.items[0].id, created.id);
}
