//! Status transition rules.

use chrono::{DateTime, Utc};
use taskhive_core::models::todo::TodoStatus;

/// Derive the `completed_at` change for a status transition.
///
/// Returns `None` when the status is unchanged (leave `completed_at`
/// alone), `Some(Some(now))` when the todo moves into `completed`, and
/// `Some(None)` when it moves anywhere else. The caller's own
/// `completed_at` input is never consulted — this function is the only
/// writer of that field.
pub fn completed_at_transition(
    previous: TodoStatus,
    next: TodoStatus,
    now: DateTime<Utc>,
) -> Option<Option<DateTime<Utc>>> {
    if previous == next {
        return None;
    }
    match next {
        TodoStatus::Completed => Some(Some(now)),
        _ => Some(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_status_leaves_completed_at_alone() {
        let now = Utc::now();
        assert_eq!(
            completed_at_transition(TodoStatus::Pending, TodoStatus::Pending, now),
            None
        );
        assert_eq!(
            completed_at_transition(TodoStatus::Completed, TodoStatus::Completed, now),
            None
        );
    }

    #[test]
    fn entering_completed_stamps_now() {
        let now = Utc::now();
        assert_eq!(
            completed_at_transition(TodoStatus::Pending, TodoStatus::Completed, now),
            Some(Some(now))
        );
        assert_eq!(
            completed_at_transition(TodoStatus::InProgress, TodoStatus::Completed, now),
            Some(Some(now))
        );
    }

    #[test]
    fn leaving_completed_clears_the_stamp() {
        let now = Utc::now();
        assert_eq!(
            completed_at_transition(TodoStatus::Completed, TodoStatus::Pending, now),
            Some(None)
        );
        assert_eq!(
            completed_at_transition(TodoStatus::Completed, TodoStatus::InProgress, now),
            Some(None)
        );
    }

    #[test]
    fn transitions_between_open_states_clear_too() {
        // Any status write that is not `completed` nulls the stamp.
        let now = Utc::now();
        assert_eq!(
            completed_at_transition(TodoStatus::Pending, TodoStatus::InProgress, now),
            Some(None)
        );
    }
}
