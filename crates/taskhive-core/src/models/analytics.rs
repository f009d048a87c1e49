//! Analytics aggregates over a user's todo collection.
//!
//! The aggregation is a single pass: the store supplies one projection row
//! per todo and [`TodoAnalytics::from_rows`] folds every counter and
//! breakdown simultaneously. It is never decomposed into per-group count
//! queries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::todo::{Priority, TodoStatus};

/// Projection of the fields the aggregation needs, one row per todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoFacetRow {
    pub status: TodoStatus,
    pub priority: Priority,
    pub category: String,
    pub is_archived: bool,
}

/// One `(group key, count)` pair of a breakdown. Groups with zero members
/// are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoAnalytics {
    /// Non-archived todos.
    pub total: u64,
    /// Non-archived todos with status `completed`.
    pub completed: u64,
    /// Archived todos across the user's full collection.
    pub archived: u64,
    /// `completed / total * 100`, rounded to two decimals; `0` when
    /// `total == 0`.
    pub completion_rate: f64,
    pub by_status: Vec<GroupCount>,
    pub by_priority: Vec<GroupCount>,
    pub by_category: Vec<GroupCount>,
}

impl TodoAnalytics {
    /// Fold the projection rows into the full aggregate in one pass.
    ///
    /// Archived rows feed only the `archived` counter; every other figure
    /// is scoped to the active (non-archived) collection.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = TodoFacetRow>,
    {
        let mut total: u64 = 0;
        let mut completed: u64 = 0;
        let mut archived: u64 = 0;
        let mut by_status: BTreeMap<&'static str, u64> = BTreeMap::new();
        let mut by_priority: BTreeMap<&'static str, u64> = BTreeMap::new();
        let mut by_category: BTreeMap<String, u64> = BTreeMap::new();

        for row in rows {
            if row.is_archived {
                archived += 1;
                continue;
            }
            total += 1;
            if row.status == TodoStatus::Completed {
                completed += 1;
            }
            *by_status.entry(row.status.as_str()).or_insert(0) += 1;
            *by_priority.entry(row.priority.as_str()).or_insert(0) += 1;
            *by_category.entry(row.category).or_insert(0) += 1;
        }

        let completion_rate = if total == 0 {
            0.0
        } else {
            let rate = completed as f64 / total as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        };

        TodoAnalytics {
            total,
            completed,
            archived,
            completion_rate,
            by_status: collect_counts(by_status.into_iter().map(|(k, v)| (k.to_string(), v))),
            by_priority: collect_counts(by_priority.into_iter().map(|(k, v)| (k.to_string(), v))),
            by_category: collect_counts(by_category),
        }
    }
}

fn collect_counts<I>(groups: I) -> Vec<GroupCount>
where
    I: IntoIterator<Item = (String, u64)>,
{
    groups
        .into_iter()
        .map(|(key, count)| GroupCount { key, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: TodoStatus, priority: Priority, category: &str, archived: bool) -> TodoFacetRow {
        TodoFacetRow {
            status,
            priority,
            category: category.into(),
            is_archived: archived,
        }
    }

    #[test]
    fn empty_collection_yields_zero_rate() {
        let a = TodoAnalytics::from_rows([]);
        assert_eq!(a.total, 0);
        assert_eq!(a.completed, 0);
        assert_eq!(a.archived, 0);
        assert_eq!(a.completion_rate, 0.0);
        assert!(a.by_status.is_empty());
        assert!(a.by_category.is_empty());
    }

    #[test]
    fn status_breakdown_sums_to_total() {
        let a = TodoAnalytics::from_rows([
            row(TodoStatus::Pending, Priority::Low, "work", false),
            row(TodoStatus::Pending, Priority::High, "work", false),
            row(TodoStatus::InProgress, Priority::Medium, "home", false),
            row(TodoStatus::Completed, Priority::Medium, "home", false),
            row(TodoStatus::Completed, Priority::High, "work", true),
        ]);
        assert_eq!(a.total, 4);
        let sum: u64 = a.by_status.iter().map(|g| g.count).sum();
        assert_eq!(sum, a.total);
    }

    #[test]
    fn archived_rows_count_only_toward_archived() {
        let a = TodoAnalytics::from_rows([
            row(TodoStatus::Completed, Priority::Low, "work", true),
            row(TodoStatus::Pending, Priority::Low, "work", false),
        ]);
        assert_eq!(a.archived, 1);
        assert_eq!(a.total, 1);
        assert_eq!(a.completed, 0);
        // The archived completed todo must not appear in any breakdown.
        assert_eq!(a.by_status, vec![GroupCount { key: "pending".into(), count: 1 }]);
    }

    #[test]
    fn completion_rate_rounds_to_two_decimals() {
        // 1 of 3 completed -> 33.333... -> 33.33
        let a = TodoAnalytics::from_rows([
            row(TodoStatus::Completed, Priority::Low, "a", false),
            row(TodoStatus::Pending, Priority::Low, "a", false),
            row(TodoStatus::Pending, Priority::Low, "a", false),
        ]);
        assert_eq!(a.completion_rate, 33.33);
    }

    #[test]
    fn zero_member_groups_are_omitted() {
        let a = TodoAnalytics::from_rows([row(
            TodoStatus::Pending,
            Priority::High,
            "errands",
            false,
        )]);
        assert_eq!(a.by_priority.len(), 1);
        assert_eq!(a.by_priority[0].key, "high");
        assert_eq!(a.by_category.len(), 1);
    }
}
