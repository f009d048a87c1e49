//! Input validation for todo mutations.

use taskhive_core::error::{TaskhiveError, TaskhiveResult};

/// Minimum title length after trimming.
pub const TITLE_MIN: usize = 3;
/// Maximum title length after trimming.
pub const TITLE_MAX: usize = 100;
/// Maximum description length after trimming.
pub const DESCRIPTION_MAX: usize = 500;

fn validation(message: impl Into<String>) -> TaskhiveError {
    TaskhiveError::Validation {
        message: message.into(),
    }
}

/// Trim and bound-check a title for create.
pub fn new_title(raw: &str) -> TaskhiveResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(validation("Title is required"));
    }
    let len = title.chars().count();
    if !(TITLE_MIN..=TITLE_MAX).contains(&len) {
        return Err(validation(format!(
            "Title must be between {TITLE_MIN} and {TITLE_MAX} characters"
        )));
    }
    Ok(title.to_string())
}

/// Trim a title supplied on update; only emptiness is rejected.
pub fn updated_title(raw: &str) -> TaskhiveResult<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(validation("Title cannot be empty"));
    }
    Ok(title.to_string())
}

/// Trim and bound-check a description.
pub fn description(raw: &str) -> TaskhiveResult<String> {
    let description = raw.trim();
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(validation(format!(
            "Description cannot exceed {DESCRIPTION_MAX} characters"
        )));
    }
    Ok(description.to_string())
}

/// Trim each tag, dropping tags that trim to nothing.
pub fn tags(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_title_is_trimmed() {
        assert_eq!(new_title("  Buy milk  ").unwrap(), "Buy milk");
    }

    #[test]
    fn new_title_enforces_bounds_after_trim() {
        assert!(new_title("").is_err());
        assert!(new_title("   ").is_err());
        assert!(new_title("ab").is_err());
        assert!(new_title("  ab  ").is_err());
        assert!(new_title(&"x".repeat(101)).is_err());
        assert!(new_title(&"x".repeat(100)).is_ok());
        assert!(new_title("abc").is_ok());
    }

    #[test]
    fn updated_title_only_rejects_empty() {
        assert!(updated_title("   ").is_err());
        assert_eq!(updated_title(" ok ").unwrap(), "ok");
    }

    #[test]
    fn description_bound() {
        assert!(description(&"y".repeat(501)).is_err());
        assert_eq!(description(&"y".repeat(500)).unwrap().len(), 500);
        assert_eq!(description("  hi  ").unwrap(), "hi");
    }

    #[test]
    fn tags_are_trimmed_and_empties_dropped() {
        let cleaned = tags(vec![" a ".into(), "".into(), "  ".into(), "b".into()]);
        assert_eq!(cleaned, vec!["a".to_string(), "b".to_string()]);
    }
}
