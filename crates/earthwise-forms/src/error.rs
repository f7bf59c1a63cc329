//! Error types for forms.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// Form-specific errors.
///
/// Field validation failures are not errors in this sense: they are plain
/// messages collected in [`ValidationErrors`].
#[derive(Debug, Error)]
pub enum FormError {
    /// A rule was built from a pattern that is not a valid regex.
    #[error("invalid pattern for rule: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Validation errors keyed by field name, at most one message per field.
///
/// Entries keep the order in which fields first failed, which for a full
/// pass is the order the rules were declared in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: IndexMap<String, String>,
}

impl ValidationErrors {
    /// Creates a new empty ValidationErrors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the error for a field, replacing any previous message in place.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    /// Removes the error for a field.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.errors.shift_remove(field)
    }

    /// Returns whether there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error for a specific field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Returns whether a field has an error entry.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over `(field, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }

    /// Returns all messages in insertion order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.values().map(String::as_str).collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.errors.clear();
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (field, message) in &self.errors {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_message() {
        let mut errors = ValidationErrors::new();
        errors.insert("email", "Email is required");
        errors.insert("email", "Email must be a valid email address");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("email"),
            Some("Email must be a valid email address")
        );
    }

    #[test]
    fn test_remove_and_display() {
        let mut errors = ValidationErrors::new();
        errors.insert("name", "Name is required");
        errors.insert("subject", "Subject is required");

        assert_eq!(errors.remove("name").as_deref(), Some("Name is required"));
        assert!(!errors.contains("name"));
        assert_eq!(errors.to_string(), "subject: Subject is required\n");
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut errors = ValidationErrors::new();
        errors.insert("subject", "Subject is required");
        errors.insert("email", "Email is required");
        errors.insert("company", "Company must be at least 2 characters");
        errors.insert("email", "Email must be a valid email address");

        assert_eq!(
            errors.messages(),
            [
                "Subject is required",
                "Email must be a valid email address",
                "Company must be at least 2 characters",
            ]
        );

        errors.remove("subject");
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, ["email", "company"]);
    }
}
