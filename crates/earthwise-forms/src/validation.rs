//! Rule-based field validation.
//!
//! A [`ValidationRule`] describes what one field must look like; a
//! [`FormValidator`] owns the rule set of a form and evaluates whole
//! records against it. Each field yields at most one message per pass:
//! checks run in the order required, length/bounds, semantic format
//! (email, phone, url), pattern, custom, and the first failure wins.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ValidationErrors};
use crate::value::{is_empty, FieldValue, FormData};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[1-9][0-9]{0,15}$").expect("phone regex"));

/// Caller-supplied final check. Returning `Some(message)` fails the field.
pub type CustomCheck = Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Declarative constraints for one named field.
#[derive(Clone, Default)]
pub struct ValidationRule {
    /// The field must hold a non-empty value.
    pub required: bool,
    /// Minimum character count (strings) or element count (arrays).
    pub min_length: Option<usize>,
    /// Maximum character count (strings) or element count (arrays).
    pub max_length: Option<usize>,
    /// Inclusive lower bound for numbers.
    pub min: Option<f64>,
    /// Inclusive upper bound for numbers.
    pub max: Option<f64>,
    /// Strings must match this pattern somewhere.
    pub pattern: Option<Regex>,
    /// Strings must look like an email address.
    pub email: bool,
    /// Strings must look like a phone number.
    pub phone: bool,
    /// Strings must parse as an absolute URL.
    pub url: bool,
    /// Final check, run only when every built-in check passed.
    pub custom: Option<CustomCheck>,
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("url", &self.url)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl ValidationRule {
    /// Creates a rule with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the field required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Makes the field optional again.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the minimum length.
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum length.
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Sets both length bounds.
    #[must_use]
    pub fn length(self, min: usize, max: usize) -> Self {
        self.min_length(min).max_length(max)
    }

    /// Sets the numeric lower bound.
    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the numeric upper bound.
    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Compiles and sets a pattern.
    pub fn pattern(self, pattern: &str) -> Result<Self> {
        Ok(self.with_pattern(Regex::new(pattern)?))
    }

    /// Sets an already compiled pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Requires an email address.
    #[must_use]
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Requires a phone number.
    #[must_use]
    pub fn phone(mut self) -> Self {
        self.phone = true;
        self
    }

    /// Requires an absolute URL.
    #[must_use]
    pub fn url(mut self) -> Self {
        self.url = true;
        self
    }

    /// Sets the custom check.
    #[must_use]
    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }

    // Zero length bounds are treated as unset.
    fn min_length_bound(&self) -> Option<usize> {
        self.min_length.filter(|&n| n > 0)
    }

    fn max_length_bound(&self) -> Option<usize> {
        self.max_length.filter(|&n| n > 0)
    }
}

/// Outcome of validating a whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    /// One message per failing field.
    pub errors: ValidationErrors,
}

/// Evaluates records against a rule set.
///
/// The validator also remembers the errors of its last [`validate`] pass so
/// callers can query them field by field.
///
/// [`validate`]: FormValidator::validate
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    rules: IndexMap<String, ValidationRule>,
    errors: ValidationErrors,
}

impl FormValidator {
    /// Creates a validator without rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator from a rule set.
    pub fn with_rules<I, K>(rules: I) -> Self
    where
        I: IntoIterator<Item = (K, ValidationRule)>,
        K: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(|(k, r)| (k.into(), r)).collect(),
            errors: ValidationErrors::new(),
        }
    }

    /// Adds (or replaces) the rule for a field.
    #[must_use]
    pub fn add_rule(mut self, field: impl Into<String>, rule: ValidationRule) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    /// Returns the rule declared for a field.
    pub fn rule(&self, field: &str) -> Option<&ValidationRule> {
        self.rules.get(field)
    }

    /// Returns whether any rule is declared.
    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    /// Validates every field of the rule set against `data`.
    ///
    /// Fields present in `data` without a rule are ignored; fields with a
    /// rule but missing from `data` are validated as null.
    pub fn validate(&mut self, data: &FormData) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        for (field, rule) in &self.rules {
            let value = data.get(field).unwrap_or(&Value::Null);
            if let Some(message) = Self::validate_field(field, value, rule) {
                errors.insert(field.as_str(), message);
            }
        }

        debug!(
            fields = self.rules.len(),
            failed = errors.len(),
            "validated form data"
        );

        self.errors = errors.clone();
        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Validates a value for a named field using its declared rule.
    ///
    /// Returns `None` when the field has no rule.
    pub fn validate_named(&self, field: &str, value: &FieldValue) -> Option<String> {
        self.rules
            .get(field)
            .and_then(|rule| Self::validate_field(field, value, rule))
    }

    /// Validates one value against one rule.
    pub fn validate_field(field: &str, value: &FieldValue, rule: &ValidationRule) -> Option<String> {
        let name = humanize_field_name(field);

        if is_empty(value) {
            return rule.required.then(|| format!("{name} is required"));
        }

        let builtin = match value {
            Value::String(s) => check_string(&name, s, rule),
            Value::Number(n) => n.as_f64().and_then(|n| check_number(&name, n, rule)),
            Value::Array(items) => check_array(&name, items.len(), rule),
            _ => None,
        };
        if builtin.is_some() {
            return builtin;
        }

        rule.custom.as_ref().and_then(|check| check(value))
    }

    /// Returns the error recorded for a field by the last pass.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Returns whether the last pass recorded an error for a field.
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains(field)
    }

    /// Returns the errors of the last pass.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Forgets the errors of the last pass.
    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Forgets the last-pass error of a single field.
    pub fn clear_field_error(&mut self, field: &str) {
        self.errors.remove(field);
    }
}

fn check_string(name: &str, value: &str, rule: &ValidationRule) -> Option<String> {
    let chars = value.chars().count();

    if let Some(min) = rule.min_length_bound() {
        if chars < min {
            return Some(format!("{name} must be at least {min} characters"));
        }
    }
    if let Some(max) = rule.max_length_bound() {
        if chars > max {
            return Some(format!("{name} must not exceed {max} characters"));
        }
    }
    if rule.email && !is_valid_email(value) {
        return Some(format!("{name} must be a valid email address"));
    }
    if rule.phone && !is_valid_phone(value) {
        return Some(format!("{name} must be a valid phone number"));
    }
    if rule.url && !is_valid_url(value) {
        return Some(format!("{name} must be a valid URL"));
    }
    if let Some(pattern) = &rule.pattern {
        if !pattern.is_match(value) {
            return Some(format!("{name} format is invalid"));
        }
    }
    None
}

fn check_number(name: &str, value: f64, rule: &ValidationRule) -> Option<String> {
    if let Some(min) = rule.min {
        if value < min {
            return Some(format!("{name} must be at least {min}"));
        }
    }
    if let Some(max) = rule.max {
        if value > max {
            return Some(format!("{name} must not exceed {max}"));
        }
    }
    None
}

fn check_array(name: &str, len: usize, rule: &ValidationRule) -> Option<String> {
    if let Some(min) = rule.min_length_bound() {
        if len < min {
            return Some(format!("{name} must have at least {min} items"));
        }
    }
    if let Some(max) = rule.max_length_bound() {
        if len > max {
            return Some(format!("{name} must not have more than {max} items"));
        }
    }
    None
}

/// Turns a camelCase field name into a label: `enquiryType` → `Enquiry Type`.
pub fn humanize_field_name(field: &str) -> String {
    let mut spaced = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }

    let mut chars = spaced.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    capitalized.trim().to_string()
}

/// Returns whether a string has the shape `local@domain.tld` without whitespace.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Returns whether a string is a phone number once spaces, hyphens and
/// parentheses are removed.
pub fn is_valid_phone(value: &str) -> bool {
    let digits: String = value
        .chars()
        .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
        .collect();
    PHONE_RE.is_match(&digits)
}

/// Returns whether a string parses as an absolute URL.
pub fn is_valid_url(value: &str) -> bool {
    url::Url::parse(value).is_ok()
}

/// Validates an anonymous value against a rule.
pub fn validate_value(value: &FieldValue, rule: &ValidationRule) -> Option<String> {
    FormValidator::validate_field("field", value, rule)
}
