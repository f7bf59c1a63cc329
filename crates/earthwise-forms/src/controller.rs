//! Form state controller.
//!
//! A [`FormController`] owns the values, errors and touched flags of one
//! form instance and decides when the validator runs: on change (once a
//! field has been touched), on blur, and before every submit. Field
//! renderers read from it by field name, so it doubles as the form context.
//!
//! The controller is single-threaded: state lives in `RefCell`s and all
//! operations take `&self`, which lets a submit future be in flight while
//! other events reach the same form.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::future::Future;

use tracing::{debug, error};

use crate::error::ValidationErrors;
use crate::validation::FormValidator;
use crate::value::{has_content, FieldValue, FormData};

/// Options controlling when validation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    /// Re-validate a touched field whenever its value changes.
    pub validate_on_change: bool,
    /// Validate a field when it loses focus.
    pub validate_on_blur: bool,
    /// Restore the initial values after a successful, valid submit.
    pub reset_on_submit: bool,
    /// Ignore every change, blur and submit.
    pub disabled: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            validate_on_blur: true,
            reset_on_submit: false,
            disabled: false,
        }
    }
}

impl FormConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `validate_on_change`.
    #[must_use]
    pub fn validate_on_change(mut self, enabled: bool) -> Self {
        self.validate_on_change = enabled;
        self
    }

    /// Sets `validate_on_blur`.
    #[must_use]
    pub fn validate_on_blur(mut self, enabled: bool) -> Self {
        self.validate_on_blur = enabled;
        self
    }

    /// Sets `reset_on_submit`.
    #[must_use]
    pub fn reset_on_submit(mut self, enabled: bool) -> Self {
        self.reset_on_submit = enabled;
        self
    }

    /// Sets `disabled`.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// What happened to one call of [`FormController::handle_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was disabled or a submission was already in flight.
    Skipped,
    /// The handler resolved.
    Completed {
        /// Validity passed to the handler.
        valid: bool,
    },
    /// The handler rejected; the failure has been logged.
    Failed {
        /// Validity passed to the handler.
        valid: bool,
        /// The handler's error, rendered.
        message: String,
    },
}

/// Form-level banner shown above the fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStatus {
    /// Nothing to report.
    Idle,
    /// Some data was entered and these errors are outstanding.
    Errors(Vec<String>),
    /// Data was entered and the form is valid.
    Ready,
}

#[derive(Debug, Default)]
struct FormState {
    data: FormData,
    errors: ValidationErrors,
    touched: BTreeSet<String>,
}

/// Clears the in-flight flag on every exit path, unwinding included.
struct SubmittingGuard<'a>(&'a Cell<bool>);

impl<'a> SubmittingGuard<'a> {
    fn engage(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Mutable lifecycle of one form instance.
pub struct FormController {
    config: FormConfig,
    validator: RefCell<FormValidator>,
    initial: RefCell<FormData>,
    state: RefCell<FormState>,
    submitting: Cell<bool>,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("submitting", &self.submitting.get())
            .finish_non_exhaustive()
    }
}

impl FormController {
    /// Creates a controller with the default configuration.
    pub fn new(validator: FormValidator, initial: FormData) -> Self {
        Self::with_config(validator, initial, FormConfig::default())
    }

    /// Creates a controller with an explicit configuration.
    pub fn with_config(validator: FormValidator, initial: FormData, config: FormConfig) -> Self {
        Self {
            config,
            validator: RefCell::new(validator),
            state: RefCell::new(FormState {
                data: initial.clone(),
                ..FormState::default()
            }),
            initial: RefCell::new(initial),
            submitting: Cell::new(false),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> FormConfig {
        self.config
    }

    /// Returns a snapshot of the current values.
    pub fn data(&self) -> FormData {
        self.state.borrow().data.clone()
    }

    /// Returns the current value of a field, null when unset.
    pub fn value(&self, field: &str) -> FieldValue {
        self.state
            .borrow()
            .data
            .get(field)
            .cloned()
            .unwrap_or(FieldValue::Null)
    }

    /// Returns a snapshot of the current errors.
    pub fn errors(&self) -> ValidationErrors {
        self.state.borrow().errors.clone()
    }

    /// Returns whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Returns whether a rule set is declared and no field has an error.
    pub fn is_valid(&self) -> bool {
        self.validator.borrow().has_rules() && self.state.borrow().errors.is_empty()
    }

    /// Returns whether any field has an error.
    pub fn has_errors(&self) -> bool {
        !self.state.borrow().errors.is_empty()
    }

    /// Returns whether any field holds something other than null or `""`.
    pub fn has_data(&self) -> bool {
        self.state.borrow().data.values().any(has_content)
    }

    /// Returns whether a field has been changed or blurred since the last reset.
    pub fn is_touched(&self, field: &str) -> bool {
        self.state.borrow().touched.contains(field)
    }

    /// Writes a value and marks the field touched.
    ///
    /// The field is re-validated only when `validate_on_change` is set and
    /// the field was already touched before this call, so no error appears
    /// while the first entry is still being typed.
    pub fn set_value(&self, field: &str, value: impl Into<FieldValue>) {
        if self.config.disabled {
            debug!(field, "ignoring change on disabled form");
            return;
        }

        let was_touched = {
            let mut state = self.state.borrow_mut();
            state.data.insert(field.to_string(), value.into());
            !state.touched.insert(field.to_string())
        };

        if self.config.validate_on_change && was_touched {
            self.validate_field(field);
        }
    }

    /// Handles a field losing focus.
    pub fn handle_blur(&self, field: &str) {
        if self.config.disabled {
            return;
        }

        self.state.borrow_mut().touched.insert(field.to_string());
        if self.config.validate_on_blur {
            self.validate_field(field);
        }
    }

    /// Sets or, with `None`, removes the error of a field.
    pub fn set_error(&self, field: &str, error: Option<String>) {
        let mut state = self.state.borrow_mut();
        match error {
            Some(message) => state.errors.insert(field, message),
            None => {
                state.errors.remove(field);
            }
        }
    }

    /// Returns the error of a field.
    pub fn error(&self, field: &str) -> Option<String> {
        self.state.borrow().errors.get(field).map(str::to_string)
    }

    /// Returns whether a field has an error entry.
    pub fn has_error(&self, field: &str) -> bool {
        self.state.borrow().errors.contains(field)
    }

    /// Re-evaluates one field regardless of its touched state.
    ///
    /// Fields without a rule are valid and keep whatever error they had.
    pub fn validate_field(&self, field: &str) -> bool {
        let value = self.value(field);
        let outcome = {
            let validator = self.validator.borrow();
            validator
                .rule(field)
                .map(|rule| FormValidator::validate_field(field, &value, rule))
        };

        match outcome {
            Some(error) => {
                let valid = error.is_none();
                self.set_error(field, error);
                valid
            }
            None => true,
        }
    }

    /// Re-evaluates every field and replaces the error map.
    pub fn validate_form(&self) -> bool {
        let data = self.data();
        let result = self.validator.borrow_mut().validate(&data);
        self.state.borrow_mut().errors = result.errors;
        result.is_valid
    }

    /// Submits the form.
    ///
    /// Does nothing when the form is disabled or a submission is already in
    /// flight. Otherwise validates the whole form and awaits `on_submit` with
    /// the current data and its validity; the handler decides what to do
    /// with invalid data. A handler error is logged and swallowed.
    pub async fn handle_submit<F, Fut, E>(&self, on_submit: F) -> SubmitOutcome
    where
        F: FnOnce(FormData, bool) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: fmt::Display,
    {
        if self.config.disabled || self.submitting.get() {
            debug!(
                disabled = self.config.disabled,
                "submit ignored while form is not accepting submissions"
            );
            return SubmitOutcome::Skipped;
        }

        let _guard = SubmittingGuard::engage(&self.submitting);

        let valid = self.validate_form();
        let data = self.data();

        match on_submit(data, valid).await {
            Ok(()) => {
                if self.config.reset_on_submit && valid {
                    self.reset();
                }
                SubmitOutcome::Completed { valid }
            }
            Err(err) => {
                error!(error = %err, "form submission error");
                SubmitOutcome::Failed {
                    valid,
                    message: err.to_string(),
                }
            }
        }
    }

    /// Restores the initial values and clears errors and touched flags.
    pub fn reset(&self) {
        let initial = self.initial.borrow().clone();
        let mut state = self.state.borrow_mut();
        state.data = initial;
        state.errors.clear();
        state.touched.clear();
    }

    /// Replaces the initial values and the current values with `data`.
    pub fn set_initial_data(&self, data: FormData) {
        self.state.borrow_mut().data = data.clone();
        *self.initial.borrow_mut() = data;
    }

    /// Returns the banner to show above the fields.
    pub fn status(&self) -> FormStatus {
        let has_data = self.has_data();
        let errors = self.errors();

        if !errors.is_empty() && has_data {
            FormStatus::Errors(errors.messages().into_iter().map(str::to_string).collect())
        } else if self.is_valid() && has_data && !self.is_submitting() {
            FormStatus::Ready
        } else {
            FormStatus::Idle
        }
    }

    /// Returns whether the submit control should accept clicks.
    pub fn submit_enabled(&self) -> bool {
        let has_rules = self.validator.borrow().has_rules();
        !self.config.disabled && !self.is_submitting() && (!has_rules || self.is_valid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationRule;
    use serde_json::json;

    fn contact_form(config: FormConfig) -> FormController {
        let validator = FormValidator::new()
            .add_rule("name", ValidationRule::new().required())
            .add_rule("email", ValidationRule::new().required().email());
        let initial = json!({ "name": "", "email": "" });
        FormController::with_config(validator, initial.as_object().unwrap().clone(), config)
    }

    #[test]
    fn test_first_change_does_not_validate() {
        let form = contact_form(FormConfig::new().validate_on_change(true));

        form.set_value("name", "");
        assert!(form.is_touched("name"));
        assert!(!form.has_error("name"));

        form.set_value("name", "");
        assert_eq!(form.error("name").as_deref(), Some("Name is required"));
    }

    #[test]
    fn test_change_clears_error_once_fixed() {
        let form = contact_form(FormConfig::new());
        form.set_value("email", "bad");
        form.set_value("email", "still bad");
        assert!(form.has_error("email"));

        form.set_value("email", "sales@sbeearthing.com");
        assert!(!form.has_error("email"));
    }

    #[test]
    fn test_change_validation_can_be_disabled() {
        let form = contact_form(FormConfig::new().validate_on_change(false));
        form.set_value("name", "");
        form.set_value("name", "");
        assert!(!form.has_error("name"));
    }

    #[test]
    fn test_blur_validates_untouched_field() {
        let form = contact_form(FormConfig::new());
        form.handle_blur("email");
        assert!(form.is_touched("email"));
        assert_eq!(form.error("email").as_deref(), Some("Email is required"));

        let quiet = contact_form(FormConfig::new().validate_on_blur(false));
        quiet.handle_blur("email");
        assert!(quiet.is_touched("email"));
        assert!(!quiet.has_error("email"));
    }

    #[test]
    fn test_set_error_distinguishes_empty_message() {
        let form = contact_form(FormConfig::new());
        form.set_error("name", Some(String::new()));
        assert!(form.has_error("name"));
        assert_eq!(form.error("name").as_deref(), Some(""));

        form.set_error("name", None);
        assert!(!form.has_error("name"));
        assert_eq!(form.error("name"), None);
    }

    #[test]
    fn test_validate_field_without_rule() {
        let form = contact_form(FormConfig::new());
        form.set_error("company", Some("Server rejected company".to_string()));
        assert!(form.validate_field("company"));
        assert!(form.has_error("company"));
    }

    #[test]
    fn test_validate_form_replaces_errors() {
        let form = contact_form(FormConfig::new());
        form.set_error("legacy", Some("stale".to_string()));
        assert!(!form.validate_form());

        let errors = form.errors();
        assert_eq!(errors.len(), 2);
        assert!(!errors.contains("legacy"));
    }

    #[test]
    fn test_is_valid_requires_rules() {
        let form = FormController::new(FormValidator::new(), FormData::new());
        assert!(!form.is_valid());
        assert!(form.submit_enabled());

        let form = contact_form(FormConfig::new());
        assert!(form.is_valid());
        form.validate_form();
        assert!(!form.is_valid());
        assert!(!form.submit_enabled());
    }

    #[test]
    fn test_status_banner() {
        let form = contact_form(FormConfig::new());
        assert_eq!(form.status(), FormStatus::Idle);

        form.set_value("name", "Asha");
        form.validate_form();
        assert_eq!(
            form.status(),
            FormStatus::Errors(vec!["Email is required".to_string()])
        );

        form.set_value("email", "asha@example.in");
        form.validate_form();
        assert_eq!(form.status(), FormStatus::Ready);
    }

    #[test]
    fn test_disabled_form_ignores_interaction() {
        let form = contact_form(FormConfig::new().disabled(true));
        form.set_value("name", "Asha");
        form.handle_blur("name");
        assert_eq!(form.value("name"), json!(""));
        assert!(!form.is_touched("name"));
        assert!(!form.submit_enabled());
    }

    #[test]
    fn test_set_initial_data_and_reset() {
        let form = contact_form(FormConfig::new());
        let seeded = json!({ "name": "Ravi", "email": "ravi@example.in" });
        form.set_initial_data(seeded.as_object().unwrap().clone());
        assert_eq!(form.value("name"), json!("Ravi"));

        form.set_value("name", "Someone else");
        form.set_value("name", "");
        assert!(form.has_error("name"));

        form.reset();
        assert_eq!(form.value("name"), json!("Ravi"));
        assert!(!form.has_errors());
        assert!(!form.is_touched("name"));
    }

    #[tokio::test]
    async fn test_submit_passes_data_and_validity() {
        let form = contact_form(FormConfig::new());
        form.set_value("name", "Asha");

        let outcome = form
            .handle_submit(|data, valid| async move {
                assert_eq!(data.get("name"), Some(&json!("Asha")));
                assert!(!valid);
                Ok::<(), String>(())
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Completed { valid: false });
        assert_eq!(form.error("email").as_deref(), Some("Email is required"));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_submitting_flag_visible_to_handler() {
        let form = contact_form(FormConfig::new());
        let seen = Cell::new(false);

        form.handle_submit(|_, _| {
            seen.set(form.is_submitting());
            async { Ok::<(), String>(()) }
        })
        .await;

        assert!(seen.get());
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_rejected_submit_clears_flag() {
        let form = contact_form(FormConfig::new().reset_on_submit(true));
        form.set_value("name", "Asha");
        form.set_value("email", "asha@example.in");

        let outcome = form
            .handle_submit(|_, _| async { Err::<(), _>("network unreachable") })
            .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                valid: true,
                message: "network unreachable".to_string()
            }
        );
        assert!(!form.is_submitting());
        assert_eq!(form.value("name"), json!("Asha"));
    }

    #[tokio::test]
    async fn test_reset_only_after_valid_submit() {
        let form = contact_form(FormConfig::new().reset_on_submit(true));
        form.set_value("name", "Asha");
        form.handle_submit(|_, _| async { Ok::<(), String>(()) }).await;
        assert_eq!(form.value("name"), json!("Asha"));

        form.set_value("email", "asha@example.in");
        let outcome = form.handle_submit(|_, _| async { Ok::<(), String>(()) }).await;
        assert_eq!(outcome, SubmitOutcome::Completed { valid: true });
        assert_eq!(form.value("name"), json!(""));
        assert!(!form.is_touched("email"));
    }

    #[tokio::test]
    async fn test_disabled_submit_is_skipped() {
        let form = contact_form(FormConfig::new().disabled(true));
        let calls = Cell::new(0);

        let outcome = form
            .handle_submit(|_, _| {
                calls.set(calls.get() + 1);
                async { Ok::<(), String>(()) }
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Skipped);
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_submit_runs_handler_once() {
        let form = contact_form(FormConfig::new());
        let calls = Cell::new(0);
        let handler = |_: FormData, _: bool| {
            calls.set(calls.get() + 1);
            async {
                tokio::task::yield_now().await;
                Ok::<(), String>(())
            }
        };

        let (first, second) = tokio::join!(form.handle_submit(handler), form.handle_submit(handler));

        assert_eq!(calls.get(), 1);
        assert!(first == SubmitOutcome::Skipped || second == SubmitOutcome::Skipped);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_panicking_handler_clears_flag() {
        use futures::FutureExt;
        use std::panic::AssertUnwindSafe;

        let form = contact_form(FormConfig::new());
        let result = AssertUnwindSafe(form.handle_submit(|_, valid| async move {
            if !valid {
                panic!("handler bug");
            }
            Ok::<(), String>(())
        }))
        .catch_unwind()
        .await;

        assert!(result.is_err());
        assert!(!form.is_submitting());
    }
}
