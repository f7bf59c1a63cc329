//! # earthwise-forms
//!
//! Form validation and state management for the earthwise storefront and
//! back office, with Bootstrap 5 field rendering.
//!
//! This crate provides:
//! - Declarative per-field validation rules and a whole-record validator
//! - A form controller that tracks values, errors and touched fields and
//!   runs an async submit handler
//! - Field and form renderers that read from the controller by field name
//! - Rule presets, including the public enquiry form
//!
//! ## Quick Start
//!
//! ```rust
//! use earthwise_forms::{FormController, FormValidator, ValidationRule};
//! use serde_json::json;
//!
//! let rules = FormValidator::new()
//!     .add_rule("name", ValidationRule::new().required())
//!     .add_rule("email", ValidationRule::new().required().email());
//! let initial = json!({ "name": "", "email": "" });
//! let form = FormController::new(rules, initial.as_object().unwrap().clone());
//!
//! // The first change never shows an error; later ones do.
//! form.set_value("email", "not-an-email");
//! assert!(!form.has_error("email"));
//! form.set_value("email", "still-not-an-email");
//! assert_eq!(
//!     form.error("email").as_deref(),
//!     Some("Email must be a valid email address"),
//! );
//! ```
//!
//! ## Validating Records
//!
//! ```rust
//! use earthwise_forms::presets;
//! use serde_json::json;
//!
//! let mut validator = presets::enquiry_form_rules();
//! let record = json!({ "name": "Asha Verma", "email": "asha@example.in" });
//! let result = validator.validate(record.as_object().unwrap());
//!
//! assert!(!result.is_valid);
//! assert_eq!(result.errors.get("enquiryType"), Some("Enquiry Type is required"));
//! ```
//!
//! ## Rendering
//!
//! ```rust
//! use earthwise_forms::{presets, render_field, FieldUiState, FormController};
//!
//! let form = FormController::new(presets::enquiry_form_rules(), presets::enquiry_initial_data());
//! form.handle_blur("subject");
//!
//! let fields = presets::enquiry_form_fields();
//! let subject = fields.iter().find(|f| f.name == "subject").unwrap();
//! let html = render_field(subject, &form, &FieldUiState::default());
//! assert!(html.contains("Subject is required"));
//! ```

pub mod controller;
mod error;
pub mod presets;
pub mod render;
pub mod validation;
pub mod value;

pub use controller::{FormConfig, FormController, FormStatus, SubmitOutcome};
pub use error::{FormError, Result, ValidationErrors};
pub use render::{
    coerce_input, render_field, render_form, FieldKind, FieldSpec, FieldUiState, InputEvent,
};
pub use validation::{
    humanize_field_name, validate_value, CustomCheck, FormValidator, ValidationResult,
    ValidationRule,
};
pub use value::{FieldValue, FormData};
