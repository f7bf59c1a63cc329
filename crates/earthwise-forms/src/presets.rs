//! Ready-made rules and the public enquiry form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::render::{FieldKind, FieldSpec};
use crate::validation::{FormValidator, ValidationRule};
use crate::value::{FieldValue, FormData};

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("name regex"));

// One lower-case letter, one upper-case letter and one digit, in any order.
static PASSWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        "^(?:",
        ".*[a-z].*[A-Z].*[0-9]|.*[a-z].*[0-9].*[A-Z]|",
        ".*[A-Z].*[a-z].*[0-9]|.*[A-Z].*[0-9].*[a-z]|",
        ".*[0-9].*[a-z].*[A-Z]|.*[0-9].*[A-Z].*[a-z]",
        ")",
    ))
    .expect("password regex")
});

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex"));

/// Enquiry categories offered on the contact page.
pub const ENQUIRY_TYPES: [&str; 7] = [
    "Product Enquiry",
    "Technical Support",
    "Bulk Orders",
    "Partnership",
    "Service Request",
    "Complaint/Feedback",
    "Other",
];

/// Required email address, at most 255 characters.
pub fn email() -> ValidationRule {
    ValidationRule::new().required().email().max_length(255)
}

/// Required password of 8+ characters mixing lower case, upper case and digits.
pub fn password() -> ValidationRule {
    ValidationRule::new()
        .required()
        .min_length(8)
        .with_pattern(PASSWORD_RE.clone())
}

/// Required personal name: letters and spaces, 2 to 50 characters.
pub fn name() -> ValidationRule {
    ValidationRule::new()
        .required()
        .length(2, 50)
        .with_pattern(NAME_RE.clone())
}

/// Optional phone number of 10 to 15 characters.
pub fn phone() -> ValidationRule {
    ValidationRule::new().phone().length(10, 15)
}

/// Required product name.
pub fn product_name() -> ValidationRule {
    ValidationRule::new().required().length(3, 100)
}

/// Required product description.
pub fn product_description() -> ValidationRule {
    ValidationRule::new().required().length(10, 500)
}

/// Required non-negative price.
pub fn price() -> ValidationRule {
    ValidationRule::new().required().min(0.0)
}

/// Required non-negative stock level.
pub fn stock() -> ValidationRule {
    ValidationRule::new().required().min(0.0)
}

/// Required lower-case, hyphen-separated slug.
pub fn slug() -> ValidationRule {
    ValidationRule::new()
        .required()
        .length(3, 100)
        .with_pattern(SLUG_RE.clone())
}

/// Required category name.
pub fn category() -> ValidationRule {
    ValidationRule::new().required().length(2, 50)
}

/// Rule set of the public contact/enquiry form.
pub fn enquiry_form_rules() -> FormValidator {
    FormValidator::new()
        .add_rule("name", name())
        .add_rule("email", email())
        .add_rule("phone", phone().optional())
        .add_rule("company", ValidationRule::new().length(2, 100))
        .add_rule("enquiryType", ValidationRule::new().required())
        .add_rule("subject", ValidationRule::new().required().length(5, 100))
        .add_rule("message", ValidationRule::new().required().length(20, 1000))
}

/// Empty record the enquiry form starts from.
pub fn enquiry_initial_data() -> FormData {
    [
        "name",
        "email",
        "phone",
        "company",
        "enquiryType",
        "subject",
        "message",
    ]
    .into_iter()
    .map(|field| (field.to_string(), FieldValue::String(String::new())))
    .collect()
}

/// Fields of the enquiry form, in display order.
pub fn enquiry_form_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", "Full Name", FieldKind::Text)
            .placeholder("Enter your full name")
            .required()
            .show_success(),
        FieldSpec::new("email", "Email Address", FieldKind::Email)
            .placeholder("Enter your email address")
            .required()
            .show_success(),
        FieldSpec::new("phone", "Phone Number", FieldKind::Tel)
            .placeholder("Enter your phone number")
            .help_text("Optional - We may call you for clarifications"),
        FieldSpec::new("company", "Company Name", FieldKind::Text)
            .placeholder("Enter your company name")
            .help_text("Optional - Helps us understand your business needs"),
        FieldSpec::new("enquiryType", "Enquiry Type", FieldKind::Select)
            .placeholder("Select enquiry type")
            .options(
                ENQUIRY_TYPES
                    .iter()
                    .map(|t| (t.to_string(), Value::String(t.to_string()))),
            )
            .required(),
        FieldSpec::new("subject", "Subject", FieldKind::Text)
            .placeholder("Enter subject")
            .required()
            .show_success(),
        FieldSpec::new("message", "Message", FieldKind::Textarea)
            .placeholder("Please describe your requirements or questions in detail...")
            .rows(6)
            .required()
            .help_text(
                "Minimum 20 characters - The more details you provide, the better we can assist you",
            )
            .show_success(),
    ]
}
