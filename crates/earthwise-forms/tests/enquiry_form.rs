//! End-to-end tests of the public enquiry form: typing, blurring,
//! submitting and rendering through the public API only.

use std::cell::RefCell;
use std::collections::BTreeMap;

use earthwise_forms::presets::{enquiry_form_fields, enquiry_form_rules, enquiry_initial_data};
use earthwise_forms::{
    render_form, FieldKind, FormConfig, FormController, FormData, FormStatus, InputEvent,
    SubmitOutcome,
};
use serde_json::json;

fn enquiry_form(config: FormConfig) -> FormController {
    FormController::with_config(enquiry_form_rules(), enquiry_initial_data(), config)
}

fn type_into(form: &FormController, field: &str, text: &str) {
    let spec = enquiry_form_fields()
        .into_iter()
        .find(|f| f.name == field)
        .expect("known field");
    spec.apply_input(form, &InputEvent::value(text));
}

fn fill_valid(form: &FormController) {
    type_into(form, "name", "Asha Verma");
    type_into(form, "email", "asha@example.in");
    type_into(form, "phone", "+91 98765-43210");
    type_into(form, "enquiryType", "Bulk Orders");
    type_into(form, "subject", "Copper bonded rods");
    type_into(form, "message", "Please quote 200 copper bonded rods, 3 m each.");
}

#[test]
fn test_typing_then_blurring_surfaces_errors() {
    let form = enquiry_form(FormConfig::new());

    type_into(&form, "subject", "Hi");
    assert!(!form.has_error("subject"));

    form.handle_blur("subject");
    assert_eq!(
        form.error("subject").as_deref(),
        Some("Subject must be at least 5 characters")
    );

    type_into(&form, "subject", "Hello");
    assert!(!form.has_error("subject"));
}

#[test]
fn test_optional_fields_accept_blank() {
    let form = enquiry_form(FormConfig::new());
    fill_valid(&form);
    type_into(&form, "phone", "");
    type_into(&form, "company", "");

    assert!(form.validate_form());
    assert_eq!(form.status(), FormStatus::Ready);
}

#[test]
fn test_company_must_be_two_characters_when_given() {
    let form = enquiry_form(FormConfig::new());
    type_into(&form, "company", "X");
    form.handle_blur("company");
    assert_eq!(
        form.error("company").as_deref(),
        Some("Company must be at least 2 characters")
    );
}

#[tokio::test]
async fn test_valid_submit_persists_and_resets() {
    let form = enquiry_form(FormConfig::new().reset_on_submit(true));
    fill_valid(&form);

    let stored: RefCell<Vec<FormData>> = RefCell::new(Vec::new());
    let outcome = form
        .handle_submit(|data, valid| {
            let stored = &stored;
            async move {
                if !valid {
                    return Err("Please fix the errors in the form before submitting");
                }
                stored.borrow_mut().push(data);
                Ok(())
            }
        })
        .await;

    assert_eq!(outcome, SubmitOutcome::Completed { valid: true });
    let stored = stored.into_inner();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].get("enquiryType"), Some(&json!("Bulk Orders")));

    assert_eq!(form.data(), enquiry_initial_data());
    assert!(!form.is_touched("name"));
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_invalid_submit_is_reported_to_handler() {
    let form = enquiry_form(FormConfig::new().reset_on_submit(true));
    type_into(&form, "name", "Asha Verma");

    let outcome = form
        .handle_submit(|_, valid| async move {
            if valid {
                Ok(())
            } else {
                Err("Please fix the errors in the form before submitting")
            }
        })
        .await;

    assert!(matches!(outcome, SubmitOutcome::Failed { valid: false, .. }));
    assert_eq!(form.value("name"), json!("Asha Verma"));
    assert_eq!(form.error("message").as_deref(), Some("Message is required"));

    let html = render_form(
        &enquiry_form_fields(),
        &form,
        &BTreeMap::new(),
        "Send Message",
        "/api/enquiries",
    );
    assert!(html.contains("Message is required"));
    assert!(html.contains("Enquiry Type is required"));
}

#[test]
fn test_select_field_renders_every_enquiry_type() {
    let form = enquiry_form(FormConfig::new());
    let fields = enquiry_form_fields();
    let select = fields
        .iter()
        .find(|f| f.kind == FieldKind::Select)
        .expect("enquiry type select");

    let html = earthwise_forms::render_field(select, &form, &Default::default());
    for enquiry_type in earthwise_forms::presets::ENQUIRY_TYPES {
        assert!(html.contains(&format!(">{enquiry_type}</option>")));
    }
}

#[test]
fn test_status_lists_errors_in_field_order() {
    let form = enquiry_form(FormConfig::new());
    type_into(&form, "name", "Asha Verma");
    type_into(&form, "company", "X");

    assert!(!form.validate_form());
    assert_eq!(
        form.status(),
        FormStatus::Errors(vec![
            "Email is required".to_string(),
            "Company must be at least 2 characters".to_string(),
            "Enquiry Type is required".to_string(),
            "Subject is required".to_string(),
            "Message is required".to_string(),
        ])
    );

    let html = render_form(
        &enquiry_form_fields(),
        &form,
        &BTreeMap::new(),
        "Send Message",
        "/api/enquiries",
    );
    let email = html.find("Email is required").expect("email listed");
    let company = html.find("Company must be at least 2").expect("company listed");
    assert!(email < company);
}
