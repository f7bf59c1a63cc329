//! Field and form markup.

use std::collections::BTreeMap;

use ironhtml::html;
use ironhtml::typed::Element;
use ironhtml_elements::{Div, Li, P, Ul};
use serde_json::Value;

use super::bootstrap::{render_control, ControlState};
use super::{FieldKind, FieldSpec, FieldUiState};
use crate::controller::{FormController, FormStatus};

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders one field, reading its value and error from `form`.
pub fn render_field(spec: &FieldSpec, form: &FormController, ui: &FieldUiState) -> String {
    let id = format!("id_{}", spec.name);
    let value = form.value(&spec.name);
    let error = form.error(&spec.name);
    let disabled = form.config().disabled || form.is_submitting();

    let state_class = if error.is_some() {
        "is-invalid"
    } else if spec.show_success && is_truthy(&value) {
        "is-valid"
    } else if ui.focused {
        "is-focused"
    } else {
        ""
    };

    let control = render_control(
        spec,
        &ControlState {
            id: &id,
            value: &value,
            state_class,
            disabled,
            ui: *ui,
        },
    );

    let required_marker = if spec.required { " *" } else { "" };
    let label_text = format!("{}{}", spec.label, required_marker);
    let help_text = spec.help_text.clone();
    let errors: Vec<String> = error.into_iter().collect();

    let (wrapper_class, label_el) = if spec.kind == FieldKind::Checkbox {
        let label = html! {
            label.for_(#id).class("form-check-label") { #label_text }
        };
        ("mb-3 form-check", label)
    } else {
        let label = html! {
            label.for_(#id).class("form-label") { #label_text }
        };
        ("mb-3", label)
    };

    let wrapper = html! { div.class(#wrapper_class) };
    let wrapper = if spec.kind == FieldKind::Checkbox {
        wrapper.raw(&control).raw(label_el.render())
    } else {
        wrapper.raw(label_el.render()).raw(&control)
    };

    wrapper
        .children(&errors, |error, div: Element<Div>| {
            div.class("invalid-feedback d-block").text(error)
        })
        .when(help_text.is_some(), |d| {
            d.child::<Div, _>(|h| {
                h.class("form-text")
                    .text(help_text.as_deref().unwrap_or(""))
            })
        })
        .render()
}

/// Renders a complete form: status banner, fields and submit button.
///
/// Fields without an entry in `ui` render with default UI state.
pub fn render_form(
    fields: &[FieldSpec],
    form: &FormController,
    ui: &BTreeMap<String, FieldUiState>,
    submit_text: &str,
    action: &str,
) -> String {
    let mut markup = html! {
        form.action(#action).method("post")
    }
    .attr("novalidate", "novalidate");

    match form.status() {
        FormStatus::Errors(messages) => {
            markup = markup.child::<Div, _>(|d| {
                d.class("alert alert-danger")
                    .attr("role", "alert")
                    .child::<P, _>(|p| p.class("mb-1").text("Please fix the following errors:"))
                    .child::<Ul, _>(|ul| {
                        ul.class("mb-0")
                            .children(messages.iter(), |m, li: Element<Li>| li.text(m))
                    })
            });
        }
        FormStatus::Ready => {
            markup = markup.child::<Div, _>(|d| {
                d.class("alert alert-success")
                    .attr("role", "status")
                    .text("Form is valid and ready to submit")
            });
        }
        FormStatus::Idle => {}
    }

    for spec in fields {
        let field_ui = ui.get(&spec.name).copied().unwrap_or_default();
        let field_html = render_field(spec, form, &field_ui);
        markup = markup.child::<Div, _>(|d| d.raw(&field_html));
    }

    let button_label = if form.is_submitting() {
        "Submitting...".to_string()
    } else {
        submit_text.to_string()
    };
    let button = html! {
        button.type_("submit").class("btn btn-primary") { #button_label }
    }
    .when(!form.submit_enabled(), |b| b.attr("disabled", "disabled"));

    markup = markup.child::<Div, _>(|d| d.class("d-flex justify-content-end").raw(button.render()));

    markup.render()
}
