//! Bootstrap 5 controls for each field kind.

use std::fmt::Write;

use super::{html_escape, FieldKind, FieldSpec, FieldUiState};
use crate::value::{display_value, FieldValue};

/// Everything a control needs besides the spec.
pub(super) struct ControlState<'a> {
    pub id: &'a str,
    pub value: &'a FieldValue,
    pub state_class: &'a str,
    pub disabled: bool,
    pub ui: FieldUiState,
}

/// Renders the input element(s) of a field.
pub(super) fn render_control(spec: &FieldSpec, state: &ControlState<'_>) -> String {
    match spec.kind {
        FieldKind::Textarea => render_textarea(spec, state),
        FieldKind::Select => render_select(spec, state),
        FieldKind::Checkbox => render_checkbox(spec, state),
        FieldKind::Radio => render_radios(spec, state),
        FieldKind::Password => render_password(spec, state),
        _ => render_input(spec, state, spec.kind.input_type()),
    }
}

fn class_attr(base: &str, state_class: &str) -> String {
    if state_class.is_empty() {
        base.to_string()
    } else {
        format!("{base} {state_class}")
    }
}

fn common_attrs(spec: &FieldSpec, disabled: bool) -> String {
    let mut attrs = String::new();
    if let Some(placeholder) = &spec.placeholder {
        let _ = write!(attrs, r#" placeholder="{}""#, html_escape(placeholder));
    }
    if spec.required {
        attrs.push_str(" required");
    }
    if disabled {
        attrs.push_str(" disabled");
    }
    attrs
}

fn number_attrs(spec: &FieldSpec) -> String {
    let mut attrs = String::new();
    for (key, bound) in [("min", spec.min), ("max", spec.max), ("step", spec.step)] {
        if let Some(bound) = bound {
            let _ = write!(attrs, r#" {key}="{bound}""#);
        }
    }
    attrs
}

fn render_input(spec: &FieldSpec, state: &ControlState<'_>, input_type: &str) -> String {
    let extra = if spec.kind == FieldKind::Number {
        number_attrs(spec)
    } else {
        String::new()
    };

    format!(
        r#"<input type="{}" class="{}" id="{}" name="{}" value="{}"{}{extra}>"#,
        input_type,
        class_attr("form-control", state.state_class),
        state.id,
        spec.name,
        html_escape(&display_value(state.value)),
        common_attrs(spec, state.disabled),
    )
}

fn render_password(spec: &FieldSpec, state: &ControlState<'_>) -> String {
    let (input_type, toggle_label) = if state.ui.password_visible {
        ("text", "Hide password")
    } else {
        ("password", "Show password")
    };

    format!(
        r#"<div class="input-group">{}<button type="button" class="btn btn-outline-secondary" data-toggle="password" aria-label="{toggle_label}" tabindex="-1">{toggle_label}</button></div>"#,
        render_input(spec, state, input_type)
    )
}

fn render_textarea(spec: &FieldSpec, state: &ControlState<'_>) -> String {
    format!(
        r#"<textarea class="{}" id="{}" name="{}" rows="{}"{}>{}</textarea>"#,
        class_attr("form-control", state.state_class),
        state.id,
        spec.name,
        spec.rows,
        common_attrs(spec, state.disabled),
        html_escape(&display_value(state.value)),
    )
}

fn render_select(spec: &FieldSpec, state: &ControlState<'_>) -> String {
    let current = display_value(state.value);
    let mut options = String::new();

    if let Some(placeholder) = &spec.placeholder {
        let selected = if current.is_empty() { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="" disabled{selected}>{}</option>"#,
            html_escape(placeholder)
        );
    }

    for (label, value) in &spec.options {
        let opt_value = display_value(value);
        let selected = if opt_value == current { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{}"{selected}>{}</option>"#,
            html_escape(&opt_value),
            html_escape(label)
        );
    }

    let mut attrs = String::new();
    if spec.required {
        attrs.push_str(" required");
    }
    if state.disabled {
        attrs.push_str(" disabled");
    }

    format!(
        r#"<select class="{}" id="{}" name="{}"{attrs}>{options}</select>"#,
        class_attr("form-select", state.state_class),
        state.id,
        spec.name,
    )
}

fn render_checkbox(spec: &FieldSpec, state: &ControlState<'_>) -> String {
    let checked = if state.value.as_bool() == Some(true) {
        " checked"
    } else {
        ""
    };
    let disabled = if state.disabled { " disabled" } else { "" };

    format!(
        r#"<input class="{}" type="checkbox" id="{}" name="{}" value="true"{checked}{disabled}>"#,
        class_attr("form-check-input", state.state_class),
        state.id,
        spec.name,
    )
}

fn render_radios(spec: &FieldSpec, state: &ControlState<'_>) -> String {
    let current = display_value(state.value);
    let disabled = if state.disabled { " disabled" } else { "" };
    let required = if spec.required { " required" } else { "" };
    let mut html = String::new();

    for (i, (label, value)) in spec.options.iter().enumerate() {
        let id = format!("{}_{i}", state.id);
        let opt_value = display_value(value);
        let checked = if opt_value == current { " checked" } else { "" };

        let _ = write!(
            html,
            r#"<div class="form-check"><input class="{}" type="radio" id="{id}" name="{}" value="{}"{checked}{required}{disabled}><label class="form-check-label" for="{id}">{}</label></div>"#,
            class_attr("form-check-input", state.state_class),
            spec.name,
            html_escape(&opt_value),
            html_escape(label),
        );
    }

    html
}
