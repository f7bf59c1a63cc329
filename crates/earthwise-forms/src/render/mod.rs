//! Field rendering.
//!
//! A [`FieldSpec`] declares how one field is presented; the renderer reads
//! the field's value and error from the [`FormController`] by the spec's own
//! name, so the controller is the only context a field needs. Presentation
//! state that is not form data (password visibility, focus) lives in
//! [`FieldUiState`].

mod bootstrap;
mod form;

pub use form::{render_field, render_form};

use serde_json::{Number, Value};

use crate::controller::FormController;
use crate::value::FieldValue;

/// The input affordance of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    /// Single-line text.
    #[default]
    Text,
    /// Email address.
    Email,
    /// Password with a visibility toggle.
    Password,
    /// Number; the raw input is coerced to a number.
    Number,
    /// Telephone number.
    Tel,
    /// URL.
    Url,
    /// Multi-line text.
    Textarea,
    /// Dropdown over `options`.
    Select,
    /// Boolean checkbox; reads and writes `checked`.
    Checkbox,
    /// Radio group over `options`.
    Radio,
}

impl FieldKind {
    /// Returns the HTML input type.
    pub fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
        }
    }
}

/// Presentation of one form field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    /// Field name; the key into form data and errors.
    pub name: String,
    /// Visible label.
    pub label: String,
    /// Input affordance.
    pub kind: FieldKind,
    /// Placeholder text (also the blank option of a select).
    pub placeholder: Option<String>,
    /// Shows the required marker.
    pub required: bool,
    /// Help text under the input.
    pub help_text: Option<String>,
    /// `(label, value)` choices for selects and radios.
    pub options: Vec<(String, FieldValue)>,
    /// Number lower bound attribute.
    pub min: Option<f64>,
    /// Number upper bound attribute.
    pub max: Option<f64>,
    /// Number step attribute.
    pub step: Option<f64>,
    /// Textarea rows.
    pub rows: usize,
    /// Marks a valid, filled-in field as such.
    pub show_success: bool,
}

impl FieldSpec {
    /// Creates a field spec.
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            placeholder: None,
            required: false,
            help_text: None,
            options: Vec::new(),
            min: None,
            max: None,
            step: None,
            rows: 3,
            show_success: false,
        }
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    /// Shows the required marker.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets the choices.
    #[must_use]
    pub fn options<I, L>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (L, FieldValue)>,
        L: Into<String>,
    {
        self.options = options.into_iter().map(|(l, v)| (l.into(), v)).collect();
        self
    }

    /// Sets the number bounds.
    #[must_use]
    pub fn range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Sets the number step.
    #[must_use]
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Sets the textarea rows.
    #[must_use]
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Marks a valid, filled-in field as such.
    #[must_use]
    pub fn show_success(mut self) -> Self {
        self.show_success = true;
        self
    }

    /// Coerces a raw input event and writes it to the form.
    pub fn apply_input(&self, form: &FormController, event: &InputEvent) {
        form.set_value(&self.name, coerce_input(self.kind, event));
    }
}

/// Raw change event of an input element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputEvent {
    /// The element's `value`.
    pub value: String,
    /// The element's `checked` flag.
    pub checked: bool,
}

impl InputEvent {
    /// An event carrying a text value.
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
        }
    }

    /// An event from a checkbox.
    pub fn checked(checked: bool) -> Self {
        Self {
            value: String::new(),
            checked,
        }
    }
}

/// Ephemeral UI state of one field, never part of the form data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldUiState {
    /// Password fields render as plain text.
    pub password_visible: bool,
    /// The input has focus.
    pub focused: bool,
}

impl FieldUiState {
    /// Flips password visibility.
    pub fn toggle_password(&mut self) {
        self.password_visible = !self.password_visible;
    }

    /// Records focus.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Records focus loss and forwards the blur to the form.
    pub fn blur(&mut self, form: &FormController, field: &str) {
        self.focused = false;
        form.handle_blur(field);
    }
}

/// Converts a raw input event into the value stored for a field.
///
/// Number fields keep `""` as `""` so "not entered" stays distinct from
/// zero; input that is not a number becomes null. Checkboxes store their
/// `checked` flag.
pub fn coerce_input(kind: FieldKind, event: &InputEvent) -> FieldValue {
    match kind {
        FieldKind::Number => {
            let raw = event.value.trim();
            if event.value.is_empty() {
                Value::String(String::new())
            } else if raw.is_empty() {
                Value::Number(Number::from(0))
            } else if let Ok(n) = raw.parse::<i64>() {
                Value::Number(Number::from(n))
            } else {
                raw.parse::<f64>().ok().map_or(Value::Null, whole_number_or_float)
            }
        }
        FieldKind::Checkbox => Value::Bool(event.checked),
        _ => Value::String(event.value.clone()),
    }
}

/// Whole values such as `1e3` are stored as integers.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_number_or_float(n: f64) -> FieldValue {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FormValidator;
    use serde_json::json;

    #[test]
    fn test_number_coercion_keeps_blank() {
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value("")), json!(""));
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value("0")), json!(0));
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value("12.5")), json!(12.5));
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value(" 7 ")), json!(7));
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value("abc")), Value::Null);
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value("1e3")), json!(1000));
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value("4.0")), json!(4));
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value("-2.50")), json!(-2.5));
        assert_eq!(coerce_input(FieldKind::Number, &InputEvent::value("inf")), Value::Null);
    }

    #[test]
    fn test_checkbox_reads_checked() {
        let event = InputEvent {
            value: "on".to_string(),
            checked: true,
        };
        assert_eq!(coerce_input(FieldKind::Checkbox, &event), json!(true));
        assert_eq!(coerce_input(FieldKind::Checkbox, &InputEvent::checked(false)), json!(false));
    }

    #[test]
    fn test_text_kinds_store_strings() {
        for kind in [FieldKind::Text, FieldKind::Tel, FieldKind::Select, FieldKind::Radio] {
            assert_eq!(coerce_input(kind, &InputEvent::value("42")), json!("42"));
        }
    }

    #[test]
    fn test_apply_input_and_blur() {
        let form = FormController::new(FormValidator::new(), Default::default());
        let spec = FieldSpec::new("stock", "Stock", FieldKind::Number);
        spec.apply_input(&form, &InputEvent::value("25"));
        assert_eq!(form.value("stock"), json!(25));

        let mut ui = FieldUiState::default();
        ui.focus();
        assert!(ui.focused);
        ui.blur(&form, "stock");
        assert!(!ui.focused);
        assert!(form.is_touched("stock"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"test\""), "&quot;test&quot;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }
}
