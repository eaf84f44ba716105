//! Convenience constructors for the stock field kinds.

use crate::form::{ChoiceOption, FieldData, FieldNode, FormId, Widget};
use crate::kind::{
    BOOLEAN_FIELD, DATE_FIELD, DATE_TIME_FIELD, DECIMAL_FIELD, FIELD_LIST_FIELD, FILE_FIELD,
    FORM_FIELD, FieldKind, INTEGER_FIELD, PASSWORD_FIELD, RADIO_FIELD, SELECT_FIELD, STRING_FIELD,
    TEXT_AREA_FIELD, URL_FIELD,
};

/// Converts `"first_name"` to `"First name"`.
pub fn pretty_label(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl FieldNode {
    fn scalar(kind: FieldKind, widget: Option<Widget>, label: impl Into<String>) -> Self {
        Self::new(kind, FieldData::Scalar { widget }).label(label)
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::scalar(STRING_FIELD, Some(Widget::input("text")), label)
    }

    pub fn text_area(label: impl Into<String>) -> Self {
        // The textarea widget carries no input-type tag.
        Self::scalar(TEXT_AREA_FIELD, Some(Widget::new()), label)
    }

    pub fn password(label: impl Into<String>) -> Self {
        Self::scalar(PASSWORD_FIELD, Some(Widget::input("password")), label)
    }

    pub fn integer(label: impl Into<String>) -> Self {
        Self::scalar(INTEGER_FIELD, Some(Widget::input("number")), label)
    }

    pub fn decimal(label: impl Into<String>) -> Self {
        Self::scalar(DECIMAL_FIELD, Some(Widget::input("number")), label)
    }

    pub fn boolean(label: impl Into<String>) -> Self {
        Self::scalar(BOOLEAN_FIELD, Some(Widget::input("checkbox")), label)
    }

    pub fn date(label: impl Into<String>) -> Self {
        Self::scalar(DATE_FIELD, Some(Widget::input("date")), label)
    }

    pub fn date_time(label: impl Into<String>) -> Self {
        Self::scalar(DATE_TIME_FIELD, Some(Widget::input("datetime")), label)
    }

    pub fn url(label: impl Into<String>) -> Self {
        Self::scalar(URL_FIELD, Some(Widget::input("url")), label)
    }

    pub fn file(label: impl Into<String>) -> Self {
        Self::scalar(FILE_FIELD, Some(Widget::input("file")), label)
    }

    /// Single-select choice field.
    pub fn select(label: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self::new(SELECT_FIELD, FieldData::Choice { options }).label(label)
    }

    /// Exclusive (radio) choice field.
    pub fn radio(label: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self::new(RADIO_FIELD, FieldData::Choice { options }).label(label)
    }

    /// Nested sub-form field bound to `form`.
    pub fn subform(label: impl Into<String>, form: FormId) -> Self {
        Self::new(FORM_FIELD, FieldData::SubForm { form }).label(label)
    }

    /// Repeated field whose entries follow the `element` template.
    pub fn repeated(label: impl Into<String>, element: FieldNode) -> Self {
        Self::new(
            FIELD_LIST_FIELD,
            FieldData::Repeated {
                element: Box::new(element),
            },
        )
        .label(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_label() {
        assert_eq!(pretty_label("first_name"), "First name");
        assert_eq!(pretty_label("city"), "City");
        assert_eq!(pretty_label("HOME_ADDRESS"), "Home address");
        assert_eq!(pretty_label(""), "");
    }

    #[test]
    fn test_text_field_shape() {
        let field = FieldNode::text("Name").required(true);
        assert_eq!(field.kind, STRING_FIELD);
        assert_eq!(field.label.as_deref(), Some("Name"));
        assert!(field.required);
        match &field.data {
            FieldData::Scalar { widget: Some(widget) } => {
                assert_eq!(widget.input_type.as_deref(), Some("text"));
            }
            other => panic!("expected scalar with widget, got {other:?}"),
        }
    }

    #[test]
    fn test_text_area_has_no_input_type() {
        let field = FieldNode::text_area("Bio");
        match &field.data {
            FieldData::Scalar { widget: Some(widget) } => assert!(widget.input_type.is_none()),
            other => panic!("expected scalar with widget, got {other:?}"),
        }
    }

    #[test]
    fn test_radio_inherits_through_select() {
        let field = FieldNode::radio("Size", vec![ChoiceOption::item("s", "Small")]);
        assert_eq!(field.kind, RADIO_FIELD);
        assert_eq!(field.ancestors, vec![SELECT_FIELD, STRING_FIELD]);
    }
}
