//! Arena-backed form graphs.

use indexmap::IndexMap;
use serde_json::Value;

use crate::kind::{FieldKind, builtin_ancestors};

/// Handle to a [`FormNode`] inside a [`FormArena`].
///
/// The handle is the node's identity: converting a graph where the same
/// `FormId` is reachable twice links the second occurrence instead of
/// re-expanding it, while two structurally identical forms added separately
/// stay independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormId(usize);

/// An ordered mapping of field name to field definition.
#[derive(Debug, Clone, Default)]
pub struct FormNode {
    fields: IndexMap<String, FieldNode>,
}

impl FormNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous definition under the same name.
    pub fn insert(&mut self, name: impl Into<String>, field: FieldNode) {
        self.fields.insert(name.into(), field);
    }

    pub fn with_field(mut self, name: impl Into<String>, field: FieldNode) -> Self {
        self.insert(name, field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldNode> {
        self.fields.get(name)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldNode)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Owns every form in one definition graph.
#[derive(Debug, Clone, Default)]
pub struct FormArena {
    forms: Vec<FormNode>,
}

impl FormArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a form and return its handle.
    pub fn add_form(&mut self, form: FormNode) -> FormId {
        let id = FormId(self.forms.len());
        self.forms.push(form);
        id
    }

    pub fn form(&self, id: FormId) -> &FormNode {
        &self.forms[id.0]
    }

    /// Mutable access, used to close cycles after a handle exists.
    pub fn form_mut(&mut self, id: FormId) -> &mut FormNode {
        &mut self.forms[id.0]
    }
}

/// One form field as supplied by the external field system.
#[derive(Debug, Clone)]
pub struct FieldNode {
    pub kind: FieldKind,
    /// Single-inheritance chain, nearest ancestor first, ending at the root
    /// string-like kind. Empty for kinds outside any known hierarchy.
    pub ancestors: Vec<FieldKind>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub required: bool,
    pub data: FieldData,
}

impl FieldNode {
    /// A field with the builtin ancestor chain for `kind` (empty for unknown
    /// kinds; override with [`FieldNode::ancestors`]).
    pub fn new(kind: FieldKind, data: FieldData) -> Self {
        let ancestors = builtin_ancestors(&kind);
        Self {
            kind,
            ancestors,
            label: None,
            description: None,
            required: false,
            data,
        }
    }

    /// Replace the ancestor chain, for kinds from a foreign hierarchy.
    pub fn ancestors(mut self, chain: Vec<FieldKind>) -> Self {
        self.ancestors = chain;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

/// Kind-specific payload of a field.
#[derive(Debug, Clone)]
pub enum FieldData {
    /// Plain value rendered by an optional widget.
    Scalar { widget: Option<Widget> },
    /// Single-select choice field with its declared options.
    Choice { options: Vec<ChoiceOption> },
    /// Nested sub-form, by handle.
    SubForm { form: FormId },
    /// Repeated group; `element` is the unbound element template.
    Repeated { element: Box<FieldNode> },
}

/// Rendering widget attached to a scalar field.
#[derive(Debug, Clone, Default)]
pub struct Widget {
    /// HTML-input-style type tag (`"text"`, `"checkbox"`, ...), if the widget
    /// declares one.
    pub input_type: Option<String>,
}

impl Widget {
    /// A widget with no input-type tag (textarea-style).
    pub fn new() -> Self {
        Self::default()
    }

    /// A widget with the given input-type tag.
    pub fn input(tag: impl Into<String>) -> Self {
        Self {
            input_type: Some(tag.into()),
        }
    }
}

/// One declared option of a choice field.
#[derive(Debug, Clone)]
pub enum ChoiceOption {
    /// A selectable `(value, display label)` pair.
    Item { value: Value, label: String },
    /// A labelled group of pairs (an `<optgroup>`); only the contained values
    /// are selectable.
    Group {
        label: String,
        items: Vec<(Value, String)>,
    },
}

impl ChoiceOption {
    pub fn item(value: impl Into<Value>, label: impl Into<String>) -> Self {
        Self::Item {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn group(label: impl Into<String>, items: Vec<(Value, String)>) -> Self {
        Self::Group {
            label: label.into(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::{SELECT_FIELD, STRING_FIELD};

    #[test]
    fn test_form_preserves_declaration_order() {
        let form = FormNode::new()
            .with_field("zeta", FieldNode::new(STRING_FIELD, FieldData::Scalar { widget: None }))
            .with_field("alpha", FieldNode::new(STRING_FIELD, FieldData::Scalar { widget: None }))
            .with_field("mid", FieldNode::new(STRING_FIELD, FieldData::Scalar { widget: None }));

        let names: Vec<&str> = form.fields().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_arena_handles_are_distinct_identities() {
        let mut arena = FormArena::new();
        let a = arena.add_form(FormNode::new());
        let b = arena.add_form(FormNode::new());
        assert_ne!(a, b);
        assert!(arena.form(a).is_empty());
    }

    #[test]
    fn test_cycle_can_be_closed_through_form_mut() {
        let mut arena = FormArena::new();
        let id = arena.add_form(FormNode::new());
        arena
            .form_mut(id)
            .insert("inner", FieldNode::new(crate::FORM_FIELD, FieldData::SubForm { form: id }));

        match &arena.form(id).get("inner").unwrap().data {
            FieldData::SubForm { form } => assert_eq!(*form, id),
            other => panic!("expected sub-form, got {other:?}"),
        }
    }

    #[test]
    fn test_new_fills_builtin_ancestors() {
        let field = FieldNode::new(crate::RADIO_FIELD, FieldData::Choice { options: vec![] });
        assert_eq!(field.ancestors, vec![SELECT_FIELD, STRING_FIELD]);
    }
}
