//! The converter: recursive walker and per-field dispatch.

use ahash::AHashMap;
use formwork::{
    ChoiceOption, FieldData, FieldKind, FieldNode, FormArena, FormId, RADIO_FIELD, SELECT_FIELD,
    STRING_FIELD,
};
use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::error::ConvertError;
use crate::rules::{Fragment, RuleTable, default_input_types, default_rules};

/// What an override hook gets to see about the field being converted.
pub struct FieldContext<'a> {
    pub arena: &'a FormArena,
    /// The field's name within its enclosing form.
    pub name: &'a str,
    pub field: &'a FieldNode,
    /// Field names from the root down to and including this field.
    pub path: &'a [String],
}

/// Result of converting one field.
pub struct FieldConversion {
    /// Goes under the enclosing object's `properties[name]`.
    pub schema: Fragment,
    /// Merged with `{key: name}` into the enclosing layout list, if present.
    pub layout: Option<Fragment>,
}

/// Replaces table lookup and fragment merging for one exact concrete kind.
///
/// The hook owns the whole conversion of its field, including title,
/// description and required handling; `parent` is the in-progress enclosing
/// object schema (see [`mark_required`]).
pub type OverrideFn = Box<
    dyn Fn(&SchemaConverter, &FieldContext<'_>, &mut Fragment) -> Result<FieldConversion, ConvertError>
        + Send
        + Sync,
>;

/// Converts a form-definition graph into a schema document plus layout list.
///
/// Each call to [`convert_form`](Self::convert_form) owns a private visited
/// map, so a converter can be shared freely across threads for independent
/// conversions.
pub struct SchemaConverter {
    rules: RuleTable,
    overrides: IndexMap<FieldKind, OverrideFn>,
    input_types: Vec<(String, FieldKind)>,
    include_array_item_titles: bool,
    include_array_title: bool,
}

impl Default for SchemaConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaConverter {
    /// A converter with the builtin rule table, the builtin input-type map,
    /// and the choice-field override hooks.
    pub fn new() -> Self {
        let mut overrides: IndexMap<FieldKind, OverrideFn> = IndexMap::new();
        overrides.insert(SELECT_FIELD, Box::new(convert_select));
        overrides.insert(RADIO_FIELD, Box::new(convert_radio));
        Self {
            rules: default_rules(),
            overrides,
            input_types: default_input_types(),
            include_array_item_titles: true,
            include_array_title: true,
        }
    }

    /// Replace the rule table wholesale. Defaults are not merged in; extend
    /// the result of [`default_rules`] first if that is what you want.
    pub fn rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Register (or replace) the override hook for an exact concrete kind.
    pub fn override_kind(mut self, kind: FieldKind, hook: OverrideFn) -> Self {
        self.overrides.insert(kind, hook);
        self
    }

    /// Remove the override hook for a kind, sending its fields back through
    /// the rule table.
    pub fn clear_override(mut self, kind: &FieldKind) -> Self {
        self.overrides.shift_remove(kind);
        self
    }

    /// Map a widget input-type tag to a field kind for rule fallback.
    pub fn input_type(mut self, tag: impl Into<String>, kind: FieldKind) -> Self {
        self.input_types.push((tag.into(), kind));
        self
    }

    /// Whether repeated-field item schemas keep `title`/`description`
    /// (default: true).
    pub fn include_array_item_titles(mut self, include: bool) -> Self {
        self.include_array_item_titles = include;
        self
    }

    /// Whether the repeated field itself keeps `title`/`description`
    /// (default: true).
    pub fn include_array_title(mut self, include: bool) -> Self {
        self.include_array_title = include;
        self
    }

    /// Convert the form at `root` into a schema document. The per-object
    /// layout list sits under each object's `"layout"` key.
    ///
    /// A single unsupported field anywhere in the graph aborts the whole
    /// conversion.
    pub fn convert_form(&self, arena: &FormArena, root: FormId) -> Result<Fragment, ConvertError> {
        let mut visited = AHashMap::new();
        self.convert_form_at(arena, root, &mut visited, &[])
    }

    fn convert_form_at(
        &self,
        arena: &FormArena,
        form: FormId,
        visited: &mut AHashMap<FormId, Vec<String>>,
        path: &[String],
    ) -> Result<Fragment, ConvertError> {
        if let Some(first) = visited.get(&form) {
            return Ok(reference_node(first));
        }
        // Recorded before descending, so a form that contains itself resolves
        // to its own path instead of expanding forever.
        visited.insert(form, path.to_vec());

        let mut schema = Fragment::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(Fragment::new()));
        let mut layout = Vec::new();

        for (name, field) in arena.form(form).fields() {
            let mut field_path = path.to_vec();
            field_path.push(name.to_string());

            let converted = self.convert_field(arena, name, field, &mut schema, visited, &field_path)?;

            if let Some(Value::Object(properties)) = schema.get_mut("properties") {
                properties.insert(name.to_string(), Value::Object(converted.schema));
            }
            let mut entry = converted.layout.unwrap_or_default();
            entry.insert("key".to_string(), json!(name));
            layout.push(Value::Object(entry));
        }

        schema.insert("layout".to_string(), Value::Array(layout));
        Ok(schema)
    }

    /// Dispatch for one field: override hook, then rule table, then the
    /// structural and widget fallbacks, in that order.
    fn convert_field(
        &self,
        arena: &FormArena,
        name: &str,
        field: &FieldNode,
        parent: &mut Fragment,
        visited: &mut AHashMap<FormId, Vec<String>>,
        path: &[String],
    ) -> Result<FieldConversion, ConvertError> {
        if let Some(hook) = self.overrides.get(&field.kind) {
            let ctx = FieldContext {
                arena,
                name,
                field,
                path,
            };
            return hook(self, &ctx, parent);
        }

        let mut schema = base_fragment(name, field, parent);

        if let Some(rule) = self.rules.lookup(&field.kind, &field.ancestors) {
            merge(&mut schema, rule.schema.clone());
            return Ok(FieldConversion {
                schema,
                layout: rule.layout.clone(),
            });
        }

        match &field.data {
            FieldData::SubForm { form } => {
                if let Some(first) = visited.get(form) {
                    // Already expanded elsewhere: a pure reference, with the
                    // partially-built base dropped.
                    return Ok(FieldConversion {
                        schema: reference_node(first),
                        layout: None,
                    });
                }
                let sub = self.convert_form_at(arena, *form, visited, path)?;
                merge(&mut schema, sub);
                Ok(FieldConversion {
                    schema,
                    layout: None,
                })
            }
            FieldData::Repeated { element } => {
                if !self.include_array_title {
                    schema.remove("title");
                    schema.remove("description");
                }
                schema.insert("type".to_string(), json!("array"));
                // The element converts under the array's own name and path,
                // so a self-referential element resolves to the array itself.
                let item = self.convert_field(arena, name, element, parent, visited, path)?;
                let mut item_schema = item.schema;
                if !self.include_array_item_titles {
                    item_schema.remove("title");
                    item_schema.remove("description");
                }
                schema.insert("items".to_string(), Value::Object(item_schema));

                let mut layout = Fragment::new();
                layout.insert("type".to_string(), json!("array"));
                if let Some(item_layout) = item.layout {
                    layout.insert("items".to_string(), Value::Object(item_layout));
                }
                Ok(FieldConversion {
                    schema,
                    layout: Some(layout),
                })
            }
            FieldData::Scalar {
                widget: Some(widget),
            } => {
                match &widget.input_type {
                    Some(tag) => {
                        let kind = self
                            .input_types
                            .iter()
                            .find(|(t, _)| t == tag)
                            .map(|(_, kind)| kind.clone())
                            .unwrap_or(STRING_FIELD);
                        match self.rules.get(&kind) {
                            Some(rule) => {
                                merge(&mut schema, rule.schema.clone());
                                Ok(FieldConversion {
                                    schema,
                                    layout: rule.layout.clone(),
                                })
                            }
                            // A caller-replaced table may not cover the
                            // fallback kind either.
                            None => {
                                schema.insert("type".to_string(), json!("string"));
                                Ok(FieldConversion {
                                    schema,
                                    layout: None,
                                })
                            }
                        }
                    }
                    None => {
                        schema.insert("type".to_string(), json!("string"));
                        Ok(FieldConversion {
                            schema,
                            layout: None,
                        })
                    }
                }
            }
            _ => Err(ConvertError::UnsupportedFieldKind {
                field: name.to_string(),
                kind: field.kind.clone(),
            }),
        }
    }
}

/// Title/description for a field, plus required bookkeeping on the enclosing
/// object. Absent label or description simply omit their keys.
fn base_fragment(name: &str, field: &FieldNode, parent: &mut Fragment) -> Fragment {
    let mut schema = Fragment::new();
    if let Some(label) = &field.label {
        schema.insert("title".to_string(), json!(label));
    }
    if let Some(description) = &field.description {
        schema.insert("description".to_string(), json!(description));
    }
    if field.required {
        schema.insert("required".to_string(), json!(true));
        mark_required(parent, name);
    }
    schema
}

/// Append `name` to the object's `required` list, exactly once.
pub fn mark_required(parent: &mut Fragment, name: &str) {
    let required = parent
        .entry("required")
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(names) = required {
        if !names.iter().any(|entry| entry == name) {
            names.push(json!(name));
        }
    }
}

/// A pure `$ref` node pointing at the path where a form was first expanded.
fn reference_node(path: &[String]) -> Fragment {
    let mut schema = Fragment::new();
    schema.insert("$ref".to_string(), json!(format!("#/{}", path.join("/"))));
    schema
}

/// Merge `other` into `target`; keys from `other` win on collision.
fn merge(target: &mut Fragment, other: Fragment) {
    for (key, value) in other {
        target.insert(key, value);
    }
}

/// Declared option values and `[value, label]` pairs in declaration order,
/// descending into groups.
fn choice_pairs(field: &FieldNode) -> (Vec<Value>, Vec<Value>) {
    let mut values = Vec::new();
    let mut pairs = Vec::new();
    if let FieldData::Choice { options } = &field.data {
        for option in options {
            match option {
                ChoiceOption::Item { value, label } => {
                    values.push(value.clone());
                    pairs.push(json!([value, label]));
                }
                ChoiceOption::Group { items, .. } => {
                    for (value, label) in items {
                        values.push(value.clone());
                        pairs.push(json!([value, label]));
                    }
                }
            }
        }
    }
    (values, pairs)
}

/// Default override for single-select choice fields. Option groups are
/// flattened: their labels vanish, only the contained pairs survive.
fn convert_select(
    _converter: &SchemaConverter,
    ctx: &FieldContext<'_>,
    parent: &mut Fragment,
) -> Result<FieldConversion, ConvertError> {
    let mut schema = base_fragment(ctx.name, ctx.field, parent);
    let (values, pairs) = choice_pairs(ctx.field);
    schema.insert("enum".to_string(), Value::Array(values));
    schema.insert("choiceLabels".to_string(), Value::Array(pairs.clone()));

    let mut layout = Fragment::new();
    layout.insert("type".to_string(), json!("select"));
    layout.insert("choices".to_string(), Value::Array(pairs));
    Ok(FieldConversion {
        schema,
        layout: Some(layout),
    })
}

/// Default override for exclusive (radio) choice fields: every declared value
/// lands in `enum`, and the fragment carries the `radio` widget marker.
fn convert_radio(
    _converter: &SchemaConverter,
    ctx: &FieldContext<'_>,
    parent: &mut Fragment,
) -> Result<FieldConversion, ConvertError> {
    let mut schema = base_fragment(ctx.name, ctx.field, parent);
    let (values, pairs) = choice_pairs(ctx.field);
    schema.insert("enum".to_string(), Value::Array(values));
    schema.insert("choiceLabels".to_string(), Value::Array(pairs.clone()));
    schema.insert("widget".to_string(), json!("radio"));

    let mut layout = Fragment::new();
    layout.insert("type".to_string(), json!("radio"));
    layout.insert("choices".to_string(), Value::Array(pairs));
    Ok(FieldConversion {
        schema,
        layout: Some(layout),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use formwork::{FormNode, Widget};

    fn single_field_form(name: &str, field: FieldNode) -> (FormArena, FormId) {
        let mut arena = FormArena::new();
        let root = arena.add_form(FormNode::new().with_field(name, field));
        (arena, root)
    }

    #[test]
    fn test_scalar_field_merges_rule_over_base() {
        let (arena, root) = single_field_form(
            "count",
            FieldNode::integer("Count").description("How many"),
        );
        let doc = SchemaConverter::new().convert_form(&arena, root).unwrap();
        assert_eq!(
            doc["properties"]["count"],
            json!({"title": "Count", "description": "How many", "type": "integer"})
        );
        assert_eq!(doc["layout"], json!([{"type": "number", "step": 1, "key": "count"}]));
    }

    #[test]
    fn test_required_flag_set_on_fragment_and_parent() {
        let (arena, root) = single_field_form("name", FieldNode::text("Name").required(true));
        let doc = SchemaConverter::new().convert_form(&arena, root).unwrap();
        assert_eq!(doc["properties"]["name"]["required"], json!(true));
        assert_eq!(doc["required"], json!(["name"]));
    }

    #[test]
    fn test_mark_required_is_idempotent() {
        let mut parent = Fragment::new();
        mark_required(&mut parent, "a");
        mark_required(&mut parent, "b");
        mark_required(&mut parent, "a");
        assert_eq!(parent["required"], json!(["a", "b"]));
    }

    #[test]
    fn test_widget_without_input_type_falls_back_to_string() {
        let field = FieldNode::new(
            FieldKind::new("NoteField"),
            FieldData::Scalar {
                widget: Some(Widget::new()),
            },
        )
        .label("Note");
        let (arena, root) = single_field_form("note", field);
        let doc = SchemaConverter::new().convert_form(&arena, root).unwrap();
        assert_eq!(doc["properties"]["note"], json!({"title": "Note", "type": "string"}));
        assert_eq!(doc["layout"], json!([{"key": "note"}]));
    }

    #[test]
    fn test_input_type_map_resolves_unknown_kind() {
        let field = FieldNode::new(
            FieldKind::new("ConsentField"),
            FieldData::Scalar {
                widget: Some(Widget::input("checkbox")),
            },
        );
        let (arena, root) = single_field_form("consent", field);
        let doc = SchemaConverter::new().convert_form(&arena, root).unwrap();
        assert_eq!(doc["properties"]["consent"]["type"], "boolean");
    }

    #[test]
    fn test_unmapped_input_type_falls_back_to_string_kind() {
        let field = FieldNode::new(
            FieldKind::new("ColorField"),
            FieldData::Scalar {
                widget: Some(Widget::input("color")),
            },
        );
        let (arena, root) = single_field_form("shade", field);
        let doc = SchemaConverter::new().convert_form(&arena, root).unwrap();
        assert_eq!(doc["properties"]["shade"]["type"], "string");
        assert_eq!(doc["layout"], json!([{"type": "text", "key": "shade"}]));
    }

    #[test]
    fn test_unsupported_kind_names_the_field() {
        let field = FieldNode::new(
            FieldKind::new("BlobField"),
            FieldData::Scalar { widget: None },
        );
        let (arena, root) = single_field_form("payload", field);
        let err = SchemaConverter::new().convert_form(&arena, root).unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnsupportedFieldKind {
                field: "payload".to_string(),
                kind: FieldKind::new("BlobField"),
            }
        );
    }

    #[test]
    fn test_custom_override_replaces_table_lookup() {
        let hook: OverrideFn = Box::new(|_, ctx, parent| {
            let mut schema = Fragment::new();
            schema.insert("type".to_string(), json!("custom"));
            if ctx.field.required {
                mark_required(parent, ctx.name);
            }
            Ok(FieldConversion {
                schema,
                layout: None,
            })
        });
        let converter = SchemaConverter::new().override_kind(STRING_FIELD, hook);

        let (arena, root) = single_field_form("name", FieldNode::text("Name").required(true));
        let doc = converter.convert_form(&arena, root).unwrap();
        // The hook owns the whole fragment: no title, its own type.
        assert_eq!(doc["properties"]["name"], json!({"type": "custom"}));
        assert_eq!(doc["required"], json!(["name"]));
    }

    #[test]
    fn test_cleared_override_resolves_choice_through_ancestors() {
        let converter = SchemaConverter::new().clear_override(&SELECT_FIELD);
        let (arena, root) = single_field_form(
            "pick",
            FieldNode::select("Pick", vec![ChoiceOption::item("a", "Alpha")]),
        );
        // SelectField -> StringField through the ancestor chain.
        let doc = converter.convert_form(&arena, root).unwrap();
        assert_eq!(doc["properties"]["pick"]["type"], "string");
        assert!(doc["properties"]["pick"].get("enum").is_none());
    }
}
