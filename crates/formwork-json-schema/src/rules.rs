//! Conversion rule tables mapping field kinds to schema and layout fragments.

use formwork::{
    BOOLEAN_FIELD, DATE_FIELD, DATE_TIME_FIELD, DECIMAL_FIELD, FILE_FIELD, FieldKind,
    INTEGER_FIELD, PASSWORD_FIELD, STRING_FIELD, TEXT_AREA_FIELD, URI_FIELD, URI_FILE_FIELD,
    URL_FIELD,
};
use serde_json::{Map, Value, json};

/// A partial schema or layout node. Fragments are open-ended: rule templates
/// and override hooks may put arbitrary keys in them, and key insertion order
/// is preserved in the emitted document.
pub type Fragment = Map<String, Value>;

/// Turn a `json!({...})` object literal into a [`Fragment`]; non-object
/// values yield an empty fragment.
pub(crate) fn fragment(value: Value) -> Fragment {
    match value {
        Value::Object(map) => map,
        _ => Fragment::new(),
    }
}

/// Schema and layout templates for one field kind.
#[derive(Debug, Clone)]
pub struct ConversionRule {
    /// Merged into the field's schema fragment; template keys win.
    pub schema: Fragment,
    /// Presentation hints for the layout list entry, if any.
    pub layout: Option<Fragment>,
}

impl ConversionRule {
    pub fn new(schema: Value) -> Self {
        Self {
            schema: fragment(schema),
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: Value) -> Self {
        self.layout = Some(fragment(layout));
        self
    }
}

/// Ordered `(kind, rule)` table, consulted in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    entries: Vec<(FieldKind, ConversionRule)>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Order matters: ancestor lookup returns the first
    /// matching entry, so more specific kinds belong before the root kind.
    pub fn insert(&mut self, kind: FieldKind, rule: ConversionRule) {
        self.entries.push((kind, rule));
    }

    pub fn with(mut self, kind: FieldKind, rule: ConversionRule) -> Self {
        self.insert(kind, rule);
        self
    }

    /// Rule for exactly `kind`, if any.
    pub fn get(&self, kind: &FieldKind) -> Option<&ConversionRule> {
        self.entries.iter().find(|(k, _)| k == kind).map(|(_, rule)| rule)
    }

    /// Exact match first; otherwise the first entry (in table order) whose
    /// kind appears in the field's ancestor chain.
    pub fn lookup(&self, kind: &FieldKind, ancestors: &[FieldKind]) -> Option<&ConversionRule> {
        self.get(kind).or_else(|| {
            self.entries
                .iter()
                .find(|(k, _)| ancestors.contains(k))
                .map(|(_, rule)| rule)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The builtin kind table. Callers may extend the returned table or replace
/// it wholesale through [`SchemaConverter::rules`](crate::SchemaConverter::rules);
/// nothing is merged implicitly.
///
/// The root [`STRING_FIELD`] entry sits last so that ancestor lookups hit the
/// more specific entries first.
pub fn default_rules() -> RuleTable {
    RuleTable::new()
        .with(
            URL_FIELD,
            ConversionRule::new(json!({"type": "string", "format": "uri"}))
                .with_layout(json!({"type": "url"})),
        )
        .with(
            URI_FIELD,
            ConversionRule::new(json!({"type": "string", "format": "uri"}))
                .with_layout(json!({"type": "url"})),
        )
        .with(
            URI_FILE_FIELD,
            // `action` is not schema vocabulary; it flags file-picker behavior
            // for clients.
            ConversionRule::new(
                json!({"type": "string", "format": "uri", "action": "file-select"}),
            )
            .with_layout(json!({"type": "file"})),
        )
        .with(
            FILE_FIELD,
            ConversionRule::new(
                json!({"type": "string", "format": "uri", "action": "file-select"}),
            )
            .with_layout(json!({"type": "file"})),
        )
        .with(
            DATE_FIELD,
            ConversionRule::new(json!({"type": "string", "format": "date"}))
                .with_layout(json!({"type": "date"})),
        )
        .with(
            DATE_TIME_FIELD,
            ConversionRule::new(json!({"type": "string", "format": "datetime"}))
                .with_layout(json!({"type": "datetime"})),
        )
        .with(
            DECIMAL_FIELD,
            ConversionRule::new(json!({"type": "number"})).with_layout(json!({"type": "number"})),
        )
        .with(
            INTEGER_FIELD,
            ConversionRule::new(json!({"type": "integer"}))
                .with_layout(json!({"type": "number", "step": 1})),
        )
        .with(
            BOOLEAN_FIELD,
            ConversionRule::new(json!({"type": "boolean"}))
                .with_layout(json!({"type": "checkbox"})),
        )
        .with(
            TEXT_AREA_FIELD,
            ConversionRule::new(json!({"type": "string"}))
                .with_layout(json!({"type": "textarea"})),
        )
        .with(
            PASSWORD_FIELD,
            ConversionRule::new(json!({"type": "string"}))
                .with_layout(json!({"type": "password"})),
        )
        .with(
            STRING_FIELD,
            ConversionRule::new(json!({"type": "string"})).with_layout(json!({"type": "text"})),
        )
}

/// Widget input-type tag to field kind, for fields whose kind has no rule of
/// its own.
pub fn default_input_types() -> Vec<(String, FieldKind)> {
    vec![
        ("text".to_string(), STRING_FIELD),
        ("checkbox".to_string(), BOOLEAN_FIELD),
    ]
}
