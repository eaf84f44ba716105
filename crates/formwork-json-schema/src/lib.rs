//! Conversion from form-definition graphs to JSON Schema plus UI layout.
//!
//! The converter walks a [`formwork::FormArena`] starting at a root form and
//! produces a single document: a JSON-Schema-like tree of `object`/`array`/
//! scalar nodes with ordered `properties` and `required` lists, carrying the
//! per-object layout list under its `"layout"` key. A form reached a second
//! time along any path becomes a `{"$ref": ...}` node pointing at its first
//! expansion, so shared and self-referential sub-forms convert to finite
//! documents.
//!
//! ```
//! use formwork::{FieldNode, FormArena, FormNode};
//! use formwork_json_schema::SchemaConverter;
//!
//! let mut arena = FormArena::new();
//! let root = arena.add_form(
//!     FormNode::new()
//!         .with_field("name", FieldNode::text("Name").required(true))
//!         .with_field("age", FieldNode::integer("Age")),
//! );
//!
//! let doc = SchemaConverter::new().convert_form(&arena, root).unwrap();
//! assert_eq!(doc["required"], serde_json::json!(["name"]));
//! assert_eq!(doc["properties"]["age"]["type"], "integer");
//! ```

mod convert;
mod error;
mod rules;

pub use convert::{FieldContext, FieldConversion, OverrideFn, SchemaConverter, mark_required};
pub use error::ConvertError;
pub use rules::{ConversionRule, Fragment, RuleTable, default_input_types, default_rules};
