//! Declarative form-definition graphs.
//!
//! A [`FormArena`] owns every [`FormNode`] in one definition graph and hands
//! out stable [`FormId`] handles. Handles are the identity used for sharing
//! and cycle detection: a sub-form reachable from two places, or a form that
//! (transitively) contains itself, is expressed by repeating its handle.
//!
//! Fields are plain data ([`FieldNode`]) tagged with a [`FieldKind`] from a
//! single-inheritance kind hierarchy rooted at [`STRING_FIELD`].

mod builder;
mod form;
mod kind;

pub use builder::pretty_label;
pub use form::{ChoiceOption, FieldData, FieldNode, FormArena, FormId, FormNode, Widget};
pub use kind::{
    BOOLEAN_FIELD, DATE_FIELD, DATE_TIME_FIELD, DECIMAL_FIELD, FIELD_LIST_FIELD, FILE_FIELD,
    FORM_FIELD, FieldKind, INTEGER_FIELD, PASSWORD_FIELD, RADIO_FIELD, SELECT_FIELD, STRING_FIELD,
    TEXT_AREA_FIELD, URI_FIELD, URI_FILE_FIELD, URL_FIELD, builtin_ancestors,
};
