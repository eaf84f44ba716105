//! Field kind tags and the builtin kind hierarchy.

use std::borrow::Cow;
use std::fmt;

/// Tag identifying a field's concrete class in the host form system.
///
/// Kinds form a single-inheritance hierarchy; the chain itself is carried on
/// each field (see `FieldNode::ancestors`) since the class graph belongs to
/// the host system, not to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldKind(Cow<'static, str>);

impl FieldKind {
    /// A kind tag from a static string, usable in `const` position.
    pub const fn from_static(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }

    /// A kind tag owned at runtime, for kinds this crate has never heard of.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Cow::Owned(tag.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root of the builtin hierarchy; every builtin kind derives from it.
pub const STRING_FIELD: FieldKind = FieldKind::from_static("StringField");
pub const TEXT_AREA_FIELD: FieldKind = FieldKind::from_static("TextAreaField");
pub const PASSWORD_FIELD: FieldKind = FieldKind::from_static("PasswordField");
pub const URL_FIELD: FieldKind = FieldKind::from_static("URLField");
pub const URI_FIELD: FieldKind = FieldKind::from_static("URIField");
pub const URI_FILE_FIELD: FieldKind = FieldKind::from_static("URIFileField");
pub const FILE_FIELD: FieldKind = FieldKind::from_static("FileField");
pub const DATE_FIELD: FieldKind = FieldKind::from_static("DateField");
pub const DATE_TIME_FIELD: FieldKind = FieldKind::from_static("DateTimeField");
pub const DECIMAL_FIELD: FieldKind = FieldKind::from_static("DecimalField");
pub const INTEGER_FIELD: FieldKind = FieldKind::from_static("IntegerField");
pub const BOOLEAN_FIELD: FieldKind = FieldKind::from_static("BooleanField");
pub const SELECT_FIELD: FieldKind = FieldKind::from_static("SelectField");
pub const RADIO_FIELD: FieldKind = FieldKind::from_static("RadioField");
pub const FORM_FIELD: FieldKind = FieldKind::from_static("FormField");
pub const FIELD_LIST_FIELD: FieldKind = FieldKind::from_static("FieldListField");

/// Ancestor chain (nearest first) for a builtin kind.
///
/// Scalar builtins derive directly from [`STRING_FIELD`] except where the
/// stock classes say otherwise: radio extends select, date extends datetime,
/// URI-file extends URI. The structural kinds ([`FORM_FIELD`],
/// [`FIELD_LIST_FIELD`]) and unknown tags get an empty chain.
pub fn builtin_ancestors(kind: &FieldKind) -> Vec<FieldKind> {
    match kind.as_str() {
        "RadioField" => vec![SELECT_FIELD, STRING_FIELD],
        "DateField" => vec![DATE_TIME_FIELD, STRING_FIELD],
        "URIFileField" => vec![URI_FIELD, STRING_FIELD],
        "TextAreaField" | "PasswordField" | "URLField" | "URIField" | "FileField"
        | "DateTimeField" | "DecimalField" | "IntegerField" | "BooleanField" | "SelectField" => {
            vec![STRING_FIELD]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_chains() {
        assert_eq!(builtin_ancestors(&RADIO_FIELD), vec![SELECT_FIELD, STRING_FIELD]);
        assert_eq!(builtin_ancestors(&DATE_FIELD), vec![DATE_TIME_FIELD, STRING_FIELD]);
        assert_eq!(builtin_ancestors(&BOOLEAN_FIELD), vec![STRING_FIELD]);
        assert_eq!(builtin_ancestors(&STRING_FIELD), Vec::<FieldKind>::new());
        assert_eq!(builtin_ancestors(&FORM_FIELD), Vec::<FieldKind>::new());
        assert_eq!(builtin_ancestors(&FieldKind::new("BlobField")), Vec::<FieldKind>::new());
    }

    #[test]
    fn test_kind_equality_across_representations() {
        assert_eq!(FieldKind::new("StringField"), STRING_FIELD);
        assert_eq!(STRING_FIELD.to_string(), "StringField");
    }
}
