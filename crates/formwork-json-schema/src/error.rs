//! Error types for form conversion.

use formwork::FieldKind;
use thiserror::Error;

/// Errors that can occur while converting a form graph to a schema document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// No override hook and no rule (exact or ancestor) matched the field's
    /// kind, and no widget fallback applied.
    #[error("unsupported field kind `{kind}` for field `{field}`")]
    UnsupportedFieldKind { field: String, kind: FieldKind },
}
