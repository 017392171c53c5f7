// File: src/value.rs
// Purpose: Per-field decode outcome, retaining the last raw input in both variants

use crate::error::ErrorList;
use serde::Serialize;
use serde_json::Value;

/// Outcome of the most recent decode attempt for one field.
///
/// Both variants carry `from`, the exact raw input that produced them, so a
/// rejected edit stays addressable for redisplay. Validation failure is data
/// (`Invalid`), never a panic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FormValue<Raw, Decoded> {
    Valid { from: Raw, value: Decoded },
    Invalid { from: Raw, errors: ErrorList },
}

/// Type-erased form of [`FormValue`] as held in the shared store.
pub type StoredValue = FormValue<Value, Value>;

impl<Raw, Decoded> FormValue<Raw, Decoded> {
    pub fn valid(from: Raw, value: Decoded) -> Self {
        FormValue::Valid { from, value }
    }

    pub fn invalid(from: Raw, errors: ErrorList) -> Self {
        FormValue::Invalid { from, errors }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FormValue::Valid { .. })
    }

    /// The last raw input, present in both variants
    pub fn raw(&self) -> &Raw {
        match self {
            FormValue::Valid { from, .. } => from,
            FormValue::Invalid { from, .. } => from,
        }
    }

    /// The decoded value, if the last decode succeeded
    pub fn decoded(&self) -> Option<&Decoded> {
        match self {
            FormValue::Valid { value, .. } => Some(value),
            FormValue::Invalid { .. } => None,
        }
    }

    /// The decode errors, if the last decode failed
    pub fn errors(&self) -> Option<&ErrorList> {
        match self {
            FormValue::Valid { .. } => None,
            FormValue::Invalid { errors, .. } => Some(errors),
        }
    }
}
