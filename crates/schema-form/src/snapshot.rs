// File: src/snapshot.rs
// Purpose: Serializable debug view of a form's current state

use crate::data::FormData;
use crate::error::ErrorList;
use crate::form::FormHandle;
use serde::Serialize;
use serde_json::Value;

/// Point-in-time view of a form for debug display: the mapping, the
/// aggregate errors, and the erased decoded aggregate. Serialize it with any
/// presentation layer's JSON viewer.
#[derive(Debug, Clone, Serialize)]
pub struct FormSnapshot {
    pub data: FormData,
    pub errors: Option<ErrorList>,
    pub decoded: Option<Value>,
}

impl FormSnapshot {
    /// Capture the form's state as of this call
    pub fn capture(handle: &FormHandle) -> Self {
        let context = handle.context();
        Self {
            data: context.data,
            errors: context.errors,
            decoded: context.decoded,
        }
    }

    /// Render as pretty-printed JSON
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
