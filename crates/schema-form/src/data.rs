// File: src/data.rs
// Purpose: The authoritative field-name to field-result mapping

use crate::error::ErrorList;
use crate::schema::RawObject;
use crate::value::{FormValue, StoredValue};
use indexmap::IndexMap;
use serde::Serialize;

/// Insertion-ordered mapping from field name to the field's stored result.
///
/// Entries are only ever replaced wholesale, one key per mutation; nothing is
/// merged or patched in place. The mapping lives for the lifetime of one form
/// instance. Re-editing a field keeps its original position.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FormData {
    entries: IndexMap<String, StoredValue>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Get a field's stored result
    pub fn get(&self, name: &str) -> Option<&StoredValue> {
        self.entries.get(name)
    }

    /// Check if a field has been edited
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when no stored result is `Invalid`
    pub fn is_error_free(&self) -> bool {
        self.entries.values().all(FormValue::is_valid)
    }

    /// Replace one field's result wholesale. The only mutation path, reserved
    /// for the form core.
    pub(crate) fn replace(&mut self, name: String, value: StoredValue) {
        self.entries.insert(name, value);
    }

    /// Assemble an object from every field's raw input
    pub fn raw_object(&self) -> RawObject {
        self.entries
            .iter()
            .map(|(name, value)| (name.clone(), value.raw().clone()))
            .collect()
    }

    /// Fold the mapping: the assembled decoded object when every field is
    /// valid, otherwise the in-order union of per-field errors, each node's
    /// path prefixed with its field name.
    pub fn decoded_or_errors(&self) -> Result<RawObject, ErrorList> {
        let mut decoded = RawObject::new();
        let mut errors: Option<ErrorList> = None;

        for (name, value) in &self.entries {
            match value {
                FormValue::Valid { value, .. } => {
                    decoded.insert(name.clone(), value.clone());
                }
                FormValue::Invalid {
                    errors: field_errors,
                    ..
                } => {
                    let prefixed = field_errors.clone().prefixed(name);
                    match errors.as_mut() {
                        Some(list) => list.extend(prefixed),
                        None => errors = Some(prefixed),
                    }
                }
            }
        }

        match errors {
            Some(list) => Err(list),
            None => Ok(decoded),
        }
    }
}
