// File: src/field.rs
// Purpose: One named field's bridge between its schema and the shared store

use crate::error::ErrorList;
use crate::form::FormHandle;
use crate::schema::{DecodeOptions, Schema};
use crate::value::StoredValue;
use serde_json::Value;

/// What a field currently holds, read back from the store.
///
/// `raw_value` is present only when the stored raw input still matches the
/// field's current schema; `decoded_value` only when the last decode
/// succeeded and its value still matches. `field_errors` is present iff the
/// last decode failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView<Raw, Decoded> {
    pub raw_value: Option<Raw>,
    pub decoded_value: Option<Decoded>,
    pub field_errors: Option<ErrorList>,
}

impl<Raw, Decoded> FieldView<Raw, Decoded> {
    fn empty() -> Self {
        Self {
            raw_value: None,
            decoded_value: None,
            field_errors: None,
        }
    }
}

/// Per-field render payload: the [`FieldView`] data plus the transient
/// interaction flags.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRenderState<Raw, Decoded> {
    pub value: Option<Raw>,
    pub dirty: bool,
    pub touched: bool,
    pub focused: bool,
    pub decoded: Option<Decoded>,
    pub field_errors: Option<ErrorList>,
}

/// One named field bound to a form through its injected [`FormHandle`].
///
/// The field never touches the mapping directly: every write goes through
/// the handle's single mutator. `dirty`/`touched`/`focused` are local
/// transient flags, not part of the stored form data.
pub struct SchemaField<S: Schema> {
    name: String,
    schema: S,
    handle: FormHandle,
    dirty: bool,
    touched: bool,
    focused: bool,
}

impl<S: Schema> SchemaField<S> {
    pub fn new(name: impl Into<String>, schema: S, handle: FormHandle) -> Self {
        Self {
            name: name.into(),
            schema,
            handle,
            dirty: false,
            touched: false,
            focused: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read this field's current state from the store.
    ///
    /// Fails closed on stale data: a result computed under a schema this one
    /// replaced yields `None` for any part that no longer type-matches,
    /// rather than misrepresenting it as current-typed.
    pub fn read(&self) -> FieldView<S::Raw, S::Decoded> {
        let stored = match self.handle.field(&self.name) {
            Some(stored) => stored,
            None => return FieldView::empty(),
        };

        let raw_value = if self.schema.is_raw(stored.raw()) {
            serde_json::from_value(stored.raw().clone()).ok()
        } else {
            None
        };
        let decoded_value = stored
            .decoded()
            .filter(|value| self.schema.is_decoded(value))
            .and_then(|value| serde_json::from_value(value.clone()).ok());
        let field_errors = stored.errors().cloned();

        FieldView {
            raw_value,
            decoded_value,
            field_errors,
        }
    }

    /// Decode an edit and write the outcome into the store.
    ///
    /// Exactly one entry is written per call, replacing any prior result for
    /// this field wholesale. Never panics: a failed decode is stored as data
    /// together with the rejected input.
    pub fn on_change(&mut self, raw: S::Raw) {
        let options = DecodeOptions { all_errors: true };
        let outcome = self.schema.decode(&raw, &options);
        let from = serde_json::to_value(&raw).unwrap_or(Value::Null);

        let stored = match outcome {
            Ok(decoded) => {
                let value = serde_json::to_value(&decoded).unwrap_or(Value::Null);
                StoredValue::valid(from, value)
            }
            Err(errors) => StoredValue::invalid(from, errors),
        };

        tracing::trace!(field = %self.name, valid = stored.is_valid(), "field edit decoded");
        self.handle.set_field_value(self.name.clone(), stored);
        self.dirty = true;
    }

    pub fn on_focus(&mut self) {
        self.touched = true;
        self.focused = true;
    }

    pub fn on_blur(&mut self) {
        self.focused = false;
    }

    /// Edited at least once since the form was created
    pub fn dirty(&self) -> bool {
        self.dirty
    }

    /// Received and possibly lost focus at least once
    pub fn touched(&self) -> bool {
        self.touched
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    /// The full per-field render payload
    pub fn render_state(&self) -> FieldRenderState<S::Raw, S::Decoded> {
        let view = self.read();
        FieldRenderState {
            value: view.raw_value,
            dirty: self.dirty,
            touched: self.touched,
            focused: self.focused,
            decoded: view.decoded_value,
            field_errors: view.field_errors,
        }
    }
}
