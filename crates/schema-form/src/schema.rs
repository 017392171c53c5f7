// File: src/schema.rs
// Purpose: The schema collaborator contract consumed by the state engine

use crate::error::{ErrorList, ErrorNode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Options passed to every decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Collect every violated rule instead of stopping at the first
    pub all_errors: bool,
}

/// Raw shape a whole-form schema decodes: field name to erased value.
pub type RawObject = serde_json::Map<String, Value>;

/// A raw-to-decoded transformer with validation.
///
/// Implementations must be synchronous, pure, and total: every failure is
/// returned as an [`ErrorList`], never panicked. The engine stores results
/// type-erased as [`serde_json::Value`], so `Raw` and `Decoded` must round-trip
/// through serde; the `is_raw`/`is_decoded` predicates discriminate those
/// erased values at runtime boundaries, e.g. after a field's schema was
/// swapped while a stale result is still stored.
pub trait Schema {
    type Raw: Clone + Serialize + DeserializeOwned + 'static;
    type Decoded: Clone + Serialize + DeserializeOwned + 'static;

    /// Decode a raw input into the validated value or an error list
    fn decode(&self, raw: &Self::Raw, options: &DecodeOptions) -> Result<Self::Decoded, ErrorList>;

    /// Does this erased value carry this schema's raw type?
    fn is_raw(&self, value: &Value) -> bool {
        serde_json::from_value::<Self::Raw>(value.clone()).is_ok()
    }

    /// Does this erased value carry this schema's decoded type?
    ///
    /// Refining schemas should override this to also check their rules, so a
    /// stale stored value that no longer satisfies the current schema is not
    /// misrepresented as decoded.
    fn is_decoded(&self, value: &Value) -> bool {
        serde_json::from_value::<Self::Decoded>(value.clone()).is_ok()
    }

    /// Error reported when an erased value cannot even be read as `Raw`
    fn type_error(&self) -> ErrorNode {
        ErrorNode::new("is not valid")
    }

    /// Property names, when this schema decodes a fixed set of named fields
    fn known_fields(&self) -> Option<Vec<String>> {
        None
    }
}

/// Object-safe view of a [`Schema`], operating entirely on erased values.
///
/// The engine holds the whole-form schema behind this trait so the store and
/// aggregator stay untyped; the blanket impl below covers every `Schema`.
pub trait DynSchema {
    fn decode_value(&self, raw: &Value, options: &DecodeOptions) -> Result<Value, ErrorList>;
    fn is_raw_value(&self, value: &Value) -> bool;
    fn is_decoded_value(&self, value: &Value) -> bool;
    fn field_names(&self) -> Option<Vec<String>>;
}

impl<S: Schema> DynSchema for S {
    fn decode_value(&self, raw: &Value, options: &DecodeOptions) -> Result<Value, ErrorList> {
        let typed = match serde_json::from_value::<S::Raw>(raw.clone()) {
            Ok(typed) => typed,
            Err(_) => return Err(ErrorList::new(self.type_error())),
        };
        let decoded = self.decode(&typed, options)?;
        serde_json::to_value(decoded)
            .map_err(|_| ErrorList::new(ErrorNode::new("cannot be represented")))
    }

    fn is_raw_value(&self, value: &Value) -> bool {
        self.is_raw(value)
    }

    fn is_decoded_value(&self, value: &Value) -> bool {
        self.is_decoded(value)
    }

    fn field_names(&self) -> Option<Vec<String>> {
        self.known_fields()
    }
}
