// File: src/object.rs
// Purpose: Whole-form object schema decoding named properties into a struct

use schema_form::{DecodeOptions, DynSchema, ErrorList, ErrorNode, RawObject, Schema, Value};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::rc::Rc;

/// Decodes an object property by property, then assembles the decoded values
/// into `To` through serde.
///
/// Every property error is addressed at its property name; with `all_errors`
/// set, errors from all properties are collected in declaration order.
/// Properties not declared are ignored.
#[derive(Clone)]
pub struct ObjectSchema<To> {
    properties: Vec<(String, Rc<dyn DynSchema>)>,
    missing_message: String,
    _decoded: PhantomData<fn() -> To>,
}

/// An object schema with no properties yet
pub fn object<To>() -> ObjectSchema<To> {
    ObjectSchema {
        properties: Vec::new(),
        missing_message: "is required".to_string(),
        _decoded: PhantomData,
    }
}

impl<To> ObjectSchema<To> {
    /// Declare a named property decoded by the given schema
    pub fn property<S: Schema + 'static>(mut self, name: impl Into<String>, schema: S) -> Self {
        self.properties.push((name.into(), Rc::new(schema)));
        self
    }

    /// Override the message reported for an absent property
    pub fn missing_message(mut self, message: impl Into<String>) -> Self {
        self.missing_message = message.into();
        self
    }
}

impl<To> Schema for ObjectSchema<To>
where
    To: Clone + Serialize + DeserializeOwned + 'static,
{
    type Raw = RawObject;
    type Decoded = To;

    fn decode(&self, raw: &RawObject, options: &DecodeOptions) -> Result<To, ErrorList> {
        let mut decoded = RawObject::new();
        let mut errors: Option<ErrorList> = None;

        for (name, schema) in &self.properties {
            let result = match raw.get(name) {
                None => Err(ErrorList::new(ErrorNode::at(
                    vec![name.clone()],
                    self.missing_message.clone(),
                ))),
                Some(value) => schema
                    .decode_value(value, options)
                    .map_err(|list| list.prefixed(name)),
            };

            match result {
                Ok(value) => {
                    decoded.insert(name.clone(), value);
                }
                Err(list) => {
                    if !options.all_errors {
                        return Err(list);
                    }
                    match errors.as_mut() {
                        Some(collected) => collected.extend(list),
                        None => errors = Some(list),
                    }
                }
            }
        }

        if let Some(errors) = errors {
            return Err(errors);
        }
        serde_json::from_value(Value::Object(decoded)).map_err(|err| {
            ErrorList::new(ErrorNode::new(format!(
                "does not match the expected shape: {err}"
            )))
        })
    }

    fn is_raw(&self, value: &Value) -> bool {
        value.is_object()
    }

    fn type_error(&self) -> ErrorNode {
        ErrorNode::new("must be an object")
    }

    fn known_fields(&self) -> Option<Vec<String>> {
        Some(self.properties.iter().map(|(name, _)| name.clone()).collect())
    }
}
