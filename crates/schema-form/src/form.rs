// File: src/form.rs
// Purpose: Form-level store ownership, aggregate recomputation, and change propagation

use crate::data::FormData;
use crate::error::ErrorList;
use crate::field::SchemaField;
use crate::schema::{DecodeOptions, DynSchema, RawObject, Schema};
use crate::value::StoredValue;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Read-mostly snapshot of a form's current state, handed to subscribers
/// after every mutation. Exactly one of `decoded`/`errors` is present.
#[derive(Debug, Clone, Serialize)]
pub struct FormContext {
    pub data: FormData,
    pub decoded: Option<Value>,
    pub errors: Option<ErrorList>,
    pub initial_values: RawObject,
}

/// Identifies one subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FormContext)>;

#[derive(Default)]
struct ListenerSet {
    next_id: u64,
    entries: Vec<(SubscriptionId, Rc<RefCell<Listener>>)>,
}

struct FormCore {
    data: FormData,
    schema: Rc<dyn DynSchema>,
    initial_values: RawObject,
    /// The whole-form aggregate, recomputed eagerly on every mutation so
    /// reads can never observe a stale projection.
    aggregate: Result<Value, ErrorList>,
    revision: u64,
}

impl FormCore {
    fn new(schema: Rc<dyn DynSchema>, initial_values: RawObject) -> Self {
        let mut core = Self {
            data: FormData::new(),
            schema,
            initial_values,
            aggregate: Err(ErrorList::new(crate::error::ErrorNode::new("is empty"))),
            revision: 0,
        };
        core.recompute();
        core
    }

    /// Recompute the whole-form result from the mapping and the schema.
    ///
    /// All fields valid (including the empty form): decode the assembled
    /// decoded values. Any field invalid: re-decode the assembled raw inputs
    /// with every error collected and take that list as authoritative; if the
    /// re-decode unexpectedly succeeds (a field schema stricter than the form
    /// schema), the aggregate still fails, carrying the in-order union of
    /// per-field errors.
    fn recompute(&mut self) {
        let options = DecodeOptions { all_errors: true };

        self.aggregate = match self.data.decoded_or_errors() {
            Ok(decoded) => self.schema.decode_value(&Value::Object(decoded), &options),
            Err(field_errors) => {
                let raws = self.data.raw_object();
                match self.schema.decode_value(&Value::Object(raws), &options) {
                    Err(errors) => Err(errors),
                    Ok(_) => Err(field_errors),
                }
            }
        };

        tracing::debug!(
            fields = self.data.len(),
            valid = self.aggregate.is_ok(),
            "recomputed form aggregate"
        );
    }

    fn context(&self) -> FormContext {
        FormContext {
            data: self.data.clone(),
            decoded: self.aggregate.as_ref().ok().cloned(),
            errors: self.aggregate.as_ref().err().cloned(),
            initial_values: self.initial_values.clone(),
        }
    }
}

/// Cloneable handle to one form instance: the injected access point every
/// field receives instead of an ambient context.
///
/// Reads are unrestricted; the only write path is [`FormHandle::set_field_value`].
/// The handle is single-threaded by construction (`Rc` interior): every
/// operation is synchronous and edits are serialized by the surrounding event
/// dispatch.
#[derive(Clone)]
pub struct FormHandle {
    core: Rc<RefCell<FormCore>>,
    listeners: Rc<RefCell<ListenerSet>>,
}

impl FormHandle {
    fn new(schema: Rc<dyn DynSchema>, initial_values: RawObject) -> Self {
        Self {
            core: Rc::new(RefCell::new(FormCore::new(schema, initial_values))),
            listeners: Rc::new(RefCell::new(ListenerSet::default())),
        }
    }

    /// Replace one field's result wholesale. The single mutation entry point:
    /// recomputes the aggregate and notifies subscribers before returning.
    pub fn set_field_value(&self, name: impl Into<String>, value: StoredValue) {
        let name = name.into();
        tracing::trace!(field = %name, valid = value.is_valid(), "set field value");

        let context = {
            let mut core = self.core.borrow_mut();
            core.data.replace(name, value);
            core.recompute();
            core.revision += 1;
            core.context()
        };
        self.notify(&context);
    }

    /// Snapshot of the current state
    pub fn context(&self) -> FormContext {
        self.core.borrow().context()
    }

    /// One field's stored result
    pub fn field(&self, name: &str) -> Option<StoredValue> {
        self.core.borrow().data.get(name).cloned()
    }

    /// The current mapping
    pub fn data(&self) -> FormData {
        self.core.borrow().data.clone()
    }

    /// The decoded aggregate, present only when the whole form decodes
    pub fn decoded(&self) -> Option<Value> {
        self.core.borrow().aggregate.as_ref().ok().cloned()
    }

    /// The aggregate errors, present whenever the decoded aggregate is not
    pub fn errors(&self) -> Option<ErrorList> {
        self.core.borrow().aggregate.as_ref().err().cloned()
    }

    /// The form's initial values, as supplied at construction
    pub fn initial_values(&self) -> RawObject {
        self.core.borrow().initial_values.clone()
    }

    /// Monotonic change counter, bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.core.borrow().revision
    }

    /// Register a listener invoked with a fresh snapshot after every
    /// mutation. Listeners may read and mutate the form; a listener that
    /// mutates is skipped for the nested notification it triggers and picks
    /// up the final state on the next one.
    pub fn subscribe(&self, listener: impl FnMut(&FormContext) + 'static) -> SubscriptionId {
        let boxed: Listener = Box::new(listener);
        let mut set = self.listeners.borrow_mut();
        set.next_id += 1;
        let id = SubscriptionId(set.next_id);
        set.entries.push((id, Rc::new(RefCell::new(boxed))));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners
            .borrow_mut()
            .entries
            .retain(|(entry_id, _)| *entry_id != id);
    }

    fn notify(&self, context: &FormContext) {
        // Snapshot the callbacks so listeners can subscribe or unsubscribe
        // from inside a notification without poisoning the iteration.
        let callbacks: Vec<Rc<RefCell<Listener>>> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in callbacks {
            // A listener still running further up the stack is skipped; it
            // reads the latest state once its own invocation resumes.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)(context);
            }
        }
    }
}

/// Per-form render payload: the mapping plus the typed aggregate.
#[derive(Debug, Clone)]
pub struct FormView<Decoded> {
    pub data: FormData,
    pub decoded: Option<Decoded>,
    pub errors: Option<ErrorList>,
}

/// A mounted form instance typed by its whole-form schema.
///
/// Owns the submit callback and hands out [`FormHandle`] clones and field
/// bindings. Dropping the form drops the store with it.
pub struct SchemaForm<S: Schema<Raw = RawObject>> {
    handle: FormHandle,
    schema: Rc<S>,
    on_submit: Box<dyn FnMut(S::Decoded)>,
}

impl<S: Schema<Raw = RawObject> + 'static> SchemaForm<S> {
    pub fn builder(schema: S) -> SchemaFormBuilder<S> {
        SchemaFormBuilder {
            schema,
            initial_values: RawObject::new(),
            on_submit: None,
        }
    }

    /// A handle for fields and external readers
    pub fn handle(&self) -> FormHandle {
        self.handle.clone()
    }

    /// Bind a named field to this form.
    ///
    /// Panics if the whole-form schema enumerates its properties and `name`
    /// is not one of them: binding an unknown field is a programming error
    /// and fails loudly at construction time rather than surfacing as a
    /// permanent decode failure later.
    pub fn field<FS: Schema>(&self, name: impl Into<String>, schema: FS) -> SchemaField<FS> {
        let name = name.into();
        if let Some(known) = self.schema.known_fields() {
            if !known.iter().any(|field| field == &name) {
                panic!(
                    "field `{}` is not part of the form schema (known fields: {})",
                    name,
                    known.join(", ")
                );
            }
        }
        SchemaField::new(name, schema, self.handle.clone())
    }

    /// The per-form render payload with the aggregate typed by the schema
    pub fn view(&self) -> FormView<S::Decoded> {
        let context = self.handle.context();
        FormView {
            data: context.data,
            decoded: context
                .decoded
                .and_then(|value| serde_json::from_value(value).ok()),
            errors: context.errors,
        }
    }

    /// True when the aggregate decoded value is present
    pub fn can_submit(&self) -> bool {
        self.core_decoded().is_some()
    }

    /// Invoke the submit callback with the decoded aggregate, only when the
    /// whole form currently decodes. Refused silently otherwise.
    pub fn submit(&mut self) {
        match self.core_decoded() {
            Some(decoded) => {
                tracing::debug!("submitting decoded form value");
                (self.on_submit)(decoded);
            }
            None => {
                tracing::trace!("submit refused while form aggregate has errors");
            }
        }
    }

    fn core_decoded(&self) -> Option<S::Decoded> {
        self.handle
            .decoded()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

/// Builder for [`SchemaForm`].
pub struct SchemaFormBuilder<S: Schema<Raw = RawObject>> {
    schema: S,
    initial_values: RawObject,
    on_submit: Option<Box<dyn FnMut(S::Decoded)>>,
}

impl<S: Schema<Raw = RawObject> + 'static> SchemaFormBuilder<S> {
    /// Initial values exposed through the context; they do not pre-populate
    /// the mapping, which starts empty.
    pub fn initial_values(mut self, values: RawObject) -> Self {
        self.initial_values = values;
        self
    }

    pub fn on_submit(mut self, callback: impl FnMut(S::Decoded) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> SchemaForm<S> {
        let schema = Rc::new(self.schema);
        let erased: Rc<dyn DynSchema> = Rc::clone(&schema) as Rc<dyn DynSchema>;
        SchemaForm {
            handle: FormHandle::new(erased, self.initial_values),
            schema,
            on_submit: self.on_submit.unwrap_or_else(|| Box::new(|_| {})),
        }
    }
}
