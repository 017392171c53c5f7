//! # schema-form
//!
//! A schema-driven form state engine: describe each field as a raw-to-decoded
//! transformation with validation rules, and let the engine drive per-field
//! editing state plus whole-form aggregation from it.
//!
//! The engine orchestrates state around schemas, it does not define them:
//! anything implementing [`Schema`] plugs in (see the companion
//! `schema-form-types` crate for ready-made building blocks).
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use schema_form::SchemaForm;
//! use schema_form_types::{chain, number, number_from_string, object, text};
//!
//! #[derive(Clone, serde::Serialize, serde::Deserialize)]
//! struct User { name: String, age: f64 }
//!
//! let mut form = SchemaForm::builder(
//!     object::<User>()
//!         .property("name", text().non_empty("is required"))
//!         .property("age", number().non_negative("cannot be negative")),
//! )
//! .on_submit(|user: User| println!("registered {}", user.name))
//! .build();
//!
//! let mut age = form.field(
//!     "age",
//!     chain(number_from_string(), number().non_negative("cannot be negative")),
//! );
//! age.on_change("42".to_string());
//! form.submit();
//! ```
//!
//! ## Design
//!
//! - Validation failure is data, never a panic: every decode returns
//!   `Result<_, ErrorList>` and a failed edit is stored next to its raw
//!   input for redisplay.
//! - One write path: fields mutate the shared mapping only through
//!   [`FormHandle::set_field_value`], which recomputes the whole-form
//!   aggregate eagerly and notifies subscribers.
//! - Explicit propagation: fields receive a [`FormHandle`] by injection;
//!   there is no ambient context.
//! - Single-threaded and synchronous throughout; edits are serialized by the
//!   surrounding event dispatch.

pub mod data;
pub mod error;
pub mod field;
pub mod form;
pub mod schema;
pub mod snapshot;
pub mod value;

pub use data::FormData;
pub use error::{format_errors, ErrorList, ErrorNode};
pub use field::{FieldRenderState, FieldView, SchemaField};
pub use form::{
    FormContext, FormHandle, FormView, SchemaForm, SchemaFormBuilder, SubscriptionId,
};
pub use schema::{DecodeOptions, DynSchema, RawObject, Schema};
pub use snapshot::FormSnapshot;
pub use value::{FormValue, StoredValue};

// Re-export the erased value type used at every boundary
pub use serde_json::Value;
