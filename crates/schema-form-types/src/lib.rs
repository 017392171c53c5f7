//! Reference schema building blocks for the `schema-form` state engine.
//!
//! The engine consumes anything implementing `schema_form::Schema`; this
//! crate supplies the pieces a typical form needs so the contract is usable
//! out of the box:
//!
//! - [`text`] — trimming string schema with rule refinements
//! - [`email`] — email address preset
//! - [`number`] — numeric refinements (non-negative, finite, min/max)
//! - [`number_from_string`] — parse a text input into a number
//! - [`chain`] — compose two schemas end to end
//! - [`object`] — whole-form schema assembling named properties into a struct
//!
//! # Example
//!
//! ```rust,ignore
//! use schema_form_types::{chain, number, number_from_string, object, text};
//!
//! #[derive(Clone, serde::Serialize, serde::Deserialize)]
//! struct User { name: String, age: f64 }
//!
//! // Whole-form schema over decoded values
//! let user = object::<User>()
//!     .property("name", text().non_empty("is required"))
//!     .property("age", number().non_negative("cannot be negative"));
//!
//! // Field schema for a text input feeding the numeric field
//! let age_input = chain(
//!     chain(text().non_empty("is required"), number_from_string()),
//!     number().non_negative("cannot be negative").finite("must be finite"),
//! );
//! ```

pub mod chain;
pub mod number;
pub mod object;
pub mod string;

pub use chain::{chain, Chain};
pub use number::{number, number_from_string, NumberSchema, ParsedNumberSchema};
pub use object::{object, ObjectSchema};
pub use string::{email, text, TextSchema};
