// File: src/chain.rs
// Purpose: Compose two schemas end to end

use schema_form::{DecodeOptions, ErrorList, ErrorNode, Schema, Value};

/// Runs `first`, then feeds its decoded value into `second`.
///
/// The chain fails with the first stage's errors if that stage fails; the
/// second stage never sees a raw input the first stage rejected.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

/// Compose `first` and `second` into one schema
pub fn chain<A, B>(first: A, second: B) -> Chain<A, B>
where
    A: Schema,
    B: Schema<Raw = A::Decoded>,
{
    Chain { first, second }
}

impl<A, B> Schema for Chain<A, B>
where
    A: Schema,
    B: Schema<Raw = A::Decoded>,
{
    type Raw = A::Raw;
    type Decoded = B::Decoded;

    fn decode(&self, raw: &A::Raw, options: &DecodeOptions) -> Result<B::Decoded, ErrorList> {
        let intermediate = self.first.decode(raw, options)?;
        self.second.decode(&intermediate, options)
    }

    fn is_raw(&self, value: &Value) -> bool {
        self.first.is_raw(value)
    }

    fn is_decoded(&self, value: &Value) -> bool {
        self.second.is_decoded(value)
    }

    fn type_error(&self) -> ErrorNode {
        self.first.type_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::number::{number, number_from_string};
    use crate::string::text;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn age() -> impl Schema<Raw = String, Decoded = f64> {
        chain(
            chain(text().non_empty("is required"), number_from_string()),
            number()
                .non_negative("cannot be negative")
                .finite("must be finite"),
        )
    }

    fn all_errors() -> DecodeOptions {
        DecodeOptions { all_errors: true }
    }

    #[test]
    fn test_chain_decodes_through_every_stage() {
        assert_eq!(age().decode(&" 42 ".to_string(), &all_errors()), Ok(42.0));
    }

    #[test]
    fn test_chain_stops_at_the_failing_stage() {
        let errors = age()
            .decode(&"abc".to_string(), &all_errors())
            .expect_err("parse fails");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().message, "must be a number");

        let errors = age()
            .decode(&"".to_string(), &all_errors())
            .expect_err("required fails first");
        assert_eq!(errors.first().message, "is required");
    }

    #[test]
    fn test_chain_refines_the_parsed_value() {
        let errors = age()
            .decode(&"-5".to_string(), &all_errors())
            .expect_err("negative");
        assert_eq!(errors.first().message, "cannot be negative");
    }

    #[test]
    fn test_chain_predicates_use_the_ends() {
        let schema = age();
        assert!(schema.is_raw(&json!("42")));
        assert!(!schema.is_raw(&json!(42)));
        assert!(schema.is_decoded(&json!(42)));
        assert!(!schema.is_decoded(&json!(-1)));
        assert!(!schema.is_decoded(&json!("42")));
    }
}
