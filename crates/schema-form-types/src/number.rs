// File: src/number.rs
// Purpose: Numeric schemas: refinements on numbers and parsing from strings

use schema_form::{DecodeOptions, ErrorList, ErrorNode, Schema, Value};

/// A number-to-number schema checking its rules in declaration order.
#[derive(Debug, Clone)]
pub struct NumberSchema {
    type_message: String,
    rules: Vec<NumberRule>,
}

#[derive(Debug, Clone)]
struct NumberRule {
    check: NumberCheck,
    message: String,
}

#[derive(Debug, Clone)]
enum NumberCheck {
    NonNegative,
    Finite,
    Min(f64),
    Max(f64),
}

impl NumberCheck {
    fn passes(&self, value: f64) -> bool {
        match self {
            NumberCheck::NonNegative => value >= 0.0,
            NumberCheck::Finite => value.is_finite(),
            NumberCheck::Min(min) => value >= *min,
            NumberCheck::Max(max) => value <= *max,
        }
    }
}

/// A number schema with no rules yet
pub fn number() -> NumberSchema {
    NumberSchema {
        type_message: "must be a number".to_string(),
        rules: Vec::new(),
    }
}

impl NumberSchema {
    fn rule(mut self, check: NumberCheck, message: impl Into<String>) -> Self {
        self.rules.push(NumberRule {
            check,
            message: message.into(),
        });
        self
    }

    pub fn non_negative(self, message: impl Into<String>) -> Self {
        self.rule(NumberCheck::NonNegative, message)
    }

    pub fn finite(self, message: impl Into<String>) -> Self {
        self.rule(NumberCheck::Finite, message)
    }

    pub fn min(self, min: f64, message: impl Into<String>) -> Self {
        self.rule(NumberCheck::Min(min), message)
    }

    pub fn max(self, max: f64, message: impl Into<String>) -> Self {
        self.rule(NumberCheck::Max(max), message)
    }

    /// Override the type-mismatch message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.type_message = message.into();
        self
    }

    fn violations(&self, value: f64, options: &DecodeOptions) -> Vec<ErrorNode> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            if !rule.check.passes(value) {
                errors.push(ErrorNode::new(rule.message.clone()));
                if !options.all_errors {
                    break;
                }
            }
        }
        errors
    }
}

impl Schema for NumberSchema {
    type Raw = f64;
    type Decoded = f64;

    fn decode(&self, raw: &f64, options: &DecodeOptions) -> Result<f64, ErrorList> {
        match ErrorList::from_vec(self.violations(*raw, options)) {
            Some(errors) => Err(errors),
            None => Ok(*raw),
        }
    }

    fn is_raw(&self, value: &Value) -> bool {
        value.is_number()
    }

    fn is_decoded(&self, value: &Value) -> bool {
        value
            .as_f64()
            .is_some_and(|number| self.rules.iter().all(|rule| rule.check.passes(number)))
    }

    fn type_error(&self) -> ErrorNode {
        ErrorNode::new(self.type_message.clone())
    }
}

/// Parses a trimmed string into a number.
///
/// Pairs with [`crate::chain`] to refine the parsed number, mirroring a text
/// input that feeds a numeric field.
#[derive(Debug, Clone)]
pub struct ParsedNumberSchema {
    message: String,
}

/// A string-to-number parsing schema with the default message
pub fn number_from_string() -> ParsedNumberSchema {
    ParsedNumberSchema {
        message: "must be a number".to_string(),
    }
}

impl ParsedNumberSchema {
    /// Override the parse-failure message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Schema for ParsedNumberSchema {
    type Raw = String;
    type Decoded = f64;

    fn decode(&self, raw: &String, _options: &DecodeOptions) -> Result<f64, ErrorList> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| ErrorList::new(ErrorNode::new(self.message.clone())))
    }

    fn is_raw(&self, value: &Value) -> bool {
        value.is_string()
    }

    fn is_decoded(&self, value: &Value) -> bool {
        value.is_number()
    }

    fn type_error(&self) -> ErrorNode {
        ErrorNode::new("must be a string")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn all_errors() -> DecodeOptions {
        DecodeOptions { all_errors: true }
    }

    #[test]
    fn test_number_rules() {
        let schema = number().non_negative("cannot be negative").max(130.0, "too large");

        assert_eq!(schema.decode(&42.0, &all_errors()), Ok(42.0));
        let errors = schema.decode(&-5.0, &all_errors()).expect_err("negative");
        assert_eq!(errors.first().message, "cannot be negative");
        assert!(schema.decode(&131.0, &all_errors()).is_err());
    }

    #[test]
    fn test_min_and_max_bounds() {
        let schema = number().min(18.0, "must be at least 18").max(120.0, "too large");
        assert!(schema.decode(&17.0, &all_errors()).is_err());
        assert_eq!(schema.decode(&18.0, &all_errors()), Ok(18.0));
        assert!(schema.decode(&121.0, &all_errors()).is_err());
    }

    #[test]
    fn test_finite_rejects_infinity() {
        let schema = number().finite("must be finite");
        assert!(schema.decode(&f64::INFINITY, &all_errors()).is_err());
        assert!(schema.decode(&1.5, &all_errors()).is_ok());
    }

    #[test]
    fn test_number_predicates() {
        let schema = number().non_negative("cannot be negative");
        assert!(schema.is_raw(&json!(1)));
        assert!(!schema.is_raw(&json!("1")));
        assert!(schema.is_decoded(&json!(3)));
        assert!(!schema.is_decoded(&json!(-3)));
    }

    #[test]
    fn test_parse_from_string() {
        let schema = number_from_string();
        assert_eq!(schema.decode(&" 42 ".to_string(), &all_errors()), Ok(42.0));

        let errors = schema
            .decode(&"abc".to_string(), &all_errors())
            .expect_err("not a number");
        assert_eq!(errors.first().message, "must be a number");
    }

    #[test]
    fn test_parse_message_override() {
        let schema = number_from_string().message("enter digits");
        let errors = schema
            .decode(&"x".to_string(), &all_errors())
            .expect_err("not a number");
        assert_eq!(errors.first().message, "enter digits");
    }
}
