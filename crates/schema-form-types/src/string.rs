// File: src/string.rs
// Purpose: String schema with trimming, rule refinements, and presets

use once_cell::sync::Lazy;
use regex::Regex;
use schema_form::{DecodeOptions, ErrorList, ErrorNode, Schema, Value};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// A string-to-string schema: trims by default, then checks its rules in
/// declaration order.
#[derive(Debug, Clone)]
pub struct TextSchema {
    trim: bool,
    type_message: String,
    rules: Vec<StringRule>,
}

#[derive(Debug, Clone)]
struct StringRule {
    check: StringCheck,
    message: String,
}

#[derive(Debug, Clone)]
enum StringCheck {
    NonEmpty,
    MinLength(usize),
    MaxLength(usize),
    Pattern(Regex),
}

impl StringCheck {
    fn passes(&self, value: &str) -> bool {
        match self {
            StringCheck::NonEmpty => !value.is_empty(),
            StringCheck::MinLength(min) => value.chars().count() >= *min,
            StringCheck::MaxLength(max) => value.chars().count() <= *max,
            StringCheck::Pattern(pattern) => pattern.is_match(value),
        }
    }
}

/// A trimming string schema with no rules yet
pub fn text() -> TextSchema {
    TextSchema {
        trim: true,
        type_message: "must be a string".to_string(),
        rules: Vec::new(),
    }
}

/// Email address preset: required, then format-checked
pub fn email() -> TextSchema {
    text()
        .non_empty("is required")
        .rule(
            StringCheck::Pattern(EMAIL_REGEX.clone()),
            "must be a valid email address",
        )
}

impl TextSchema {
    fn rule(mut self, check: StringCheck, message: impl Into<String>) -> Self {
        self.rules.push(StringRule {
            check,
            message: message.into(),
        });
        self
    }

    /// Keep surrounding whitespace instead of trimming before validation
    pub fn keep_whitespace(mut self) -> Self {
        self.trim = false;
        self
    }

    pub fn non_empty(self, message: impl Into<String>) -> Self {
        self.rule(StringCheck::NonEmpty, message)
    }

    pub fn min_length(self, min: usize, message: impl Into<String>) -> Self {
        self.rule(StringCheck::MinLength(min), message)
    }

    pub fn max_length(self, max: usize, message: impl Into<String>) -> Self {
        self.rule(StringCheck::MaxLength(max), message)
    }

    /// Add a regex rule. Panics on an invalid pattern: a malformed pattern
    /// is a programming error and fails loudly at construction time.
    pub fn pattern(self, pattern: &str, message: impl Into<String>) -> Self {
        let compiled = match Regex::new(pattern) {
            Ok(compiled) => compiled,
            Err(err) => panic!("invalid pattern {pattern:?}: {err}"),
        };
        self.rule(StringCheck::Pattern(compiled), message)
    }

    /// Override the type-mismatch message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.type_message = message.into();
        self
    }

    fn violations(&self, value: &str, options: &DecodeOptions) -> Vec<ErrorNode> {
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

impl Schema for TextSchema {
    type Raw = String;
    type Decoded = String;

    fn decode(&self, raw: &String, options: &DecodeOptions) -> Result<String, ErrorList> {
        let value = if self.trim {
            raw.trim().to_string()
        } else {
            raw.clone()
        };
        match ErrorList::from_vec(self.violations(&value, options)) {
            Some(errors) => Err(errors),
            None => Ok(value),
        }
    }

    fn is_raw(&self, value: &Value) -> bool {
        value.is_string()
    }

    fn is_decoded(&self, value: &Value) -> bool {
        value
            .as_str()
            .is_some_and(|text| self.rules.iter().all(|rule| rule.check.passes(text)))
    }

    fn type_error(&self) -> ErrorNode {
        ErrorNode::new(self.type_message.clone())
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
    fn test_trims_before_validating() {
        let schema = text().non_empty("is required");
        assert_eq!(schema.decode(&"  Alice  ".to_string(), &all_errors()), Ok("Alice".to_string()));
        assert!(schema.decode(&"   ".to_string(), &all_errors()).is_err());
    }

    #[test]
    fn test_keep_whitespace() {
        let schema = text().keep_whitespace().non_empty("is required");
        assert_eq!(schema.decode(&"  x ".to_string(), &all_errors()), Ok("  x ".to_string()));
        assert!(schema.decode(&"   ".to_string(), &all_errors()).is_ok());
    }

    #[test]
    fn test_rules_run_in_declaration_order() {
        let schema = text()
            .non_empty("is required")
            .min_length(5, "too short")
            .pattern("^[a-z]+$", "lowercase only");

        let errors = schema
            .decode(&"A1".to_string(), &all_errors())
            .expect_err("two rules violated");
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["too short", "lowercase only"]);
    }

    #[test]
    fn test_first_error_only_without_all_errors() {
        let schema = text().min_length(5, "too short").pattern("^[a-z]+$", "lowercase only");
        let errors = schema
            .decode(&"A1".to_string(), &DecodeOptions::default())
            .expect_err("rule violated");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().message, "too short");
    }

    #[test]
    fn test_max_length_counts_chars() {
        let schema = text().max_length(3, "too long");
        assert!(schema.decode(&"äöü".to_string(), &all_errors()).is_ok());
        assert!(schema.decode(&"äöüx".to_string(), &all_errors()).is_err());
    }

    #[test]
    fn test_email_preset() {
        let schema = email();
        assert!(schema.decode(&"user@example.com".to_string(), &all_errors()).is_ok());

        let errors = schema
            .decode(&"not-an-email".to_string(), &all_errors())
            .expect_err("format invalid");
        assert!(errors.contains_message("must be a valid email address"));

        let errors = schema
            .decode(&"".to_string(), &all_errors())
            .expect_err("empty");
        assert!(errors.contains_message("is required"));
    }

    #[test]
    fn test_predicates_check_rules() {
        let schema = text().non_empty("is required");
        assert!(schema.is_raw(&json!("")));
        assert!(!schema.is_raw(&json!(1)));
        assert!(schema.is_decoded(&json!("x")));
        assert!(!schema.is_decoded(&json!("")));
    }

    #[test]
    #[should_panic(expected = "invalid pattern")]
    fn test_malformed_pattern_fails_loudly() {
        let _ = text().pattern("([", "broken");
    }
}
