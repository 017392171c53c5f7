// File: src/error.rs
// Purpose: Structured validation errors returned as data, never thrown

use serde::Serialize;
use std::fmt;

/// One structured validation error: where it happened and what rule failed.
///
/// The `path` addresses a field or sub-path inside the decoded shape; an
/// empty path means the error applies to the value as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ErrorNode {
    pub path: Vec<String>,
    pub message: String,
}

impl ErrorNode {
    /// Create an error with an empty path
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            message: message.into(),
        }
    }

    /// Create an error addressed at a path
    pub fn at(path: Vec<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// Prepend a path segment, re-addressing the error one level up
    pub fn prefixed(mut self, segment: &str) -> Self {
        self.path.insert(0, segment.to_string());
        self
    }

    /// Human-readable label including the path, e.g. `age: must be a number`
    pub fn label(&self) -> String {
        if self.path.is_empty() {
            self.message.clone()
        } else {
            format!("{}: {}", self.path.join("."), self.message)
        }
    }
}

/// Ordered, non-empty sequence of validation errors.
///
/// Non-emptiness is enforced by construction: there is no way to obtain an
/// `ErrorList` with zero nodes, so "has errors" and "holds an ErrorList" are
/// the same statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorList {
    nodes: Vec<ErrorNode>,
}

impl ErrorList {
    /// Create a list from its first (guaranteed) node
    pub fn new(first: ErrorNode) -> Self {
        Self { nodes: vec![first] }
    }

    /// Create a list from a vec; `None` if the vec is empty
    pub fn from_vec(nodes: Vec<ErrorNode>) -> Option<Self> {
        if nodes.is_empty() {
            None
        } else {
            Some(Self { nodes })
        }
    }

    /// Append one node, preserving order
    pub fn push(&mut self, node: ErrorNode) {
        self.nodes.push(node);
    }

    /// Append every node of another list, preserving order
    pub fn extend(&mut self, other: ErrorList) {
        self.nodes.extend(other.nodes);
    }

    /// Prepend a path segment to every node
    pub fn prefixed(self, segment: &str) -> Self {
        Self {
            nodes: self
                .nodes
                .into_iter()
                .map(|node| node.prefixed(segment))
                .collect(),
        }
    }

    /// The first error, which always exists
    pub fn first(&self) -> &ErrorNode {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorNode> {
        self.nodes.iter()
    }

    /// True if any node's message equals the given text, at any path
    pub fn contains_message(&self, message: &str) -> bool {
        self.nodes.iter().any(|node| node.message == message)
    }
}

impl IntoIterator for ErrorList {
    type Item = ErrorNode;
    type IntoIter = std::vec::IntoIter<ErrorNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ErrorList {
    type Item = &'a ErrorNode;
    type IntoIter = std::slice::Iter<'a, ErrorNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_errors(self))
    }
}

/// Render an error list for display, one labeled entry per node
pub fn format_errors(errors: &ErrorList) -> String {
    errors
        .iter()
        .map(ErrorNode::label)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_list_never_empty() {
        assert!(ErrorList::from_vec(vec![]).is_none());

        let list = ErrorList::new(ErrorNode::new("is required"));
        assert_eq!(list.len(), 1);
        assert_eq!(list.first().message, "is required");
    }

    #[test]
    fn test_error_list_preserves_order() {
        let mut list = ErrorList::new(ErrorNode::new("first"));
        list.push(ErrorNode::new("second"));
        list.extend(ErrorList::new(ErrorNode::new("third")));

        let messages: Vec<&str> = list.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_prefixed_paths() {
        let list = ErrorList::from_vec(vec![
            ErrorNode::new("must be a number"),
            ErrorNode::at(vec!["inner".to_string()], "is required"),
        ])
        .unwrap()
        .prefixed("age");

        let paths: Vec<Vec<String>> = list.iter().map(|n| n.path.clone()).collect();
        assert_eq!(paths[0], vec!["age".to_string()]);
        assert_eq!(paths[1], vec!["age".to_string(), "inner".to_string()]);
    }

    #[test]
    fn test_label_and_format() {
        let node = ErrorNode::at(vec!["age".to_string()], "must be a number");
        assert_eq!(node.label(), "age: must be a number");
        assert_eq!(ErrorNode::new("is required").label(), "is required");

        let mut list = ErrorList::new(node);
        list.push(ErrorNode::new("is required"));
        assert_eq!(format_errors(&list), "age: must be a number; is required");
    }

    #[test]
    fn test_contains_message() {
        let list = ErrorList::new(ErrorNode::at(vec!["a".to_string()], "too short"));
        assert!(list.contains_message("too short"));
        assert!(!list.contains_message("too long"));
    }
}
