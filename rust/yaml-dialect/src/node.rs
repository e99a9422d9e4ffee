// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Parse-time node tree.
//!
//! Nodes keep the raw scalar text and its style; type coercion only happens
//! when the tree is materialized into [`crate::Value`]. Anchors are node
//! properties rather than wrappers, so any node kind may carry one.

use std::rc::Rc;

use ordermap::OrderMap;

use crate::span::Position;

/// How a scalar was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarStyle {
    /// Bare text, subject to type coercion
    Plain,
    /// `'text'`
    SingleQuoted,
    /// `"text"`
    DoubleQuoted,
    /// `|` block
    Literal,
    /// `>` block
    Folded,
}

/// A node with its optional anchor and the position of its first token.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Optional anchor name (from `&name`)
    pub anchor: Option<String>,
    pub kind: NodeKind,
    pub position: Position,
}

/// The content of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Scalar { text: String, style: ScalarStyle },
    Sequence(Vec<Node>),
    /// Insertion-ordered; a repeated key keeps its first slot and takes the last value.
    Mapping(OrderMap<String, Node>),
    /// An alias with a snapshot of the anchored node as it stood when the
    /// alias was read (`None` if the anchor was not defined yet).
    Alias {
        name: String,
        target: Option<Rc<Node>>,
    },
}

impl Node {
    #[must_use]
    pub fn new(kind: NodeKind, position: Position) -> Self {
        Self {
            anchor: None,
            kind,
            position,
        }
    }

    /// An empty plain scalar, materialized as null.
    #[must_use]
    pub fn null(position: Position) -> Self {
        Self::scalar(String::new(), ScalarStyle::Plain, position)
    }

    #[must_use]
    pub fn scalar(text: String, style: ScalarStyle, position: Position) -> Self {
        Self::new(NodeKind::Scalar { text, style }, position)
    }

    /// Attach an anchor name to this node.
    #[must_use]
    pub fn with_anchor(mut self, anchor: String) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Returns `true` for the empty plain scalar produced for missing values.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(
            &self.kind,
            NodeKind::Scalar { text, style: ScalarStyle::Plain } if text.is_empty()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_node() {
        let node = Node::null(Position::default());
        assert!(node.is_null());
        assert!(node.anchor.is_none());

        let quoted = Node::scalar(String::new(), ScalarStyle::DoubleQuoted, Position::default());
        assert!(!quoted.is_null());
    }

    #[test]
    fn test_with_anchor() {
        let node = Node::scalar("x".to_owned(), ScalarStyle::Plain, Position::new(2, 4))
            .with_anchor("base".to_owned());
        assert_eq!(node.anchor.as_deref(), Some("base"));
        assert_eq!(node.position, Position::new(2, 4));
    }
}
