// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Node tree to value tree conversion.

use ordermap::OrderMap;

use crate::coerce::coerce_plain;
use crate::error::{ErrorKind, ParseError};
use crate::node::{Node, NodeKind, ScalarStyle};
use crate::options::ParseOptions;
use crate::value::Value;

/// Materialize the documents of one parse call.
///
/// The alias expansion budget is shared by all documents.
pub(crate) fn materialize_documents(
    documents: &[Node],
    options: &ParseOptions,
    source_name: &str,
) -> Result<Vec<Value>, ParseError> {
    let mut materializer = Materializer {
        options,
        source_name,
        depth: 0,
        expansions: 0,
    };
    documents
        .iter()
        .map(|document| materializer.value(document))
        .collect()
}

struct Materializer<'a> {
    options: &'a ParseOptions,
    source_name: &'a str,
    depth: usize,
    expansions: usize,
}

impl Materializer<'_> {
    fn value(&mut self, node: &Node) -> Result<Value, ParseError> {
        self.depth += 1;
        let result = if self.depth > self.options.max_depth {
            Err(self.error(ErrorKind::NestingTooDeep { limit: self.options.max_depth }, node))
        } else {
            self.content(node)
        };
        self.depth -= 1;
        result
    }

    fn content(&mut self, node: &Node) -> Result<Value, ParseError> {
        match &node.kind {
            NodeKind::Scalar {
                text,
                style: ScalarStyle::Plain,
            } => Ok(coerce_plain(text)),
            NodeKind::Scalar { text, .. } => Ok(Value::String(text.clone())),
            NodeKind::Sequence(items) => items
                .iter()
                .map(|item| self.value(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            NodeKind::Mapping(entries) => entries
                .iter()
                .map(|(key, value)| Ok((key.clone(), self.value(value)?)))
                .collect::<Result<OrderMap<_, _>, _>>()
                .map(Value::Mapping),
            NodeKind::Alias { name, target } => {
                if !self.options.resolve_aliases {
                    return Ok(Value::String(format!("*{name}")));
                }
                let Some(target) = target else {
                    return Err(self.error(ErrorKind::UndefinedAlias(name.clone()), node));
                };
                self.expansions += 1;
                if self.expansions > self.options.max_alias_expansions {
                    let limit = self.options.max_alias_expansions;
                    return Err(self.error(ErrorKind::TooManyAliases { limit }, node));
                }
                self.value(target)
            }
        }
    }

    fn error(&self, kind: ErrorKind, node: &Node) -> ParseError {
        ParseError::new(kind, self.source_name).with_position(node.position)
    }
}
