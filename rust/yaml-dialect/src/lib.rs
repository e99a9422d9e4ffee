// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! A parser and serializer for a YAML-like configuration dialect.
//!
//! Parsing runs in three phases:
//! - the lexer turns the source text into a finite token stream and never fails
//! - the recursive descent parser builds one node tree per document, tracking
//!   indentation and an anchor table
//! - the materializer converts node trees into [`Value`] trees, coercing plain
//!   scalars into typed values
//!
//! [`stringify`] converts a [`Value`] back into block-style text.
//!
//! # Example
//!
//! ```
//! use yaml_dialect::{parse, stringify, Value};
//!
//! let value = parse("name: web\nports:\n  - 80\n  - 443\n", "inline").unwrap();
//! assert_eq!(value.get_path("ports.1"), Some(&Value::Int(443)));
//! assert_eq!(stringify(&value), "name: web\nports:\n  - 80\n  - 443");
//! ```

mod coerce;
mod emitter;
mod error;
mod lexer;
mod materialize;
mod node;
mod options;
mod parser;
mod span;
mod token;
mod value;


use log::debug;

pub use coerce::{coerce_plain, normalize_date};
pub use emitter::{stringify, stringify_documents};
pub use error::{ErrorKind, ParseError};
pub use lexer::{Lexer, tokenize};
pub use node::{Node, NodeKind, ScalarStyle};
pub use options::ParseOptions;
pub use span::{Position, Span};
pub use token::{Chomping, Lexeme, QuoteStyle, Token};
pub use value::{PathError, Value};

/// Name of the dialect.
pub const DIALECT_NAME: &str = "yaml";

/// File extensions claimed by the dialect.
pub const EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Parse a source text with default options.
///
/// A single document is returned as is; several documents are returned as
/// a [`Value::Sequence`], and a source without documents is [`Value::Null`].
///
/// # Errors
///
/// Returns a [`ParseError`] tagged with `source_name` on the first
/// structural error. No partial result is produced.
pub fn parse(content: &str, source_name: &str) -> Result<Value, ParseError> {
    parse_with(content, source_name, &ParseOptions::default())
}

/// Parse a source text with explicit options.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with(
    content: &str,
    source_name: &str,
    options: &ParseOptions,
) -> Result<Value, ParseError> {
    let mut documents = parse_documents_with(content, source_name, options)?;
    Ok(match documents.len() {
        0 => Value::Null,
        1 => documents.pop().unwrap_or_default(),
        _ => Value::Sequence(documents),
    })
}

/// Parse a source text into one value per document, with default options.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_documents(content: &str, source_name: &str) -> Result<Vec<Value>, ParseError> {
    parse_documents_with(content, source_name, &ParseOptions::default())
}

/// Parse a source text into one value per document.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_documents_with(
    content: &str,
    source_name: &str,
    options: &ParseOptions,
) -> Result<Vec<Value>, ParseError> {
    let nodes = parse_nodes(content, source_name, options)?;
    let values = materialize::materialize_documents(&nodes, options, source_name)?;
    debug!("Parsing '{source_name}' Done ({} documents)", values.len());
    Ok(values)
}

/// Parse a source text into node trees without materializing them.
///
/// Nodes keep the raw scalar text, the scalar style, anchors and alias
/// snapshots.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_nodes(
    content: &str,
    source_name: &str,
    options: &ParseOptions,
) -> Result<Vec<Node>, ParseError> {
    debug!("Parsing '{source_name}'");
    let tokens = tokenize(content);
    parser::parse_tokens(&tokens, content, source_name, options)
}
