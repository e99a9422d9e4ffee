// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use yaml_dialect::{ParseError, Value};

/// A configuration dialect: static metadata plus a parser and a serializer.
///
/// Implementations hold no per-call state, so one instance can serve
/// concurrent calls.
pub trait Format: Send + Sync {
    /// Name of the dialect, e.g. `yaml`.
    fn name(&self) -> &str;

    /// File extensions claimed by the dialect, without the leading dot.
    /// Matching is case-insensitive.
    fn extensions(&self) -> &[&str];

    /// Tie breaker when several dialects claim the same extension; higher wins.
    fn priority(&self) -> i32 {
        0
    }

    /// Parse a source text. `source_name` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on the first structural error.
    fn parse(&self, content: &str, source_name: &str) -> Result<Value, ParseError>;

    fn stringify(&self, value: &Value) -> String;
}
