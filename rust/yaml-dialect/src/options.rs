// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use serde::{Deserialize, Serialize};

/// Options controlling parsing and materialization.
///
/// Deserializes from partial input; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Substitute aliases with the anchored value instead of the `*name` text.
    pub resolve_aliases: bool,
    /// Maximum nesting of collections, checked while parsing and materializing.
    pub max_depth: usize,
    /// Maximum number of alias substitutions per parse when resolving aliases.
    pub max_alias_expansions: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            resolve_aliases: false,
            max_depth: 128,
            max_alias_expansions: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_options_use_defaults() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"resolve_aliases": true}"#).unwrap();
        assert!(options.resolve_aliases);
        assert_eq!(options.max_depth, 128);
        assert_eq!(options.max_alias_expansions, 1024);
    }
}
