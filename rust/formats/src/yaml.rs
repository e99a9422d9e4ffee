// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use yaml_dialect::{DIALECT_NAME, EXTENSIONS, ParseError, ParseOptions, Value};

use crate::format::Format;

/// The built-in YAML-like dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlFormat {
    pub options: ParseOptions,
}

impl YamlFormat {
    #[must_use]
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl Format for YamlFormat {
    fn name(&self) -> &str {
        DIALECT_NAME
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn parse(&self, content: &str, source_name: &str) -> Result<Value, ParseError> {
        yaml_dialect::parse_with(content, source_name, &self.options)
    }

    fn stringify(&self, value: &Value) -> String {
        yaml_dialect::stringify(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata() {
        let format = YamlFormat::default();
        assert_eq!(format.name(), "yaml");
        assert_eq!(format.extensions(), &["yaml", "yml"]);
        assert_eq!(format.priority(), 0);
    }

    #[test]
    fn test_options_are_applied() {
        let format = YamlFormat::new(ParseOptions {
            resolve_aliases: true,
            ..ParseOptions::default()
        });
        let value = format.parse("a: &x 1\nb: *x\n", "t.yaml").unwrap();
        assert_eq!(value.get("b"), Some(&Value::Int(1)));
        assert_eq!(
            YamlFormat::default()
                .parse("a: &x 1\nb: *x\n", "t.yaml")
                .unwrap()
                .get("b"),
            Some(&Value::from("*x"))
        );
    }

    #[test]
    fn test_stringify() {
        let value = YamlFormat::default().parse("a: [1, 2]\n", "t.yaml").unwrap();
        assert_eq!(YamlFormat::default().stringify(&value), "a:\n  - 1\n  - 2");
    }
}
