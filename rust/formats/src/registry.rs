// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use log::debug;
use yaml_dialect::ParseOptions;

use crate::format::Format;
use crate::yaml::YamlFormat;

struct Registration {
    format: Box<dyn Format>,
    /// Lower-cased copy of the format's extensions.
    extensions: Vec<String>,
}

/// Resolves file extensions to dialects.
#[derive(Default)]
pub struct Registry {
    registrations: Vec<Registration>,
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in YAML dialect.
    #[must_use]
    pub fn with_defaults(options: ParseOptions) -> Self {
        let mut registry = Self::new();
        registry.register(YamlFormat::new(options));
        registry
    }

    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let extensions: Vec<String> = format
            .extensions()
            .iter()
            .map(|extension| extension.to_lowercase())
            .collect();
        debug!(
            "Registered dialect '{}' for extensions {extensions:?} with priority {}",
            format.name(),
            format.priority()
        );
        self.registrations.push(Registration {
            format: Box::new(format),
            extensions,
        });
    }

    /// Find the dialect for an extension (without the leading dot).
    ///
    /// Among dialects claiming the extension the highest priority wins, and
    /// the last registration wins between equal priorities.
    #[must_use]
    pub fn lookup(&self, extension: &str) -> Option<&dyn Format> {
        let extension = extension.to_lowercase();
        let format = self
            .registrations
            .iter()
            .filter(|registration| registration.extensions.contains(&extension))
            // `max_by_key` returns the last of equal elements
            .max_by_key(|registration| registration.format.priority())
            .map(|registration| registration.format.as_ref());
        match format {
            Some(format) => debug!("Resolved extension '{extension}' to dialect '{}'", format.name()),
            None => debug!("No dialect registered for extension '{extension}'"),
        }
        format
    }

    /// Find the dialect for a file path or URL.
    #[must_use]
    pub fn detect(&self, path: &str) -> Option<&dyn Format> {
        extension_of(path).and_then(|extension| self.lookup(&extension))
    }

    /// Every registered extension, in registration order and without duplicates.
    #[must_use]
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<&str> = Vec::new();
        for extension in self
            .registrations
            .iter()
            .flat_map(|registration| &registration.extensions)
        {
            if !extensions.contains(&extension.as_str()) {
                extensions.push(extension);
            }
        }
        extensions
    }

    /// Names of the registered dialects, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.registrations
            .iter()
            .map(|registration| registration.format.name())
            .collect()
    }
}

/// Extract the lower-cased extension of a path.
///
/// Only the file name part is considered, and a query string is ignored, so
/// `https://host/dir.d/config.YML?rev=2` gives `yml`.
#[must_use]
pub fn extension_of(path: &str) -> Option<String> {
    let path = path.split('?').next().unwrap_or(path);
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let (_, extension) = file_name.rsplit_once('.')?;
    (!extension.is_empty()).then(|| extension.to_lowercase())
}

#[cfg(test)]
mod tests {
    use yaml_dialect::{ParseError, Value};

    use super::*;

    struct Stub {
        name: &'static str,
        extensions: &'static [&'static str],
        priority: i32,
    }

    impl Format for Stub {
        fn name(&self) -> &str {
            self.name
        }

        fn extensions(&self) -> &[&str] {
            self.extensions
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn parse(&self, content: &str, _source_name: &str) -> Result<Value, ParseError> {
            Ok(Value::from(content))
        }

        fn stringify(&self, value: &Value) -> String {
            value.as_str().unwrap_or_default().to_owned()
        }
    }

    fn stub(name: &'static str, extensions: &'static [&'static str], priority: i32) -> Stub {
        Stub {
            name,
            extensions,
            priority,
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("config.yaml").as_deref(), Some("yaml"));
        assert_eq!(extension_of("/etc/app/Config.YML").as_deref(), Some("yml"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(
            extension_of("https://host/dir.d/config.yaml?rev=2.1").as_deref(),
            Some("yaml")
        );
        assert_eq!(extension_of("config.yml?from=a/b.json").as_deref(), Some("yml"));
        assert_eq!(extension_of(r"C:\conf.d\app.yml").as_deref(), Some("yml"));
        assert_eq!(extension_of("/etc/conf.d/README"), None);
        assert_eq!(extension_of("trailing."), None);
    }

    #[test]
    fn test_defaults() {
        let registry = Registry::with_defaults(ParseOptions::default());
        assert_eq!(registry.names(), vec!["yaml"]);
        assert_eq!(registry.extensions(), vec!["yaml", "yml"]);
        assert_eq!(registry.lookup("YAML").map(Format::name), Some("yaml"));
        assert_eq!(registry.detect("a/b.yml").map(Format::name), Some("yaml"));
        assert!(registry.lookup("json").is_none());
        assert!(registry.detect("Makefile").is_none());
    }

    #[test]
    fn test_extensions_are_case_insensitive() {
        let mut registry = Registry::new();
        registry.register(stub("ini", &["INI", "Cfg"], 0));
        assert_eq!(registry.extensions(), vec!["ini", "cfg"]);
        assert_eq!(registry.lookup("cfg").map(Format::name), Some("ini"));
        assert_eq!(registry.detect("setup.CFG").map(Format::name), Some("ini"));
    }

    #[test]
    fn test_highest_priority_wins() {
        let mut registry = Registry::with_defaults(ParseOptions::default());
        registry.register(stub("strict-yaml", &["yaml"], 10));
        registry.register(stub("loose-yaml", &["yaml"], 5));
        assert_eq!(registry.lookup("yaml").map(Format::name), Some("strict-yaml"));
        // `yml` is still only claimed by the built-in dialect
        assert_eq!(registry.lookup("yml").map(Format::name), Some("yaml"));
        assert_eq!(registry.extensions(), vec!["yaml", "yml"]);
    }

    #[test]
    fn test_last_registration_wins_ties() {
        let mut registry = Registry::with_defaults(ParseOptions::default());
        registry.register(stub("override", &["yml"], 0));
        assert_eq!(registry.lookup("yml").map(Format::name), Some("override"));
        assert_eq!(registry.lookup("yaml").map(Format::name), Some("yaml"));
    }
}
