// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use yaml_dialect::{ParseError, ParseOptions, Value};

use crate::format::Format;
use crate::registry::{Registry, extension_of};

/// Settings for [`Loader`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfiguration {
    /// Directories searched by [`Loader::discover`], in order.
    pub search_paths: Vec<PathBuf>,
    /// Options for the built-in YAML dialect.
    pub parse: ParseOptions,
}

#[derive(Debug, derive_more::Constructor, derive_more::Display)]
#[display("{}: {source}", path.display())]
pub struct FileError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Constructor, derive_more::Display)]
#[display("No dialect registered for extension '{extension}' of '{}'", path.display())]
pub struct UnknownExtension {
    pub path: PathBuf,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Constructor, derive_more::Display)]
#[display("Cannot detect the dialect of '{}' without a file extension", path.display())]
pub struct MissingExtension {
    pub path: PathBuf,
}

#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum LoadError {
    Io(FileError),
    Parse(ParseError),
    UnknownExtension(UnknownExtension),
    MissingExtension(MissingExtension),
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(error) => Some(&error.source),
            Self::Parse(error) => Some(error),
            Self::UnknownExtension(_) | Self::MissingExtension(_) => None,
        }
    }
}

/// Reads and writes configuration files through a [`Registry`].
pub struct Loader {
    registry: Registry,
    search_paths: Vec<PathBuf>,
}

impl Loader {
    /// A loader using the default registry.
    #[must_use]
    pub fn new(config: LoaderConfiguration) -> Self {
        Self {
            registry: Registry::with_defaults(config.parse),
            search_paths: config.search_paths,
        }
    }

    /// A loader using a custom registry.
    #[must_use]
    pub const fn with_registry(registry: Registry, search_paths: Vec<PathBuf>) -> Self {
        Self {
            registry,
            search_paths,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    fn format_for(&self, path: &Path) -> Result<&dyn Format, LoadError> {
        let name = path.to_string_lossy();
        let extension =
            extension_of(&name).ok_or_else(|| MissingExtension::new(path.to_path_buf()))?;
        match self.registry.lookup(&extension) {
            Some(format) => Ok(format),
            None => Err(UnknownExtension::new(path.to_path_buf(), extension).into()),
        }
    }

    /// Parse text with the dialect detected from `path`.
    ///
    /// The path is only used for detection and error messages.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if no dialect matches the path or the text does
    /// not parse.
    pub fn load_str(&self, content: &str, path: &Path) -> Result<Value, LoadError> {
        let format = self.format_for(path)?;
        Ok(format.parse(content, &path.display().to_string())?)
    }

    /// Read and parse a file.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if no dialect matches the path, the file cannot
    /// be read, or its content does not parse.
    pub fn load_file(&self, path: &Path) -> Result<Value, LoadError> {
        // Detect first so unsupported files are never read.
        self.format_for(path)?;
        debug!("Loading '{}'", path.display());
        let content = std::fs::read_to_string(path)
            .map_err(|source| FileError::new(path.to_path_buf(), source))?;
        self.load_str(&content, path)
    }

    /// Serialize a value with the dialect detected from `path` and write it,
    /// followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if no dialect matches the path or the file
    /// cannot be written.
    pub fn write_file(&self, path: &Path, value: &Value) -> Result<(), LoadError> {
        let format = self.format_for(path)?;
        let mut text = format.stringify(value);
        text.push('\n');
        debug!("Writing '{}'", path.display());
        std::fs::write(path, text).map_err(|source| FileError::new(path.to_path_buf(), source))?;
        Ok(())
    }

    /// Find the existing `<dir>/<base_name>.<extension>` files, for every
    /// search directory in order and every registered extension.
    ///
    /// Missing search directories are skipped.
    #[must_use]
    pub fn discover(&self, base_name: &str) -> Vec<PathBuf> {
        let extensions = self.registry.extensions();
        let mut found = Vec::new();
        for dir in &self.search_paths {
            if !dir.is_dir() {
                debug!("Skipping missing search path '{}'", dir.display());
                continue;
            }
            found.extend(
                extensions
                    .iter()
                    .map(|extension| dir.join(format!("{base_name}.{extension}")))
                    .filter(|candidate| candidate.is_file()),
            );
        }
        debug!("Discovered {} files for '{base_name}'", found.len());
        found
    }

    /// Discover and load every `<base_name>` file, in discovery order.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoadError`] raised by [`Loader::load_file`].
    pub fn load_all(&self, base_name: &str) -> Result<Vec<(PathBuf, Value)>, LoadError> {
        self.discover(base_name)
            .into_iter()
            .map(|path| {
                let value = self.load_file(&path)?;
                Ok((path, value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use yaml_dialect::ErrorKind;

    use super::*;

    fn loader() -> Loader {
        Loader::new(LoaderConfiguration::default())
    }

    #[test]
    fn test_load_str() {
        let value = loader()
            .load_str("a: 1\n", Path::new("inline.yml"))
            .unwrap();
        assert_eq!(value.get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_parse_errors_carry_the_path() {
        let err = loader()
            .load_str("key: [1, 2", Path::new("conf/app.yaml"))
            .unwrap_err();
        let LoadError::Parse(parse_error) = &err else {
            panic!("unexpected error: {err}");
        };
        assert_eq!(parse_error.kind, ErrorKind::UnexpectedToken);
        assert_eq!(parse_error.source_name, "conf/app.yaml");
        assert!(err.to_string().starts_with("conf/app.yaml:1:11: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_detection_errors() {
        let err = loader().load_str("", Path::new("app.toml")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "No dialect registered for extension 'toml' of 'app.toml'"
        );
        assert!(matches!(
            loader().load_str("", Path::new("Makefile")),
            Err(LoadError::MissingExtension(_))
        ));
    }

    #[test]
    fn test_configuration_defaults() {
        let config: LoaderConfiguration =
            serde_json::from_str(r#"{"search_paths": ["/etc/app"], "parse": {"max_depth": 8}}"#)
                .unwrap();
        assert_eq!(config.search_paths, vec![PathBuf::from("/etc/app")]);
        assert_eq!(config.parse.max_depth, 8);
        assert!(!config.parse.resolve_aliases);
        assert_eq!(
            serde_json::from_str::<LoaderConfiguration>("{}").unwrap(),
            LoaderConfiguration::default()
        );
    }
}
