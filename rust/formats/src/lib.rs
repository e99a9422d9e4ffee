// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Configuration dialects, extension based detection, and file loading.
//!
//! A [`Registry`] maps file extensions to [`Format`] implementations. The
//! [`Loader`] uses it to read, write and discover configuration files.
//!
//! ```no_run
//! use std::path::PathBuf;
//!
//! use formats::{Loader, LoaderConfiguration};
//!
//! let loader = Loader::new(LoaderConfiguration {
//!     search_paths: vec![PathBuf::from("/etc/app"), PathBuf::from("./config")],
//!     ..LoaderConfiguration::default()
//! });
//! for (path, value) in loader.load_all("settings").unwrap() {
//!     println!("{}: {}", path.display(), value.type_name());
//! }
//! ```

mod format;
mod load;
mod registry;
mod yaml;

pub use format::Format;
pub use load::{FileError, LoadError, Loader, LoaderConfiguration, MissingExtension, UnknownExtension};
pub use registry::{Registry, extension_of};
pub use yaml::YamlFormat;
