// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

use std::fs;
use std::path::PathBuf;

use formats::{Format, LoadError, Loader, LoaderConfiguration, Registry};
use serde_json::json;
use tempfile::TempDir;
use yaml_dialect::{ParseError, ParseOptions, Value};

fn loader_for(dirs: &[&TempDir]) -> Loader {
    Loader::new(LoaderConfiguration {
        search_paths: dirs.iter().map(|dir| dir.path().to_path_buf()).collect(),
        ..LoaderConfiguration::default()
    })
}

/// Reads every file as a single string.
struct Text;

impl Format for Text {
    fn name(&self) -> &str {
        "text"
    }

    fn extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn parse(&self, content: &str, _source_name: &str) -> Result<Value, ParseError> {
        Ok(Value::from(content))
    }

    fn stringify(&self, value: &Value) -> String {
        value.as_str().unwrap_or_default().to_owned()
    }
}

#[test]
fn load_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.yaml");
    fs::write(&path, "server:\n  port: 8080\n  hosts: [a, b]\n").unwrap();

    let value = loader_for(&[]).load_file(&path).unwrap();
    assert_eq!(
        serde_json::Value::from(value),
        json!({"server": {"port": 8080, "hosts": ["a", "b"]}})
    );
}

#[test]
fn load_file_extension_is_case_insensitive() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("APP.YML");
    fs::write(&path, "a: 1\n").unwrap();
    assert_eq!(
        loader_for(&[]).load_file(&path).unwrap().get("a"),
        Some(&Value::Int(1))
    );
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.yaml");
    let err = loader_for(&[]).load_file(&path).unwrap_err();
    let LoadError::Io(file_error) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(file_error.path, path);
    assert_eq!(file_error.source.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn load_unknown_extension_is_not_read() {
    // The file does not exist, detection fails first
    let err = loader_for(&[])
        .load_file(&PathBuf::from("nowhere/app.toml"))
        .unwrap_err();
    assert!(matches!(err, LoadError::UnknownExtension(_)));
}

#[test]
fn parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.yaml");
    fs::write(&path, "a: 'open\n").unwrap();
    let err = loader_for(&[]).load_file(&path).unwrap_err();
    let LoadError::Parse(parse_error) = &err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(parse_error.source_name, path.display().to_string());
}

#[test]
fn write_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.yml");
    let value = Value::from(json!({
        "name": "svc",
        "ports": [80, 443],
        "motd": "hello\nworld",
        "version": "1.0"
    }));

    let loader = loader_for(&[]);
    loader.write_file(&path, &value).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "name: svc\nports:\n  - 80\n  - 443\nmotd: |\n  hello\n  world\nversion: \"1.0\"\n"
    );
    assert_eq!(loader.load_file(&path).unwrap(), value);
}

#[test]
fn discover_in_search_order() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("settings.yml"), "a: 1\n").unwrap();
    fs::write(second.path().join("settings.yaml"), "b: 2\n").unwrap();
    fs::write(second.path().join("settings.yml"), "c: 3\n").unwrap();
    fs::write(second.path().join("other.yaml"), "d: 4\n").unwrap();

    let loader = loader_for(&[&first, &second]);
    assert_eq!(
        loader.discover("settings"),
        vec![
            first.path().join("settings.yml"),
            second.path().join("settings.yaml"),
            second.path().join("settings.yml"),
        ]
    );
    assert!(loader.discover("absent").is_empty());
}

#[test]
fn discover_skips_missing_directories() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.yaml"), "a: 1\n").unwrap();
    let loader = Loader::new(LoaderConfiguration {
        search_paths: vec![dir.path().join("does-not-exist"), dir.path().to_path_buf()],
        ..LoaderConfiguration::default()
    });
    assert_eq!(loader.discover("settings"), vec![dir.path().join("settings.yaml")]);
}

#[test]
fn load_all_returns_each_file() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    fs::write(first.path().join("app.yaml"), "port: 1\n").unwrap();
    fs::write(second.path().join("app.yaml"), "port: 2\nextra: true\n").unwrap();

    let loaded = loader_for(&[&first, &second]).load_all("app").unwrap();
    let summary: Vec<(PathBuf, serde_json::Value)> = loaded
        .into_iter()
        .map(|(path, value)| (path, serde_json::Value::from(value)))
        .collect();
    assert_eq!(
        summary,
        vec![
            (first.path().join("app.yaml"), json!({"port": 1})),
            (second.path().join("app.yaml"), json!({"port": 2, "extra": true})),
        ]
    );
}

#[test]
fn load_all_stops_at_first_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.yaml"), "port: [1\n").unwrap();
    let result = loader_for(&[&dir]).load_all("app");
    assert!(matches!(result, Err(LoadError::Parse(_))));
}

#[test]
fn loader_options_reach_the_dialect() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("aliases.yaml");
    fs::write(&path, "base: &b 5\ncopy: *b\n").unwrap();

    let loader = Loader::new(LoaderConfiguration {
        parse: ParseOptions {
            resolve_aliases: true,
            ..ParseOptions::default()
        },
        ..LoaderConfiguration::default()
    });
    assert_eq!(
        loader.load_file(&path).unwrap().get("copy"),
        Some(&Value::Int(5))
    );
}

#[test]
fn custom_dialects_take_part_in_discovery() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "plain notes").unwrap();
    fs::write(dir.path().join("notes.yaml"), "a: 1\n").unwrap();

    let mut registry = Registry::with_defaults(ParseOptions::default());
    registry.register(Text);
    let loader = Loader::with_registry(registry, vec![dir.path().to_path_buf()]);

    let loaded = loader.load_all("notes").unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].0, dir.path().join("notes.yaml"));
    assert_eq!(loaded[1].1, Value::from("plain notes"));
}
