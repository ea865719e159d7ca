//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_marvin_config.toml"));
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, marvin_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[provider]
model = "gpt-4o"
temperature = 0.2

[session]
max_tool_rounds = 5
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.provider.model, "gpt-4o");
    assert_eq!(config.provider.temperature, 0.2);
    assert_eq!(config.session.max_tool_rounds, 5);
    // Defaults preserved
    assert_eq!(config.provider.base_url, "https://api.openai.com/v1");
    assert_eq!(config.provider.max_tokens, 4096);
    assert!(config.session.persist);
    assert_eq!(config.logging.filter, "marvin=info");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(result.is_err());
    let err = result.unwrap_err();
    assert!(matches!(err, marvin_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_warns_but_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[provider]
temperature = 9.0
"#,
    )
    .unwrap();

    // Validation warns; the parsed value is kept as-is.
    let config = load_from_path(&path).unwrap();
    assert_eq!(config.provider.temperature, 9.0);
}

#[test]
fn create_default_config_writes_parseable_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.provider.model, "gpt-4o-mini");
    assert_eq!(config.session.max_tool_rounds, 10);
}

#[test]
fn default_config_path_ends_with_marvin_config() {
    let path = default_config_path().unwrap();
    assert!(path.ends_with("marvin/config.toml"));
}
