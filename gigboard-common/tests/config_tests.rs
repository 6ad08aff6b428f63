//! Unit tests for configuration loading and root folder resolution
//!
//! Tests that manipulate GIGBOARD_ROOT_FOLDER are marked with #[serial]
//! so they don't race each other.

use gigboard_common::config::{
    default_root_folder, load_toml_config, resolve_root_folder, ConfigOverrides, ServerConfig,
    TomlConfig, DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT, ROOT_FOLDER_ENV,
};
use gigboard_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root = resolve_root_folder(None, ROOT_FOLDER_ENV, &TomlConfig::default());
    assert_eq!(root, default_root_folder());
    assert!(root.ends_with("gigboard") || root.ends_with("gigboard_data"));
}

#[test]
#[serial]
fn test_resolver_env_var_beats_config_file() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/gigboard-env-root");

    let file = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/gigboard-file-root")),
        ..Default::default()
    };
    let root = resolve_root_folder(None, ROOT_FOLDER_ENV, &file);
    assert_eq!(root, PathBuf::from("/tmp/gigboard-env-root"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_cli_beats_env_var() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/gigboard-env-root");

    let root = resolve_root_folder(
        Some(Path::new("/tmp/gigboard-cli-root")),
        ROOT_FOLDER_ENV,
        &TomlConfig::default(),
    );
    assert_eq!(root, PathBuf::from("/tmp/gigboard-cli-root"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_resolver_config_file_used_when_no_env() {
    env::remove_var(ROOT_FOLDER_ENV);

    let file = TomlConfig {
        root_folder: Some(PathBuf::from("/srv/gigboard")),
        ..Default::default()
    };
    assert_eq!(
        resolve_root_folder(None, ROOT_FOLDER_ENV, &file),
        PathBuf::from("/srv/gigboard")
    );
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_toml_config(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_config_file_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
root_folder = "/srv/gigboard"
host = "0.0.0.0"
port = 8080
max_connections = 3
log_level = "debug"
"#,
    )
    .unwrap();

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/gigboard")));
    assert_eq!(config.host.as_deref(), Some("0.0.0.0"));
    assert_eq!(config.port, Some(8080));
    assert_eq!(config.max_connections, Some(3));
    assert_eq!(config.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_malformed_config_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"").unwrap();

    let result = load_toml_config(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_server_config_defaults() {
    env::remove_var(ROOT_FOLDER_ENV);

    let config = ServerConfig::resolve(ConfigOverrides::default(), TomlConfig::default()).unwrap();
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    assert_eq!(config.log_level, "info");
    assert!(config.database_path().ends_with("gigboard.db"));
}

#[test]
#[serial]
fn test_server_config_cli_overrides_file() {
    env::remove_var(ROOT_FOLDER_ENV);

    let overrides = ConfigOverrides {
        root_folder: Some(PathBuf::from("/tmp/cli")),
        host: Some("0.0.0.0".to_string()),
        port: Some(9000),
    };
    let file = TomlConfig {
        host: Some("10.0.0.1".to_string()),
        port: Some(8080),
        max_connections: Some(2),
        ..Default::default()
    };

    let config = ServerConfig::resolve(overrides, file).unwrap();
    assert_eq!(config.root_folder, PathBuf::from("/tmp/cli"));
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 9000);
    assert_eq!(config.max_connections, 2);
    assert_eq!(config.database_path(), PathBuf::from("/tmp/cli/gigboard.db"));
}

#[test]
#[serial]
fn test_server_config_rejects_zero_connections() {
    let file = TomlConfig {
        max_connections: Some(0),
        ..Default::default()
    };
    let result = ServerConfig::resolve(ConfigOverrides::default(), file);
    assert!(matches!(result, Err(Error::Config(_))));
}
