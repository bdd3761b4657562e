use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_empty_toml_is_default() {
    let config: DaemonConfig = toml::from_str("").expect("empty TOML should parse");
    assert_eq!(config, DaemonConfig::default());
}

#[test]
fn test_default_store_settings() {
    let config = DaemonConfig::default();
    assert_eq!(config.store_timeout().unwrap(), DEFAULT_STORE_TIMEOUT);
    assert_eq!(config.store.file, "listings.redb");
}

#[test]
fn test_missing_file_returns_defaults() {
    let dir = tempdir().unwrap();
    let config = load_config(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, DaemonConfig::default());
}

#[test]
fn test_load_full_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[store]
timeout = "750ms"
file = "codes.redb"

[codes.locations]
Thane = "THN"

[codes.types]
Warehouse = "W"
"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    assert_eq!(config.store_timeout().unwrap(), Duration::from_millis(750));
    assert_eq!(
        config.database_path(Path::new("/var/lib/listings")),
        PathBuf::from("/var/lib/listings/codes.redb")
    );

    let tables = config.code_tables().unwrap();
    assert_eq!(tables.derive_location_code("thane").unwrap(), "THN");
    assert_eq!(tables.derive_type_code("Warehouse").unwrap(), "W");
}

#[test]
fn test_partial_store_table_keeps_other_defaults() {
    let config: DaemonConfig = toml::from_str("[store]\ntimeout = \"2s\"\n").unwrap();
    assert_eq!(config.store.file, "listings.redb");
    assert_eq!(config.store_timeout().unwrap(), Duration::from_secs(2));
}

#[test]
fn test_unknown_key_rejected() {
    let result: Result<DaemonConfig, _> = toml::from_str("[store]\nretries = 3\n");
    assert!(result.is_err());
}

#[test]
fn test_bad_timeout_rejected() {
    let config: DaemonConfig = toml::from_str("[store]\ntimeout = \"soon\"\n").unwrap();
    assert!(matches!(
        config.store_timeout(),
        Err(ConfigError::Timeout { .. })
    ));
}

#[test]
fn test_bad_location_code_rejected() {
    let config: DaemonConfig =
        toml::from_str("[codes.locations]\nThane = \"thane\"\n").unwrap();
    assert!(matches!(config.code_tables(), Err(ConfigError::Codes(_))));
}

#[test]
fn test_default_paths_live_under_listings_home() {
    assert!(default_config_path().ends_with(".listings/config.toml"));
    assert!(default_data_dir().ends_with(".listings/data"));
}
