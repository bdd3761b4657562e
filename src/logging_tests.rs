use super::*;

#[test]
fn test_log_config_default() {
    let config = LogConfig::default();
    assert_eq!(config.log_level, Level::INFO);
    assert!(!config.json_format);
    assert!(config.log_dir.ends_with(".listings/logs"));
}

#[test]
fn test_log_file_path_uses_log_filename() {
    let config = LogConfig {
        log_dir: PathBuf::from("/tmp/listings-logs"),
        ..LogConfig::default()
    };
    assert_eq!(
        config.log_file_path(),
        PathBuf::from("/tmp/listings-logs/listings-daemon.log")
    );
}

#[test]
fn test_parse_rotation_hourly() {
    let debug = format!("{:?}", parse_rotation("hourly"));
    assert_eq!(debug, format!("{:?}", Rotation::HOURLY));
}

#[test]
fn test_parse_rotation_never_is_case_insensitive() {
    let debug = format!("{:?}", parse_rotation("NEVER"));
    assert_eq!(debug, format!("{:?}", Rotation::NEVER));
}

#[test]
fn test_parse_rotation_unknown_defaults_to_daily() {
    let weekly = format!("{:?}", parse_rotation("weekly"));
    let daily = format!("{:?}", Rotation::DAILY);
    assert_eq!(weekly, daily);
}

#[test]
fn test_log_filename_constant() {
    assert_eq!(LOG_FILENAME, "listings-daemon.log");
}
