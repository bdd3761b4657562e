mod init;
pub use init::{init_logging, parse_rotation};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::rolling::Rotation;

use crate::config::listings_home;

/// Log filename used by the daemon.
pub const LOG_FILENAME: &str = "listings-daemon.log";
/// Global log file path, set once at startup.
static LOG_FILE_PATH: OnceLock<String> = OnceLock::new();
/// Store the log file path so structured errors can point at it.
pub fn set_log_file_path(path: String) {
    drop(LOG_FILE_PATH.set(path));
}
/// Get the log file path set at startup.
pub fn get_log_file_path() -> &'static str {
    LOG_FILE_PATH.get().map_or("", |s| s.as_str())
}
/// Configuration for the logging system.
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: Level,
    pub json_format: bool,
    pub rotation: Rotation,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: listings_home().join("logs"),
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}
impl LogConfig {
    /// Full path of the active log file.
    #[must_use]
    pub fn log_file_path(&self) -> PathBuf {
        self.log_dir.join(LOG_FILENAME)
    }
}
#[cfg(test)]
#[path = "../logging_tests.rs"]
mod logging_tests;
