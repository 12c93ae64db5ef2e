//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default management HTTPS port.
pub const SERVER_PORT: u16 = 443;

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Device certificates are validated unless disabled.
pub const VALIDATE_CERTS: bool = true;

/// Default partition of HTTP/2 profiles.
pub const PARTITION: &str = crate::resource::http2::DEFAULT_PARTITION;

/// Directory under the user configuration directory.
pub const APP_DIR: &str = "bigip-conf";

/// File name of the per-user configuration file.
pub const CONFIG_FILE: &str = "config.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Path of the per-user configuration file, if the platform has a
/// configuration directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
