//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;
use crate::reconcile::TargetState;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Device connection section
    #[serde(default)]
    pub provider: ProviderSection,

    /// DNS resolver settings
    #[serde(default)]
    pub dns: DnsSection,

    /// HTTP/2 profile settings
    #[serde(default)]
    pub http2_profile: Http2Section,
}

/// Device connection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSection {
    /// Management address
    pub server: Option<String>,

    /// Management HTTPS port (default: 443)
    pub server_port: Option<u16>,

    /// User for basic authentication
    pub user: Option<String>,

    /// Password for basic authentication
    pub password: Option<String>,

    /// Validate the device certificate (default: true)
    pub validate_certs: Option<bool>,

    /// Request timeout in seconds (default: 30)
    pub timeout: Option<u64>,
}

/// DNS resolver settings section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DnsSection {
    /// "enabled" or "disabled"
    pub cache: Option<String>,

    /// Name servers, one string or a list
    pub name_servers: Option<StringOrList>,

    /// Search domains, one string or a list
    pub search: Option<StringOrList>,

    /// 4 or 6
    pub ip_version: Option<i64>,

    /// "present" or "absent"
    pub state: Option<TargetState>,
}

/// HTTP/2 profile section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Http2Section {
    pub name: Option<String>,
    pub partition: Option<String>,
    pub parent: Option<String>,
    pub description: Option<String>,
    pub streams: Option<u32>,
    pub idle_timeout: Option<u32>,
    pub enforce_tls_requirements: Option<bool>,
    pub frame_size: Option<u32>,
    pub activation_modes: Option<StringOrList>,
    pub insert_header: Option<bool>,
    pub insert_header_name: Option<String>,
    pub state: Option<TargetState>,
}

/// A list that may be written as a single string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    /// `key = "value"`
    One(String),
    /// `key = ["a", "b"]`
    Many(Vec<String>),
}

impl StringOrList {
    /// Returns the values as a list.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value.clone()],
            Self::Many(values) => values.clone(),
        }
    }
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# bigip-conf configuration file
#
# Command line options override the values below.

[provider]
# Management address of the device (required)
# server = "lb.example.com"

# Management HTTPS port (default: 443)
# server_port = 443

# Basic authentication (required)
# The password may also come from the BIGIP_PASSWORD environment variable.
# user = "admin"
# password = "secret"

# Validate the device certificate (default: true)
# validate_certs = true

# Request timeout in seconds (default: 30)
# timeout = 30

[dns]
# Resolver cache: "enabled" or "disabled"
# cache = "enabled"

# Name servers and search domains; "none" clears the list
# name_servers = ["192.0.2.53", "198.51.100.53"]
# search = ["example.com"]

# IP version: 4 or 6
# ip_version = 4

# "present" converges to the values above, "absent" removes them
# state = "present"

[http2_profile]
# name = "http2-custom"
# partition = "Common"
# parent = "http2"
# description = "HTTP/2 for public listeners"
# streams = 10
# idle_timeout = 300
# enforce_tls_requirements = true
# frame_size = 2048
# activation_modes = ["alpn"]
# insert_header = false
# insert_header_name = "X-HTTP2"
# state = "present"
"#
    .to_string()
}
