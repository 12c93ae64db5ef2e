//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::reconcile::TargetState;
use crate::resource::ResourceError;
use crate::resource::dns::DnsParams;
use crate::resource::http2::Http2Params;

use super::cli::{Cli, Command, DnsArgs, Http2Args};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{DnsSection, Http2Section, StringOrList, TomlConfig};

/// Connection settings for one device.
#[derive(Clone)]
pub struct Provider {
    /// `https://{server}:{server_port}`
    pub base_url: Url,

    /// User for basic authentication
    pub user: String,

    /// Password for basic authentication
    pub password: String,

    /// Whether the device certificate is validated
    pub validate_certs: bool,

    /// Request timeout
    pub timeout: Duration,
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("base_url", &self.base_url.as_str())
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("validate_certs", &self.validate_certs)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// The resource operation to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Reconcile DNS resolver settings
    Dns(DnsParams),
    /// Reconcile an HTTP/2 profile
    Http2Profile(Http2Params),
}

impl Task {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dns(_) => "dns",
            Self::Http2Profile(_) => "http2-profile",
        }
    }

    /// Requested target state.
    #[must_use]
    pub const fn state(&self) -> TargetState {
        match self {
            Self::Dns(params) => params.state,
            Self::Http2Profile(params) => params.state,
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Device connection
    pub provider: Provider,

    /// Operation to run
    pub task: Task,

    /// Compute changes without applying them
    pub check_mode: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ server: {}, user: {}, validate_certs: {}, timeout: {}s, task: {}, \
             state: {}, check_mode: {} }}",
            self.provider.base_url,
            self.provider.user,
            self.provider.validate_certs,
            self.provider.timeout.as_secs(),
            self.task.name(),
            self.task.state(),
            self.check_mode,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command is `init`
    /// - Required fields are missing (`server`, `user`, `password`, profile `name`)
    /// - The device address does not form a valid URL
    /// - The timeout is zero
    /// - The resource parameters are invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let task = match &cli.command {
            Command::Dns(args) => Task::Dns(resolve_dns(args, toml.map(|t| &t.dns))?),
            Command::Http2Profile(args) => {
                Task::Http2Profile(resolve_http2(args, toml.map(|t| &t.http2_profile))?)
            }
            Command::Init { .. } => return Err(ConfigError::NoTask),
        };

        let provider = Self::resolve_provider(cli, toml)?;

        Ok(Self {
            provider,
            task,
            check_mode: cli.check,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. Otherwise
    /// the per-user configuration file is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.is_file()));

        let toml = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Some(TomlConfig::load(&path)?)
            }
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_provider(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Provider, ConfigError> {
        let section = toml.map(|t| &t.provider);

        // Priority: CLI explicit > TOML > default
        let server = cli
            .server
            .as_deref()
            .or_else(|| section.and_then(|s| s.server.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SERVER,
                    "Use --server or set provider.server in config file",
                )
            })?;

        let port = cli
            .server_port
            .or_else(|| section.and_then(|s| s.server_port))
            .unwrap_or(defaults::SERVER_PORT);

        let user = cli
            .user
            .clone()
            .or_else(|| section.and_then(|s| s.user.clone()))
            .ok_or_else(|| {
                ConfigError::missing(field::USER, "Use --user or set provider.user in config file")
            })?;

        let password = cli
            .password
            .clone()
            .or_else(|| section.and_then(|s| s.password.clone()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::PASSWORD,
                    "Use --password, BIGIP_PASSWORD or set provider.password in config file",
                )
            })?;

        // --no-validate-certs only disables
        let validate_certs = !cli.no_validate_certs
            && section
                .and_then(|s| s.validate_certs)
                .unwrap_or(defaults::VALIDATE_CERTS);

        let timeout_secs = cli
            .timeout
            .or_else(|| section.and_then(|s| s.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if timeout_secs == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Provider {
            base_url: base_url(server, port)?,
            user,
            password,
            validate_certs,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn resolve_dns(args: &DnsArgs, toml: Option<&DnsSection>) -> Result<DnsParams, ConfigError> {
    let params = DnsParams {
        cache: args
            .cache
            .map(|c| c.as_str().to_string())
            .or_else(|| toml.and_then(|t| t.cache.clone())),
        name_servers: cli_list(&args.name_servers)
            .or_else(|| toml.and_then(|t| t.name_servers.as_ref().map(StringOrList::to_vec))),
        search: cli_list(&args.search)
            .or_else(|| toml.and_then(|t| t.search.as_ref().map(StringOrList::to_vec))),
        ip_version: args
            .ip_version
            .map(i64::from)
            .or_else(|| toml.and_then(|t| t.ip_version)),
        state: args
            .state
            .map(TargetState::from)
            .or_else(|| toml.and_then(|t| t.state))
            .unwrap_or_default(),
    };

    params
        .validate()
        .map_err(|e| invalid_parameters("dns", e))?;

    Ok(params)
}

fn resolve_http2(args: &Http2Args, toml: Option<&Http2Section>) -> Result<Http2Params, ConfigError> {
    // CLI explicit > TOML
    fn pick<T: Clone>(cli: Option<&T>, toml: Option<&T>) -> Option<T> {
        cli.or(toml).cloned()
    }

    let name = pick(args.name.as_ref(), toml.and_then(|t| t.name.as_ref())).ok_or_else(|| {
        ConfigError::missing(
            field::NAME,
            "Use --name or set http2_profile.name in config file",
        )
    })?;

    let params = Http2Params {
        partition: pick(args.partition.as_ref(), toml.and_then(|t| t.partition.as_ref()))
            .unwrap_or_else(|| defaults::PARTITION.to_string()),
        parent: pick(args.parent.as_ref(), toml.and_then(|t| t.parent.as_ref())),
        description: pick(
            args.description.as_ref(),
            toml.and_then(|t| t.description.as_ref()),
        ),
        streams: pick(args.streams.as_ref(), toml.and_then(|t| t.streams.as_ref())),
        idle_timeout: pick(
            args.idle_timeout.as_ref(),
            toml.and_then(|t| t.idle_timeout.as_ref()),
        ),
        enforce_tls_requirements: pick(
            args.enforce_tls_requirements.as_ref(),
            toml.and_then(|t| t.enforce_tls_requirements.as_ref()),
        ),
        frame_size: pick(
            args.frame_size.as_ref(),
            toml.and_then(|t| t.frame_size.as_ref()),
        ),
        activation_modes: cli_list(&args.activation_modes)
            .or_else(|| toml.and_then(|t| t.activation_modes.as_ref().map(StringOrList::to_vec))),
        insert_header: pick(
            args.insert_header.as_ref(),
            toml.and_then(|t| t.insert_header.as_ref()),
        ),
        insert_header_name: pick(
            args.insert_header_name.as_ref(),
            toml.and_then(|t| t.insert_header_name.as_ref()),
        ),
        state: pick(args.state.map(TargetState::from).as_ref(), toml.and_then(|t| t.state.as_ref()))
            .unwrap_or_default(),
        ..Http2Params::new(name)
    };

    params
        .validate()
        .map_err(|e| invalid_parameters("http2-profile", e))?;

    Ok(params)
}

/// Repeated CLI values replace the TOML list entirely.
fn cli_list(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

fn invalid_parameters(resource: &'static str, error: ResourceError) -> ConfigError {
    let reason = match error {
        ResourceError::Validation(reason) => reason,
        other => other.to_string(),
    };
    ConfigError::InvalidParameters { resource, reason }
}

fn base_url(server: &str, port: u16) -> Result<Url, ConfigError> {
    // Bare IPv6 addresses need brackets in the authority
    let host = if server.contains(':') && !server.starts_with('[') {
        format!("[{server}]")
    } else {
        server.to_string()
    };
    let raw = format!("https://{host}:{port}");

    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw,
        reason: e.to_string(),
    })
}
