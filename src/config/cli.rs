//! CLI argument parsing using clap.
//!
//! Connection options are global; each resource has its own subcommand.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::reconcile::TargetState;

/// bigip-conf: declarative BIG-IP configuration
///
/// Reads the current settings from the device management API, computes the
/// minimal difference to the requested settings and applies it.
#[derive(Debug, Parser)]
#[command(name = "bigip-conf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Management address of the device
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Management HTTPS port
    #[arg(long = "server-port", global = true)]
    pub server_port: Option<u16>,

    /// User for HTTP basic authentication
    #[arg(long, short, global = true)]
    pub user: Option<String>,

    /// Password for HTTP basic authentication
    #[arg(long, global = true, env = "BIGIP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Accept self-signed device certificates
    #[arg(long = "no-validate-certs", global = true)]
    pub no_validate_certs: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Compute and report changes without applying them
    #[arg(long, global = true)]
    pub check: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for bigip-conf
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage DNS resolver settings
    Dns(DnsArgs),

    /// Manage an HTTP/2 profile
    #[command(name = "http2-profile")]
    Http2Profile(Http2Args),

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "bigip-conf.toml")]
        output: PathBuf,
    },
}

/// Options of the `dns` subcommand.
#[derive(Debug, Default, Args)]
pub struct DnsArgs {
    /// Resolver cache setting
    #[arg(long, value_enum)]
    pub cache: Option<CacheArg>,

    /// Name server address (repeatable or comma-separated; "none" clears)
    #[arg(long = "name-server", value_name = "ADDR", value_delimiter = ',')]
    pub name_servers: Vec<String>,

    /// Search domain (repeatable or comma-separated; "none" clears)
    #[arg(long, value_name = "DOMAIN", value_delimiter = ',')]
    pub search: Vec<String>,

    /// IP version the resolver uses
    #[arg(long = "ip-version", value_enum)]
    pub ip_version: Option<IpVersionArg>,

    /// Converge to the given values or remove them
    #[arg(long, value_enum)]
    pub state: Option<StateArg>,
}

/// Options of the `http2-profile` subcommand.
#[derive(Debug, Default, Args)]
pub struct Http2Args {
    /// Profile name
    #[arg(long)]
    pub name: Option<String>,

    /// Partition holding the profile
    #[arg(long)]
    pub partition: Option<String>,

    /// Parent profile
    #[arg(long)]
    pub parent: Option<String>,

    /// Profile description
    #[arg(long)]
    pub description: Option<String>,

    /// Concurrent streams per connection (10-256)
    #[arg(long)]
    pub streams: Option<u32>,

    /// Connection idle timeout in seconds
    #[arg(long = "idle-timeout")]
    pub idle_timeout: Option<u32>,

    /// Require TLS 1.2 and strong ciphers on HTTP/2 connections
    #[arg(long = "enforce-tls-requirements", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub enforce_tls_requirements: Option<bool>,

    /// Frame size in bytes (1024-16384)
    #[arg(long = "frame-size")]
    pub frame_size: Option<u32>,

    /// Activation mode (repeatable or comma-separated)
    #[arg(long = "activation-mode", value_name = "MODE", value_delimiter = ',')]
    pub activation_modes: Vec<String>,

    /// Insert a header into HTTP/2 requests
    #[arg(long = "insert-header", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub insert_header: Option<bool>,

    /// Name of the inserted header
    #[arg(long = "insert-header-name")]
    pub insert_header_name: Option<String>,

    /// Create or update the profile, or delete it
    #[arg(long, value_enum)]
    pub state: Option<StateArg>,
}

/// IP version argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IpVersionArg {
    /// IPv4 only
    #[value(name = "4")]
    V4,
    /// IPv6 enabled
    #[value(name = "6")]
    V6,
}

impl From<IpVersionArg> for i64 {
    fn from(arg: IpVersionArg) -> Self {
        match arg {
            IpVersionArg::V4 => 4,
            IpVersionArg::V6 => 6,
        }
    }
}

/// Cache setting argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CacheArg {
    Enabled,
    Disabled,
    /// Deprecated spelling of `enabled`
    Enable,
    /// Deprecated spelling of `disabled`
    Disable,
}

impl CacheArg {
    /// Returns the value as passed on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

/// Target state argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Present,
    Absent,
}

impl From<StateArg> for TargetState {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Present => Self::Present,
            StateArg::Absent => Self::Absent,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
