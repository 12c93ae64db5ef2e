//! Configuration layer for bigip-conf.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The config file is the one given with `--config`, or else
//! `bigip-conf/config.toml` under the user configuration directory when it
//! exists.
//!
//! For list options (`--name-server`, `--search`, `--activation-mode`), CLI
//! values **replace** the TOML list entirely.
//!
//! `--no-validate-certs` can only disable certificate validation; it cannot
//! re-enable validation that the config file turned off.
//!
//! The password may also be supplied through the `BIGIP_PASSWORD`
//! environment variable, which ranks with the CLI.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;


pub use cli::{CacheArg, Cli, Command, DnsArgs, Http2Args, IpVersionArg, StateArg};
pub use error::{ConfigError, field};
pub use toml::{StringOrList, TomlConfig, default_config_template};
pub use validated::{Provider, Task, ValidatedConfig, write_default_config};
