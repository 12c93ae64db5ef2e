//! Application execution logic.
//!
//! This module connects to the device described by the validated config
//! and runs the configured resource operation once.

use thiserror::Error;

use bigip_conf::config::{Provider, Task, ValidatedConfig};
use bigip_conf::device::{DeviceApi, DeviceError, ReqwestClient, RestDevice};
use bigip_conf::resource::dns::DnsManager;
use bigip_conf::resource::http2::Http2Manager;
use bigip_conf::resource::{Outcome, ResourceError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    ClientCreation(#[source] reqwest::Error),

    /// Failed to prepare authenticated device access.
    #[error("Failed to set up device access: {0}")]
    DeviceSetup(#[source] DeviceError),

    /// The resource operation failed.
    #[error("{task} failed: {source}")]
    Task {
        /// Task that failed
        task: &'static str,
        /// Underlying resource error
        #[source]
        source: ResourceError,
    },

    /// Failed to render the report.
    #[error("Failed to render report: {0}")]
    Report(#[source] serde_json::Error),
}

/// Runs the configured operation against the device.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be created
/// - The credentials cannot be encoded
/// - The operation fails on the device
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires a real device.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<Outcome, RunError> {
    let device = connect(&config.provider)?;

    if config.check_mode {
        tracing::info!("Check mode enabled - changes will be reported but not applied");
    }

    run_task(&device, &config.task, config.check_mode).await
}

/// Builds the authenticated device handle.
fn connect(provider: &Provider) -> Result<RestDevice<ReqwestClient>, RunError> {
    if !provider.validate_certs {
        tracing::warn!("Certificate validation disabled for {}", provider.base_url);
    }

    let client = ReqwestClient::with_options(provider.timeout, provider.validate_certs)
        .map_err(RunError::ClientCreation)?;

    RestDevice::new(client, provider.base_url.clone())
        .with_basic_auth(&provider.user, &provider.password)
        .map_err(RunError::DeviceSetup)
}

/// Dispatches `task` to its resource manager.
async fn run_task<D: DeviceApi>(
    device: &D,
    task: &Task,
    check_mode: bool,
) -> Result<Outcome, RunError> {
    let result = match task {
        Task::Dns(params) => DnsManager::new(device, params.clone()).exec(check_mode).await,
        Task::Http2Profile(params) => {
            Http2Manager::new(device, params.clone())
                .exec(check_mode)
                .await
        }
    };

    let outcome = result.map_err(|source| RunError::Task {
        task: task.name(),
        source,
    })?;

    if outcome.changed {
        tracing::info!(task = task.name(), fields = outcome.report.len(), "Changed");
    } else {
        tracing::info!(task = task.name(), "No changes needed");
    }

    Ok(outcome)
}

/// Renders the outcome as the JSON report printed on stdout.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub fn render_report(outcome: &Outcome) -> Result<String, RunError> {
    serde_json::to_string_pretty(outcome).map_err(RunError::Report)
}
