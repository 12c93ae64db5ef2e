//! Error type for resource operations.

use thiserror::Error;

use crate::device::DeviceError;

/// Error returned by resource managers.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// Caller input was rejected before any device access.
    #[error("Invalid parameters: {0}")]
    Validation(String),

    /// The device could not be read or written.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl ResourceError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }
}
