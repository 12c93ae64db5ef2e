//! HTTP/2 protocol profiles.

use serde_json::{Map, Value};

use super::{Outcome, ResourceError};
use crate::device::{DeviceApi, DeviceError};
use crate::reconcile::{
    ChangeSet, Codec, Difference, Field, FieldSpec, ParameterSet, Provenance, TargetState,
    fq_name,
};

/// Collection endpoint of HTTP/2 profiles.
pub const COLLECTION_PATH: &str = "/mgmt/tm/ltm/profile/http2/";

/// Partition used when none is given.
pub const DEFAULT_PARTITION: &str = "Common";

/// Accepted range of `streams`.
pub const STREAMS_RANGE: std::ops::RangeInclusive<u32> = 10..=256;

/// Accepted range of `frame_size`.
pub const FRAME_SIZE_RANGE: std::ops::RangeInclusive<u32> = 1024..=16384;

/// Accepted values of `activation_modes`.
pub const ACTIVATION_MODES: &[&str] = &["alpn", "npn", "always"];

const ENABLED_DISABLED: Codec = Codec::Toggle {
    truthy: &["enabled", "yes", "true"],
    on: "enabled",
    off: "disabled",
};

/// Fields of the HTTP/2 profile resource, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Http2Field {
    /// Parent profile (`defaultsFrom`)
    Parent,
    /// Free-form description (`description`)
    Description,
    /// Concurrent streams per connection (`concurrentStreamsPerConnection`)
    Streams,
    /// Idle timeout in seconds (`connectionIdleTimeout`)
    IdleTimeout,
    /// Require TLS 1.2 and strong ciphers (`enforceTlsRequirements`)
    EnforceTlsRequirements,
    /// Frame size in bytes (`frameSize`)
    FrameSize,
    /// Protocol negotiation modes (`activationModes`)
    ActivationModes,
    /// Insert a header naming the HTTP/2 connection (`insertHeader`)
    InsertHeader,
    /// Name of the inserted header (`insertHeaderName`)
    InsertHeaderName,
}

static SPECS: [FieldSpec; 9] = [
    FieldSpec::scalar("parent", "defaultsFrom").with_codec(Codec::FullPath {
        partition: DEFAULT_PARTITION,
    }),
    FieldSpec::scalar("description", "description"),
    FieldSpec::scalar("streams", "concurrentStreamsPerConnection"),
    FieldSpec::scalar("idle_timeout", "connectionIdleTimeout"),
    FieldSpec::scalar("enforce_tls_requirements", "enforceTlsRequirements")
        .with_codec(ENABLED_DISABLED),
    FieldSpec::scalar("frame_size", "frameSize"),
    FieldSpec::collection("activation_modes", "activationModes"),
    FieldSpec::scalar("insert_header", "insertHeader").with_codec(ENABLED_DISABLED),
    FieldSpec::scalar("insert_header_name", "insertHeaderName"),
];

impl Field for Http2Field {
    const ALL: &'static [Self] = &[
        Self::Parent,
        Self::Description,
        Self::Streams,
        Self::IdleTimeout,
        Self::EnforceTlsRequirements,
        Self::FrameSize,
        Self::ActivationModes,
        Self::InsertHeader,
        Self::InsertHeaderName,
    ];

    fn spec(self) -> &'static FieldSpec {
        &SPECS[self as usize]
    }
}

/// Caller input for one HTTP/2 profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Http2Params {
    /// Profile name
    pub name: String,
    /// Partition holding the profile
    pub partition: String,
    /// Parent profile; unqualified names are placed in `partition`
    pub parent: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Concurrent streams per connection
    pub streams: Option<u32>,
    /// Connection idle timeout in seconds
    pub idle_timeout: Option<u32>,
    /// Whether clients must meet the HTTP/2 TLS requirements
    pub enforce_tls_requirements: Option<bool>,
    /// Frame size in bytes
    pub frame_size: Option<u32>,
    /// `alpn`, `npn`, or `always` on its own
    pub activation_modes: Option<Vec<String>>,
    /// Whether to insert a header into requests sent over HTTP/2
    pub insert_header: Option<bool>,
    /// Name of the inserted header
    pub insert_header_name: Option<String>,
    /// Create or update the profile, or delete it
    pub state: TargetState,
}

impl Http2Params {
    /// Creates input for profile `name` in the default partition with no
    /// settings.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition: DEFAULT_PARTITION.to_string(),
            parent: None,
            description: None,
            streams: None,
            idle_timeout: None,
            enforce_tls_requirements: None,
            frame_size: None,
            activation_modes: None,
            insert_header: None,
            insert_header_name: None,
            state: TargetState::Present,
        }
    }

    /// API path of the profile.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{COLLECTION_PATH}~{}~{}", self.partition, self.name)
    }

    /// Checks the input before any device access.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for a missing name or a value
    /// out of range.
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.name.trim().is_empty() {
            return Err(ResourceError::validation("name is required"));
        }
        if self.partition.trim().is_empty() {
            return Err(ResourceError::validation("partition must not be empty"));
        }

        if let Some(streams) = self.streams.filter(|s| !STREAMS_RANGE.contains(s)) {
            return Err(ResourceError::validation(format!(
                "streams must be between {} and {}, got: {streams}",
                STREAMS_RANGE.start(),
                STREAMS_RANGE.end()
            )));
        }

        if let Some(size) = self.frame_size.filter(|s| !FRAME_SIZE_RANGE.contains(s)) {
            return Err(ResourceError::validation(format!(
                "frame_size must be between {} and {}, got: {size}",
                FRAME_SIZE_RANGE.start(),
                FRAME_SIZE_RANGE.end()
            )));
        }

        if let Some(modes) = &self.activation_modes {
            if let Some(unknown) = modes.iter().find(|m| !ACTIVATION_MODES.contains(&m.as_str())) {
                return Err(ResourceError::validation(format!(
                    "value of activation_modes must be one of: {}, got: {unknown}",
                    ACTIVATION_MODES.join(", ")
                )));
            }
            if modes.len() > 1 && modes.iter().any(|m| m == "always") {
                return Err(ResourceError::validation(
                    "the 'always' activation mode may not be combined with other modes",
                ));
            }
        }

        Ok(())
    }

    /// Returns the desired parameter set for reconciliation.
    #[must_use]
    pub fn desired(&self) -> ParameterSet<Http2Field> {
        let mut want = ParameterSet::new(Provenance::Desired);

        if let Some(parent) = &self.parent {
            want = want.with_value(Http2Field::Parent, fq_name(&self.partition, parent));
        }
        if let Some(description) = &self.description {
            want = want.with_value(Http2Field::Description, description.as_str());
        }
        if let Some(streams) = self.streams {
            want = want.with_value(Http2Field::Streams, streams);
        }
        if let Some(timeout) = self.idle_timeout {
            want = want.with_value(Http2Field::IdleTimeout, timeout);
        }
        if let Some(enforce) = self.enforce_tls_requirements {
            want = want.with_value(Http2Field::EnforceTlsRequirements, enforce);
        }
        if let Some(size) = self.frame_size {
            want = want.with_value(Http2Field::FrameSize, size);
        }
        if let Some(modes) = &self.activation_modes {
            want = want.with_value(Http2Field::ActivationModes, modes.clone());
        }
        if let Some(insert) = self.insert_header {
            want = want.with_value(Http2Field::InsertHeader, insert);
        }
        if let Some(header) = &self.insert_header_name {
            want = want.with_value(Http2Field::InsertHeaderName, header.as_str());
        }

        want
    }
}

/// Creates, updates or deletes one HTTP/2 profile.
#[derive(Debug)]
pub struct Http2Manager<'a, D> {
    device: &'a D,
    params: Http2Params,
}

impl<'a, D: DeviceApi> Http2Manager<'a, D> {
    /// Creates a manager for `params` against `device`.
    #[must_use]
    pub const fn new(device: &'a D, params: Http2Params) -> Self {
        Self { device, params }
    }

    /// Brings the profile to the requested state.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for bad input, before any
    /// request is sent, and [`ResourceError::Device`] if a request fails.
    pub async fn exec(&self, check_mode: bool) -> Result<Outcome, ResourceError> {
        self.params.validate()?;

        let have = self.read_current().await?;

        let outcome = match (self.params.state, have) {
            (TargetState::Present, None) => self.create(check_mode).await?,
            (TargetState::Present, Some(have)) => self.update(&have, check_mode).await?,
            (TargetState::Absent, Some(_)) => self.remove(check_mode).await?,
            (TargetState::Absent, None) => Outcome::unchanged(),
        };

        Ok(outcome)
    }

    /// Reads the profile, or `None` if it does not exist.
    async fn read_current(&self) -> Result<Option<ParameterSet<Http2Field>>, DeviceError> {
        let path = self.params.path();

        match self.device.get(&path).await {
            Ok(Value::Object(observed)) => Ok(Some(ParameterSet::observed(&observed))),
            Ok(_) => Err(DeviceError::UnexpectedResponse {
                path,
                reason: "expected a JSON object".to_string(),
            }),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create(&self, check_mode: bool) -> Result<Outcome, DeviceError> {
        let changes = ChangeSet::from_params(&self.params.desired());

        if !check_mode {
            let mut payload = Map::new();
            payload.insert("name".to_string(), Value::from(self.params.name.as_str()));
            payload.insert(
                "partition".to_string(),
                Value::from(self.params.partition.as_str()),
            );
            payload.extend(changes.to_api_payload());

            tracing::info!(profile = %self.params.path(), "Creating HTTP/2 profile");
            self.device.post(COLLECTION_PATH, &payload).await?;
        }

        Ok(Outcome::from_changes(&changes).changed())
    }

    async fn update(
        &self,
        have: &ParameterSet<Http2Field>,
        check_mode: bool,
    ) -> Result<Outcome, DeviceError> {
        let want = self.params.desired();
        let changes = Difference::new(&want, have).changes(TargetState::Present);

        if !changes.is_empty() && !check_mode {
            tracing::info!(
                profile = %self.params.path(),
                fields = changes.len(),
                "Updating HTTP/2 profile"
            );
            self.device
                .patch(&self.params.path(), &changes.to_api_payload())
                .await?;
        }

        Ok(Outcome::from_changes(&changes))
    }

    async fn remove(&self, check_mode: bool) -> Result<Outcome, DeviceError> {
        if !check_mode {
            tracing::info!(profile = %self.params.path(), "Deleting HTTP/2 profile");
            self.device.delete(&self.params.path()).await?;
        }

        Ok(Outcome::unchanged().changed())
    }
}

#[cfg(test)]
#[path = "http2_tests.rs"]
mod tests;
