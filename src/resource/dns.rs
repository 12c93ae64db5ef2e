//! DNS resolver settings.
//!
//! Name servers, search domains and the IP version live on
//! `/mgmt/tm/sys/dns/`. The resolver cache flag is the `dns.cache` database
//! variable and is read and written through its own endpoint.

use serde_json::{Map, Value};

use super::{Deprecation, Outcome, ResourceError};
use crate::device::{DeviceApi, DeviceError};
use crate::reconcile::{
    ChangeSet, Codec, Comparator, Difference, Field, FieldSpec, ParameterSet, Provenance,
    TargetState,
};

/// Endpoint of the resolver settings.
pub const DNS_PATH: &str = "/mgmt/tm/sys/dns/";

/// Endpoint of the resolver cache database variable.
pub const CACHE_PATH: &str = "/mgmt/tm/sys/db/dns.cache";

/// Accepted values of the `cache` parameter.
pub const CACHE_CHOICES: &[&str] = &["enabled", "disabled", "enable", "disable"];

/// Accepted values of the `ip_version` parameter.
pub const IP_VERSION_CHOICES: &[i64] = &[4, 6];

const LEGACY_CACHE_TOKENS: &[&str] = &["enable", "disable"];
const LEGACY_CACHE_REMOVED_IN: &str = "0.3.0";

/// Fields of the DNS resource, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DnsField {
    /// Resolver cache flag (`dns.cache`)
    Cache,
    /// Name server addresses (`nameServers`)
    NameServers,
    /// Search domains (`search`)
    Search,
    /// IP version, 4 or 6 (`include`)
    IpVersion,
}

static SPECS: [FieldSpec; 4] = [
    FieldSpec::scalar("cache", "dns.cache")
        .with_codec(Codec::EnumNormalize {
            truthy: &["enabled", "enable"],
            on: "enable",
            off: "disable",
        })
        .outside_payload(),
    FieldSpec::collection("name_servers", "nameServers").absentable(),
    FieldSpec::collection("search", "search").absentable(),
    FieldSpec::scalar("ip_version", "include")
        .with_codec(Codec::SentinelMap(&[(6, "options inet6"), (4, "")]))
        .with_comparator(Comparator::AbsentMeans("")),
];

impl Field for DnsField {
    const ALL: &'static [Self] = &[Self::Cache, Self::NameServers, Self::Search, Self::IpVersion];

    fn spec(self) -> &'static FieldSpec {
        &SPECS[self as usize]
    }
}

/// Caller input for the DNS resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsParams {
    /// `enabled` or `disabled` (legacy `enable`/`disable` still accepted)
    pub cache: Option<String>,
    /// Name servers; `["none"]` or `[""]` clears the list
    pub name_servers: Option<Vec<String>>,
    /// Search domains; `["none"]` or `[""]` clears the list
    pub search: Option<Vec<String>>,
    /// 4 or 6
    pub ip_version: Option<i64>,
    /// Converge to the values or remove them
    pub state: TargetState,
}

impl DnsParams {
    /// Checks the input before any device access.
    ///
    /// Returns the deprecations the input triggers.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] if no field is given or a value
    /// is outside its accepted choices.
    pub fn validate(&self) -> Result<Vec<Deprecation>, ResourceError> {
        if self.cache.is_none()
            && self.name_servers.is_none()
            && self.search.is_none()
            && self.ip_version.is_none()
        {
            return Err(ResourceError::validation(
                "one of the following is required: name_servers, search, ip_version, cache",
            ));
        }

        let mut warnings = Vec::new();

        if let Some(cache) = self.cache.as_deref() {
            if !CACHE_CHOICES.contains(&cache) {
                return Err(ResourceError::validation(format!(
                    "value of cache must be one of: {}, got: {cache}",
                    CACHE_CHOICES.join(", ")
                )));
            }
            if LEGACY_CACHE_TOKENS.contains(&cache) {
                warnings.push(Deprecation {
                    msg: format!("cache value '{cache}' is deprecated, use '{cache}d' instead"),
                    version: LEGACY_CACHE_REMOVED_IN.to_string(),
                });
            }
        }

        if let Some(version) = self.ip_version.filter(|v| !IP_VERSION_CHOICES.contains(v)) {
            return Err(ResourceError::validation(format!(
                "value of ip_version must be one of: 4, 6, got: {version}"
            )));
        }

        Ok(warnings)
    }

    /// Returns the desired parameter set for reconciliation.
    #[must_use]
    pub fn desired(&self) -> ParameterSet<DnsField> {
        let mut want = ParameterSet::new(Provenance::Desired);

        if let Some(cache) = &self.cache {
            want = want.with_value(DnsField::Cache, cache.as_str());
        }
        if let Some(servers) = &self.name_servers {
            want = want.with_value(DnsField::NameServers, servers.clone());
        }
        if let Some(search) = &self.search {
            want = want.with_value(DnsField::Search, search.clone());
        }
        if let Some(version) = self.ip_version {
            want = want.with_value(DnsField::IpVersion, version);
        }

        want
    }
}

/// Reconciles the DNS settings of one device.
///
/// The settings PATCH and the cache PATCH are separate requests; if the
/// second fails the first stays applied.
#[derive(Debug)]
pub struct DnsManager<'a, D> {
    device: &'a D,
    params: DnsParams,
}

impl<'a, D: DeviceApi> DnsManager<'a, D> {
    /// Creates a manager for `params` against `device`.
    #[must_use]
    pub const fn new(device: &'a D, params: DnsParams) -> Self {
        Self { device, params }
    }

    /// Brings the device to the requested state.
    ///
    /// In check mode the change set is computed and reported but nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] for bad input, before any
    /// request is sent, and [`ResourceError::Device`] if a request fails.
    pub async fn exec(&self, check_mode: bool) -> Result<Outcome, ResourceError> {
        let warnings = self.params.validate()?;
        let state = self.params.state;

        let want = self.params.desired();
        let have = self.read_current().await?;
        let changes = Difference::new(&want, &have).changes(state);

        if changes.is_empty() {
            tracing::debug!(%state, "DNS settings already converged");
        } else if check_mode {
            tracing::info!(%state, fields = changes.len(), "Check mode, not applying DNS changes");
        } else {
            match state {
                TargetState::Present => self.update_on_device(&changes).await?,
                TargetState::Absent => self.absent_on_device(&changes).await?,
            }
        }

        Ok(Outcome::from_changes(&changes).with_warnings(warnings))
    }

    async fn read_current(&self) -> Result<ParameterSet<DnsField>, DeviceError> {
        let cache = self.device.get(CACHE_PATH).await?;
        let settings = self.device.get(DNS_PATH).await?;

        let Value::Object(mut observed) = settings else {
            return Err(DeviceError::UnexpectedResponse {
                path: DNS_PATH.to_string(),
                reason: "expected a JSON object".to_string(),
            });
        };

        if let Some(value) = cache.get("value") {
            observed.insert(DnsField::Cache.api_name().to_string(), value.clone());
        }

        Ok(ParameterSet::observed(&observed))
    }

    async fn update_on_device(&self, changes: &ChangeSet<DnsField>) -> Result<(), DeviceError> {
        let payload = changes.to_api_payload();
        if !payload.is_empty() {
            tracing::info!(fields = payload.len(), "Updating DNS settings");
            self.device.patch(DNS_PATH, &payload).await?;
        }

        if let Some(cache) = changes.get(DnsField::Cache) {
            tracing::info!(%cache, "Updating DNS cache setting");
            let mut body = Map::new();
            body.insert("value".to_string(), cache.clone());
            self.device.patch(CACHE_PATH, &body).await?;
        }

        Ok(())
    }

    async fn absent_on_device(&self, changes: &ChangeSet<DnsField>) -> Result<(), DeviceError> {
        let payload = changes.to_api_payload();
        tracing::info!(fields = payload.len(), "Removing DNS entries");
        self.device.patch(DNS_PATH, &payload).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "dns_tests.rs"]
mod tests;
