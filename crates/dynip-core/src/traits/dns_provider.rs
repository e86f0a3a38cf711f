// # DNS Provider Trait
//
// Defines the interface for the three record-management operations this
// updater needs from a hosted DNS service.
//
// ## Implementations
//
// - Route 53: `dynip-provider-route53` crate
//
// ## Usage
//
// ```rust,ignore
// use dynip_core::{DnsProvider, RecordChange};
//
// async fn point(provider: &dyn DnsProvider, zone_id: &str) -> dynip_core::Result<()> {
//     let change = RecordChange::new("home.example.com.", "A", 300, "203.0.113.7");
//     provider.upsert_record_set(zone_id, &change).await
// }
// ```

use async_trait::async_trait;

/// A hosted zone as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    /// Provider-assigned zone ID
    pub id: String,
    /// Zone name (fully qualified, trailing dot)
    pub name: String,
}

impl HostedZone {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A resource record set as reported by the provider
///
/// Only `name` is used for matching. The rest is carried for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecordSet {
    /// Record set name (fully qualified)
    pub name: String,
    /// Record type (e.g. "A")
    pub record_type: String,
    /// Time-to-live, absent for alias records
    pub ttl: Option<i64>,
    /// Record values
    pub values: Vec<String>,
}

impl ResourceRecordSet {
    pub fn new(name: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl: None,
            values: Vec::new(),
        }
    }

    pub fn with_ttl(mut self, ttl: i64) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }
}

/// A single-value UPSERT request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordChange {
    /// Record set name
    pub name: String,
    /// Record type
    pub record_type: String,
    /// Time-to-live in seconds
    pub ttl: u32,
    /// The one record value
    pub value: String,
}

impl RecordChange {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        ttl: u32,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            ttl,
            value: value.into(),
        }
    }
}

/// Trait for DNS provider implementations
///
/// Every method is a single logical API call. If the provider paginates,
/// the implementation follows the pages itself and returns the whole list.
///
/// Implementations must not retry, cache, or diff. Errors are returned as
/// [`crate::Error::Provider`] and the engine aborts the run.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every hosted zone visible to the session
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, crate::Error>;

    /// List every record set in a hosted zone
    ///
    /// # Parameters
    ///
    /// - `zone_id`: The provider-assigned zone ID
    async fn list_record_sets(
        &self,
        zone_id: &str,
    ) -> Result<Vec<ResourceRecordSet>, crate::Error>;

    /// Insert or overwrite one record set with one value
    ///
    /// Issued unconditionally, even if the record already holds the value.
    ///
    /// # Parameters
    ///
    /// - `zone_id`: The provider-assigned zone ID
    /// - `change`: The record to write
    async fn upsert_record_set(
        &self,
        zone_id: &str,
        change: &RecordChange,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
