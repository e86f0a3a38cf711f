//! Core dynip engine
//!
//! The DdnsEngine performs one update pass:
//! - Resolve the public IPv4 address via IpSource
//! - Locate the target hosted zone and record set via DnsProvider
//! - Upsert the record set with the resolved address
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐        ┌──────────────┐        ┌──────────────┐
//! │  IpSource   │──ip──▶ │  DdnsEngine  │──────▶ │ DnsProvider  │
//! │  (resolve)  │        │  (run_once)  │        │ list/upsert  │
//! └─────────────┘        └──────────────┘        └──────────────┘
//! ```
//!
//! ## Flow
//!
//! 1. `IpSource::current()`
//! 2. `locate()`: list zones, pick by name, list record sets, pick by name
//! 3. `DnsProvider::upsert_record_set()`, always, even if unchanged
//!
//! Any error ends the pass. There is no retry and no rollback: a located
//! zone stays located even if the upsert fails afterwards.

use crate::config::RecordDescriptor;
use crate::error::Result;
use crate::locator::{Located, locate};
use crate::traits::{DnsProvider, HostedZone, IpSource, RecordChange, ResourceRecordSet};
use std::net::Ipv4Addr;
use tracing::{debug, info};

/// What a successful pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The address that was written
    pub ip: Ipv4Addr,
    /// The hosted zone that was updated
    pub zone: HostedZone,
    /// The record set as it was before the upsert, if it existed
    pub previous: Option<ResourceRecordSet>,
    /// The change that was applied
    pub applied: RecordChange,
}

impl RunReport {
    /// Whether the record set was created by this pass
    pub fn created(&self) -> bool {
        self.previous.is_none()
    }
}

/// Core dynip engine
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`]
/// 2. Call [`DdnsEngine::run_once()`]
/// 3. Drop
///
/// Every stage is awaited before the next starts; nothing is spawned.
pub struct DdnsEngine {
    /// IP source for the public address
    ip_source: Box<dyn IpSource>,

    /// DNS provider for lookups and the upsert
    provider: Box<dyn DnsProvider>,

    /// Which record to update
    descriptor: RecordDescriptor,
}

impl DdnsEngine {
    /// Create a new engine
    ///
    /// # Parameters
    ///
    /// - `ip_source`: IP source implementation
    /// - `provider`: DNS provider implementation
    /// - `descriptor`: Target zone and record set
    ///
    /// # Returns
    ///
    /// `Err(Error::Config)` if the descriptor is invalid
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        descriptor: RecordDescriptor,
    ) -> Result<Self> {
        descriptor.validate()?;

        Ok(Self {
            ip_source,
            provider,
            descriptor,
        })
    }

    /// Run one update pass
    ///
    /// # Returns
    ///
    /// - `Ok(RunReport)`: The record set now points at the public address
    /// - `Err(Error)`: The first failure, unmodified
    pub async fn run_once(&self) -> Result<RunReport> {
        debug!(
            "Resolving public IPv4 via {}, provider {}",
            self.ip_source.source_name(),
            self.provider.provider_name()
        );
        let ip = self.ip_source.current().await?;
        info!("IPv4 is {}", ip);

        let Located { zone, existing } = locate(self.provider.as_ref(), &self.descriptor).await?;

        let change = RecordChange::new(
            &self.descriptor.target_record_set_name,
            &self.descriptor.target_record_set_type,
            self.descriptor.target_record_set_ttl,
            ip.to_string(),
        );

        debug!(
            "Upserting {} {} (ttl: {}) -> {} in {}",
            change.name, change.record_type, change.ttl, change.value, zone.id
        );
        self.provider.upsert_record_set(&zone.id, &change).await?;
        info!("Target record set updated!");

        Ok(RunReport {
            ip,
            zone,
            previous: existing,
            applied: change,
        })
    }
}
