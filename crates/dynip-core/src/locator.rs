//! Hosted zone and record set lookup
//!
//! Both lookups are exact, case-sensitive name matches and take the first
//! hit in provider order. A missing zone is fatal; a missing record set is
//! not, because the upsert creates it.

use crate::config::RecordDescriptor;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, HostedZone, ResourceRecordSet};
use tracing::{debug, info};

/// Outcome of a successful lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// The target hosted zone
    pub zone: HostedZone,
    /// The existing record set, if one already carries the target name
    pub existing: Option<ResourceRecordSet>,
}

/// Find the target zone and, if present, the target record set
///
/// Makes exactly two provider calls, one after the other. Provider errors
/// are returned unchanged.
pub async fn locate(provider: &dyn DnsProvider, descriptor: &RecordDescriptor) -> Result<Located> {
    let zones = provider.list_hosted_zones().await?;
    debug!("Found {} hosted zone(s)", zones.len());

    let zone = find_zone(zones, &descriptor.target_hosted_zone_name).ok_or_else(|| {
        Error::not_found(format!(
            "hosted zone {:?} is not visible to this session",
            descriptor.target_hosted_zone_name
        ))
    })?;
    info!("Target hosted zone is {} ({})", zone.name, zone.id);

    let record_sets = provider.list_record_sets(&zone.id).await?;
    debug!("Found {} record set(s) on target hosted zone", record_sets.len());

    let existing = find_record_set(record_sets, &descriptor.target_record_set_name);
    match &existing {
        Some(record) => info!(
            "Target record set is {} {} (ttl: {:?}, values: {:?})",
            record.name, record.record_type, record.ttl, record.values
        ),
        None => info!(
            "Target record set {} does not exist yet, it will be created",
            descriptor.target_record_set_name
        ),
    }

    Ok(Located { zone, existing })
}

fn find_zone(zones: Vec<HostedZone>, name: &str) -> Option<HostedZone> {
    zones.into_iter().find(|zone| zone.name == name)
}

fn find_record_set(records: Vec<ResourceRecordSet>, name: &str) -> Option<ResourceRecordSet> {
    records.into_iter().find(|record| record.name == name)
}
