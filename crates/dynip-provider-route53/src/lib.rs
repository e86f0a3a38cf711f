// # Route 53 DNS Provider
//
// This crate provides an AWS Route 53 implementation of `DnsProvider`.
//
// ## API Reference
//
// - List zones: `ListHostedZonesByName`, paged by `NextDNSName`/`NextHostedZoneId`
// - List records: `ListResourceRecordSets`, paged by `NextRecordName`/`NextRecordType`/`NextRecordIdentifier`
// - Upsert: `ChangeResourceRecordSets` with a single `UPSERT` change
//
// Paging is followed inside each method so the engine sees one logical call.
//
// ## Security Requirements
//
// - Secret keys NEVER appear in logs or Debug output
// - Static keys must be given as a pair (access key id + secret)

mod session;

pub use session::{DEFAULT_REGION, SessionSettings};

use async_trait::async_trait;
use aws_sdk_route53::Client;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet as SdkRecordSet, RrType,
};
use dynip_core::traits::{DnsProvider, HostedZone, RecordChange, ResourceRecordSet};
use dynip_core::{Error, Result, SessionParameters};

/// Provider name used in logs and errors
const PROVIDER_NAME: &str = "route53";

/// Route 53 DNS provider
pub struct Route53Provider {
    /// Route 53 API client
    client: Client,
}

impl std::fmt::Debug for Route53Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route53Provider")
            .field("region", &self.client.config().region())
            .finish_non_exhaustive()
    }
}

impl Route53Provider {
    /// Wrap an existing Route 53 client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a provider from boto3-style session parameters
    ///
    /// Recognised keys: `aws_access_key_id`, `aws_secret_access_key`,
    /// `aws_session_token`, `region_name`, `profile_name`. Anything missing
    /// falls back to the SDK's default provider chains.
    ///
    /// # Returns
    ///
    /// `Err(Error::Config)` for unknown keys or a half-specified key pair
    pub async fn from_session(params: &SessionParameters) -> Result<Self> {
        let settings = SessionSettings::from_parameters(params)?;
        tracing::debug!("Creating Route 53 session: {:?}", settings);

        let sdk_config = settings.loader().load().await;
        Ok(Self::new(Client::new(&sdk_config)))
    }
}

#[async_trait]
impl DnsProvider for Route53Provider {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>> {
        let mut zones = Vec::new();
        let mut next_dns_name: Option<String> = None;
        let mut next_zone_id: Option<String> = None;

        loop {
            let output = self
                .client
                .list_hosted_zones_by_name()
                .set_dns_name(next_dns_name.take())
                .set_hosted_zone_id(next_zone_id.take())
                .send()
                .await
                .map_err(|e| sdk_error("ListHostedZonesByName", e))?;

            zones.extend(
                output
                    .hosted_zones()
                    .iter()
                    .map(|zone| HostedZone::new(zone.id(), zone.name())),
            );

            if !output.is_truncated() {
                break;
            }
            next_dns_name = output.next_dns_name().map(str::to_string);
            next_zone_id = output.next_hosted_zone_id().map(str::to_string);
            if next_dns_name.is_none() {
                break;
            }
            tracing::trace!("Hosted zone listing truncated, fetching next page");
        }

        Ok(zones)
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<ResourceRecordSet>> {
        let mut records = Vec::new();
        let mut next_name: Option<String> = None;
        let mut next_type: Option<RrType> = None;
        let mut next_identifier: Option<String> = None;

        loop {
            let output = self
                .client
                .list_resource_record_sets()
                .hosted_zone_id(zone_id)
                .set_start_record_name(next_name.take())
                .set_start_record_type(next_type.take())
                .set_start_record_identifier(next_identifier.take())
                .send()
                .await
                .map_err(|e| sdk_error("ListResourceRecordSets", e))?;

            records.extend(output.resource_record_sets().iter().map(to_record_set));

            if !output.is_truncated() {
                break;
            }
            next_name = output.next_record_name().map(str::to_string);
            next_type = output.next_record_type().cloned();
            next_identifier = output.next_record_identifier().map(str::to_string);
            if next_name.is_none() {
                break;
            }
            tracing::trace!("Record set listing truncated, fetching next page");
        }

        Ok(records)
    }

    async fn upsert_record_set(&self, zone_id: &str, change: &RecordChange) -> Result<()> {
        let batch = build_change_batch(change)?;

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| sdk_error("ChangeResourceRecordSets", e))?;

        tracing::debug!("Route 53 accepted UPSERT of {} in {}", change.name, zone_id);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Build a one-change, one-value UPSERT batch
fn build_change_batch(change: &RecordChange) -> Result<ChangeBatch> {
    let record = ResourceRecord::builder()
        .value(&change.value)
        .build()
        .map_err(build_error)?;

    let record_set = SdkRecordSet::builder()
        .name(&change.name)
        .r#type(RrType::from(change.record_type.as_str()))
        .ttl(i64::from(change.ttl))
        .resource_records(record)
        .build()
        .map_err(build_error)?;

    let change = Change::builder()
        .action(ChangeAction::Upsert)
        .resource_record_set(record_set)
        .build()
        .map_err(build_error)?;

    ChangeBatch::builder()
        .changes(change)
        .build()
        .map_err(build_error)
}

fn to_record_set(record: &SdkRecordSet) -> ResourceRecordSet {
    ResourceRecordSet {
        name: record.name().to_string(),
        record_type: record.r#type().as_str().to_string(),
        ttl: record.ttl(),
        values: record
            .resource_records()
            .iter()
            .map(|value| value.value().to_string())
            .collect(),
    }
}

fn sdk_error(operation: &str, err: impl std::error::Error) -> Error {
    Error::provider(
        PROVIDER_NAME,
        format!("{} failed: {}", operation, DisplayErrorContext(&err)),
    )
}

fn build_error(err: impl std::error::Error) -> Error {
    Error::provider(PROVIDER_NAME, format!("Invalid change request: {}", err))
}
