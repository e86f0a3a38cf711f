//! Core traits for the dynip updater
//!
//! - [`IpSource`]: Discover the public IPv4 address
//! - [`DnsProvider`]: List zones and record sets, upsert a record

pub mod ip_source;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use dns_provider::{DnsProvider, HostedZone, RecordChange, ResourceRecordSet};
