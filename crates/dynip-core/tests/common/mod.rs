//! Test doubles and common utilities for update pass contract tests
//!
//! These doubles record every call so tests can assert on how many
//! provider operations a pass performed, and in which order.

#![allow(dead_code)]

use dynip_core::error::{Error, Result};
use dynip_core::traits::{DnsProvider, HostedZone, IpSource, RecordChange, ResourceRecordSet};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource that always returns the same address
pub struct StaticIpSource {
    ip: Ipv4Addr,
    call_count: Arc<AtomicUsize>,
}

impl StaticIpSource {
    pub fn new(ip: Ipv4Addr) -> Self {
        Self {
            ip,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times current() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new StaticIpSource that shares its counter with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            ip: other.ip,
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip)
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// An IpSource whose echo service returns a fixed body
pub struct RawBodyIpSource {
    body: &'static str,
}

impl RawBodyIpSource {
    pub fn new(body: &'static str) -> Self {
        Self { body }
    }
}

#[async_trait::async_trait]
impl IpSource for RawBodyIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        Ok(dynip_core::ipv4::validate(self.body)?)
    }

    fn source_name(&self) -> &'static str {
        "raw-body"
    }
}

/// An IpSource that cannot reach its echo service
pub struct UnreachableIpSource;

#[async_trait::async_trait]
impl IpSource for UnreachableIpSource {
    async fn current(&self) -> Result<Ipv4Addr> {
        Err(Error::network("connection refused"))
    }

    fn source_name(&self) -> &'static str {
        "unreachable"
    }
}

/// Which provider operation was invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    ListHostedZones,
    ListRecordSets(String),
    Upsert(String, RecordChange),
}

/// Shared call log for MockDnsProvider
#[derive(Default)]
struct CallLog {
    calls: Mutex<Vec<ProviderCall>>,
    upsert_count: AtomicUsize,
}

/// A mock DnsProvider with canned zones and record sets that records calls
pub struct MockDnsProvider {
    zones: Vec<HostedZone>,
    record_sets: Vec<ResourceRecordSet>,
    fail_upsert: bool,
    fail_list_record_sets: bool,
    log: Arc<CallLog>,
}

impl MockDnsProvider {
    pub fn new(zones: Vec<HostedZone>, record_sets: Vec<ResourceRecordSet>) -> Self {
        Self {
            zones,
            record_sets,
            fail_upsert: false,
            fail_list_record_sets: false,
            log: Arc::new(CallLog::default()),
        }
    }

    /// Make upsert_record_set() return a provider error
    pub fn failing_upsert(mut self) -> Self {
        self.fail_upsert = true;
        self
    }

    /// Make list_record_sets() return a provider error
    pub fn failing_list_record_sets(mut self) -> Self {
        self.fail_list_record_sets = true;
        self
    }

    /// Create a new MockDnsProvider that shares its call log with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            zones: other.zones.clone(),
            record_sets: other.record_sets.clone(),
            fail_upsert: other.fail_upsert,
            fail_list_record_sets: other.fail_list_record_sets,
            log: Arc::clone(&other.log),
        }
    }

    /// Get the number of times upsert_record_set() was called
    pub fn upsert_call_count(&self) -> usize {
        self.log.upsert_count.load(Ordering::SeqCst)
    }

    /// Get every call in order
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.log.calls.lock().unwrap().clone()
    }

    /// Get the changes passed to upsert_record_set()
    pub fn upserts(&self) -> Vec<(String, RecordChange)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ProviderCall::Upsert(zone_id, change) => Some((zone_id, change)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ProviderCall) {
        self.log.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>> {
        self.record(ProviderCall::ListHostedZones);
        Ok(self.zones.clone())
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<ResourceRecordSet>> {
        self.record(ProviderCall::ListRecordSets(zone_id.to_string()));
        if self.fail_list_record_sets {
            return Err(Error::provider("mock", "NoSuchHostedZone"));
        }
        Ok(self.record_sets.clone())
    }

    async fn upsert_record_set(&self, zone_id: &str, change: &RecordChange) -> Result<()> {
        self.log.upsert_count.fetch_add(1, Ordering::SeqCst);
        self.record(ProviderCall::Upsert(zone_id.to_string(), change.clone()));
        if self.fail_upsert {
            return Err(Error::provider("mock", "InvalidChangeBatch"));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// The zones most tests run against
pub fn sample_zones() -> Vec<HostedZone> {
    vec![
        HostedZone::new("/hostedzone/ZORG", "example.org."),
        HostedZone::new("/hostedzone/ZCOM", "example.com."),
    ]
}

/// The record sets most tests run against
pub fn sample_record_sets() -> Vec<ResourceRecordSet> {
    vec![
        ResourceRecordSet::new("example.com.", "NS")
            .with_ttl(172800)
            .with_value("ns-1.awsdns-00.com."),
        ResourceRecordSet::new("home.example.com.", "A")
            .with_ttl(300)
            .with_value("198.51.100.1"),
    ]
}
