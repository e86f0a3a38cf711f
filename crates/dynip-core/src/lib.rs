// # dynip-core
//
// Core library for the single-pass Route 53 dynamic IP updater.
//
// ## Architecture Overview
//
// - **ipv4**: Strict dotted-decimal validation and canonicalization
// - **IpSource**: Trait for discovering the public IPv4 address
// - **DnsProvider**: Trait for listing zones/record sets and upserting a record
// - **locator**: Exact-name lookup of the target zone and record set
// - **DdnsEngine**: Sequences resolve → locate → upsert for one pass
// - **config**: The two JSON configuration documents
//
// ## Design Principles
//
// 1. **Single pass**: No scheduler, no state, no retry; run it from a timer
// 2. **Library-First**: The binary is a thin wrapper around `DdnsEngine`
// 3. **Fail loudly**: Every error aborts the pass and reaches the caller intact

pub mod traits;
pub mod engine;
pub mod locator;
pub mod ipv4;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{DnsProvider, HostedZone, IpSource, RecordChange, ResourceRecordSet};
pub use engine::{DdnsEngine, RunReport};
pub use locator::{Located, locate};
pub use ipv4::Ipv4Error;
pub use config::{ConfigPaths, RecordDescriptor, SessionParameters};
pub use error::{Error, Result};
