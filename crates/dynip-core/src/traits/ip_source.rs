// # IP Source Trait
//
// Defines the interface for discovering the caller's public IPv4 address.
//
// ## Implementations
//
// - HTTP echo service: `dynip-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use dynip_core::IpSource;
//
// async fn show(source: &dyn IpSource) -> dynip_core::Result<()> {
//     let ip = source.current().await?;
//     println!("public address: {}", ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for IP source implementations
///
/// A source performs at most one lookup per call. It does not cache, poll,
/// or retry; a failed lookup is returned to the engine, which aborts the run.
///
/// Implementations must validate whatever they fetch with
/// [`crate::ipv4::validate`] before returning it.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Fetch the current public IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The validated address
    /// - `Err(Error::Network)`: The lookup failed or returned a non-200 status
    /// - `Err(Error::Validation)`: The response was not an IPv4 literal
    async fn current(&self) -> Result<Ipv4Addr, crate::Error>;

    /// Get the source name (for logging)
    fn source_name(&self) -> &'static str;
}
