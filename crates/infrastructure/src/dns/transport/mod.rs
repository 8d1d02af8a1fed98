pub mod udp;

use crate::dns::forwarding::OutgoingQuery;
use async_trait::async_trait;
use ferrous_sweep_domain::DomainError;
use std::time::Duration;

pub use udp::UdpTransport;

/// Moves one encoded query to a nameserver and brings back the raw reply
/// whose id matches.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn exchange(
        &self,
        query: &OutgoingQuery,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError>;
}
