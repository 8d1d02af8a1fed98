use super::forwarding::{OutgoingQuery, ResponseParser};
use super::transport::{DnsTransport, UdpTransport};
use async_trait::async_trait;
use ferrous_sweep_application::ports::{DnsExchanger, ExchangeOutcome};
use ferrous_sweep_domain::{DomainError, RecordType};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// [`DnsExchanger`] that asks a single nameserver over UDP.
pub struct HickoryExchanger {
    transport: Box<dyn DnsTransport>,
    server: SocketAddr,
    timeout: Duration,
}

impl HickoryExchanger {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            transport: Box::new(UdpTransport::new(server)),
            server,
            timeout,
        }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }
}

#[async_trait]
impl DnsExchanger for HickoryExchanger {
    async fn exchange(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<ExchangeOutcome, DomainError> {
        let query = OutgoingQuery::new(name, record_type)?;
        let reply = self.transport.exchange(&query, self.timeout).await?;

        debug!(name = %name, record_type = %record_type, id = query.id, "Exchange completed");

        ResponseParser::parse(&reply)
    }
}
