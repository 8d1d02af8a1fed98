use super::DnsTransport;
use crate::dns::forwarding::OutgoingQuery;
use async_trait::async_trait;
use ferrous_sweep_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP, one ephemeral socket per query.
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn io_error(&self, e: std::io::Error) -> DomainError {
        DomainError::TransportIo {
            server: self.server_addr.to_string(),
            reason: e.to_string(),
        }
    }

    fn timeout_error(&self, timeout: Duration) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Reads datagrams until one carries `id`. Stray replies (late answers
    /// to someone else, spoofing attempts) are dropped.
    async fn recv_matching(&self, socket: &UdpSocket, id: u16) -> Result<Vec<u8>, DomainError> {
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let (bytes_received, from_addr) = socket
                .recv_from(&mut recv_buf)
                .await
                .map_err(|e| self.io_error(e))?;

            if from_addr.ip() != self.server_addr.ip() {
                warn!(
                    expected = %self.server_addr,
                    received_from = %from_addr,
                    "UDP response from unexpected source"
                );
            }

            if bytes_received < 2 || u16::from_be_bytes([recv_buf[0], recv_buf[1]]) != id {
                debug!(
                    server = %self.server_addr,
                    bytes_received = bytes_received,
                    "Ignoring UDP response with mismatched id"
                );
                continue;
            }

            recv_buf.truncate(bytes_received);
            return Ok(recv_buf);
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn exchange(
        &self,
        query: &OutgoingQuery,
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let local: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local).await.map_err(|e| self.io_error(e))?;

        tokio::time::timeout(timeout, socket.send_to(&query.bytes, self.server_addr))
            .await
            .map_err(|_| self.timeout_error(timeout))?
            .map_err(|e| self.io_error(e))?;
        debug!(server = %self.server_addr, id = query.id, "UDP query sent");

        let reply = tokio::time::timeout(timeout, self.recv_matching(&socket, query.id))
            .await
            .map_err(|_| self.timeout_error(timeout))??;
        debug!(server = %self.server_addr, bytes = reply.len(), "UDP reply received");

        Ok(reply)
    }
}
