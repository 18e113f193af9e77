//! TCP connect-based port probe.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

use tracing::trace;

use nexy_core::{
    application::{ApplicationError, ports::PortProbe},
    error::NexyResult,
};

/// Connect timeout used when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(250);

/// A port is in use when a TCP connection to it succeeds.
///
/// Every address the host resolves to is tried; refused or timed-out
/// connections count as free.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnectProbe {
    timeout: Duration,
}

impl TcpConnectProbe {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn resolve(host: &str, port: u16) -> NexyResult<Vec<SocketAddr>> {
        let network_error = |reason: String| ApplicationError::NetworkError {
            host: host.to_string(),
            port,
            reason,
        };

        let addrs: Vec<SocketAddr> = (host, port)
            .to_socket_addrs()
            .map_err(|e| network_error(e.to_string()))?
            .collect();

        if addrs.is_empty() {
            return Err(network_error("host resolved to no addresses".into()).into());
        }
        Ok(addrs)
    }
}

impl Default for TcpConnectProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl PortProbe for TcpConnectProbe {
    fn is_in_use(&self, host: &str, port: u16) -> NexyResult<bool> {
        for addr in Self::resolve(host, port)? {
            match TcpStream::connect_timeout(&addr, self.timeout) {
                Ok(_) => return Ok(true),
                Err(e) => trace!(%addr, error = %e, "connect failed"),
            }
        }
        Ok(false)
    }
}
