//! Network adapters.

mod tcp_probe;

pub use tcp_probe::TcpConnectProbe;
