//! Port probing against real loopback sockets.

use std::net::TcpListener;
use std::time::Duration;

use nexy_adapters::{RecordingSink, TcpConnectProbe};
use nexy_core::application::{ApplicationError, ports::PortProbe};
use nexy_core::prelude::*;

fn probe() -> TcpConnectProbe {
    TcpConnectProbe::with_timeout(Duration::from_millis(200))
}

#[test]
fn listening_port_is_in_use() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    assert!(probe().is_in_use("127.0.0.1", port).unwrap());
}

#[test]
fn closed_port_is_free() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    assert!(!probe().is_in_use("127.0.0.1", port).unwrap());
}

#[test]
fn unresolvable_host_is_a_network_error() {
    let err = probe().is_in_use("nexy-test.invalid", 3000).unwrap_err();
    assert!(matches!(
        err,
        NexyError::Application(ApplicationError::NetworkError { .. })
    ));
}

#[test]
fn scanner_skips_a_bound_port() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let sink = RecordingSink::new();
    let scanner = PortScanner::new(Box::new(probe()), Box::new(sink.clone()));

    let next = scanner.next_available_port(port, "127.0.0.1").unwrap();
    assert!(next > port);
    assert_eq!(
        sink.events().first(),
        Some(&ProgressEvent::PortOccupied { port })
    );

    let candidates = scanner.find_available_ports(port, "127.0.0.1").unwrap();
    assert!(!candidates.contains(&port));
    assert!(candidates.windows(2).all(|w| w[0] < w[1]));
}
