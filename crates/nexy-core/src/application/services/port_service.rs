//! Port Scanner - suggests a free TCP port for the development server.
//!
//! Occupancy is decided by the injected `PortProbe`. Both scans walk upward
//! from `start` and stop before [`MAX_PORT`].

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{PortProbe, ProgressEvent, ProgressSink},
    },
    error::NexyResult,
};

/// Number of free ports collected by [`PortScanner::find_available_ports`].
pub const MAX_CANDIDATES: usize = 5;

/// Exclusive upper bound of every scan.
///
/// Port 65535 itself is never suggested; scans stop at 65534.
pub const MAX_PORT: u16 = 65535;

pub struct PortScanner {
    probe: Box<dyn PortProbe>,
    sink: Box<dyn ProgressSink>,
}

impl PortScanner {
    pub fn new(probe: Box<dyn PortProbe>, sink: Box<dyn ProgressSink>) -> Self {
        Self { probe, sink }
    }

    /// Whether something accepts connections on `host:port`.
    pub fn is_port_in_use(&self, port: u16, host: &str) -> NexyResult<bool> {
        ensure_valid(port)?;
        self.probe.is_in_use(host, port)
    }

    /// Collect up to [`MAX_CANDIDATES`] free ports, ascending, from `start`.
    ///
    /// Fewer are returned when the range runs out first.
    #[instrument(skip(self))]
    pub fn find_available_ports(&self, start: u16, host: &str) -> NexyResult<Vec<u16>> {
        ensure_valid(start)?;

        let mut found = Vec::with_capacity(MAX_CANDIDATES);
        for port in start..MAX_PORT {
            if self.check(host, port)? {
                continue;
            }
            found.push(port);
            if found.len() == MAX_CANDIDATES {
                break;
            }
        }

        info!(count = found.len(), "Port scan completed");
        Ok(found)
    }

    /// First free port at or above `start`.
    #[instrument(skip(self))]
    pub fn next_available_port(&self, start: u16, host: &str) -> NexyResult<u16> {
        ensure_valid(start)?;

        for port in start..MAX_PORT {
            if !self.check(host, port)? {
                info!(port, "Found free port");
                return Ok(port);
            }
        }

        Err(ApplicationError::PortRangeExhausted {
            start,
            max: MAX_PORT,
        }
        .into())
    }

    /// Probe one port and report it; `true` means occupied.
    fn check(&self, host: &str, port: u16) -> NexyResult<bool> {
        let occupied = self.probe.is_in_use(host, port)?;
        debug!(port, occupied, "probed");
        let event = if occupied {
            ProgressEvent::PortOccupied { port }
        } else {
            ProgressEvent::PortAvailable { port }
        };
        self.sink.emit(&event);
        Ok(occupied)
    }
}

fn ensure_valid(port: u16) -> NexyResult<()> {
    if port == 0 {
        return Err(ApplicationError::InvalidPort { port }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NullSink, output::MockPortProbe};
    use crate::error::NexyError;
    use mockall::predicate::*;

    fn scanner(probe: MockPortProbe) -> PortScanner {
        PortScanner::new(Box::new(probe), Box::new(NullSink))
    }

    fn occupied_between(low: u16, high: u16) -> MockPortProbe {
        let mut probe = MockPortProbe::new();
        probe
            .expect_is_in_use()
            .returning(move |_, port| Ok((low..=high).contains(&port)));
        probe
    }

    #[test]
    fn next_port_is_start_when_free() {
        let mut probe = MockPortProbe::new();
        probe
            .expect_is_in_use()
            .with(eq("localhost"), eq(3000))
            .times(1)
            .returning(|_, _| Ok(false));

        assert_eq!(scanner(probe).next_available_port(3000, "localhost").unwrap(), 3000);
    }

    #[test]
    fn next_port_skips_occupied_block() {
        let probe = occupied_between(3000, 3004);
        assert_eq!(scanner(probe).next_available_port(3000, "localhost").unwrap(), 3005);
    }

    #[test]
    fn candidates_skip_occupied_and_stop_at_five() {
        let probe = occupied_between(3001, 3002);
        let ports = scanner(probe).find_available_ports(3000, "localhost").unwrap();
        assert_eq!(ports, vec![3000, 3003, 3004, 3005, 3006]);
    }

    #[test]
    fn scan_near_the_top_returns_at_most_two() {
        let probe = occupied_between(0, 0);
        let ports = scanner(probe).find_available_ports(65533, "localhost").unwrap();
        assert_eq!(ports, vec![65533, 65534]);
    }

    #[test]
    fn exhausted_range_is_an_error() {
        let probe = occupied_between(65000, 65535);
        let err = scanner(probe)
            .next_available_port(65530, "localhost")
            .unwrap_err();
        assert!(matches!(
            err,
            NexyError::Application(ApplicationError::PortRangeExhausted { start: 65530, .. })
        ));
    }

    #[test]
    fn port_zero_is_rejected_without_probing() {
        let mut probe = MockPortProbe::new();
        probe.expect_is_in_use().never();
        let scanner = scanner(probe);

        assert!(matches!(
            scanner.find_available_ports(0, "localhost"),
            Err(NexyError::Application(ApplicationError::InvalidPort { port: 0 }))
        ));
        assert!(scanner.next_available_port(0, "localhost").is_err());
        assert!(scanner.is_port_in_use(0, "localhost").is_err());
    }

    #[test]
    fn probe_errors_propagate() {
        let mut probe = MockPortProbe::new();
        probe.expect_is_in_use().times(1).returning(|host, port| {
            Err(ApplicationError::NetworkError {
                host: host.to_string(),
                port,
                reason: "no such host".into(),
            }
            .into())
        });

        let err = scanner(probe)
            .find_available_ports(3000, "nowhere.invalid")
            .unwrap_err();
        assert!(matches!(
            err,
            NexyError::Application(ApplicationError::NetworkError { .. })
        ));
    }

    #[test]
    fn is_port_in_use_delegates_host() {
        let mut probe = MockPortProbe::new();
        probe
            .expect_is_in_use()
            .with(eq("127.0.0.1"), eq(8080))
            .returning(|_, _| Ok(true));
        assert!(scanner(probe).is_port_in_use(8080, "127.0.0.1").unwrap());
    }
}
