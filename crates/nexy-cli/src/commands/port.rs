//! `nexy port`: suggest free TCP ports for the development server.

use serde_json::json;
use tracing::instrument;

use nexy_adapters::TcpConnectProbe;
use nexy_core::application::{
    PortScanner,
    ports::{NullSink, ProgressSink},
};

use crate::{
    cli::{OutputFormat, PortArgs, PortFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: PortArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let start = args.start.unwrap_or(config.ports.start);
    let host = args.host.clone().unwrap_or_else(|| config.ports.host.clone());
    let json = wants_json(args.format, output.format());

    // Occupied-port chatter only makes sense for the human listing.
    let sink: Box<dyn ProgressSink> = if json || args.next {
        Box::new(NullSink)
    } else {
        Box::new(output.clone())
    };
    let probe = TcpConnectProbe::with_timeout(config.ports.connect_timeout());
    let scanner = PortScanner::new(Box::new(probe), sink);

    if args.next {
        let port = scanner.next_available_port(start, &host)?;
        let line = if json {
            json!({ "host": host, "port": port }).to_string()
        } else {
            port.to_string()
        };
        output.data(&line)?;
        return Ok(());
    }

    let ports = scanner.find_available_ports(start, &host)?;

    if json {
        let payload = json!({ "host": host, "start": start, "ports": ports });
        output.data(&payload.to_string())?;
    } else if ports.is_empty() {
        output.warning(&format!("No free port found on {host} from {start}"))?;
    } else {
        output.port_choices(&host, &ports)?;
    }
    Ok(())
}

/// `--format` overrides the global output format.
fn wants_json(flag: Option<PortFormat>, global: OutputFormat) -> bool {
    match flag {
        Some(PortFormat::Json) => true,
        Some(PortFormat::Human) => false,
        None => global == OutputFormat::Json,
    }
}
