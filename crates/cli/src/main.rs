//! # dnsq
//!
//! DNS lookup client: plain queries over UDP, TCP, TLS, HTTPS or Oblivious
//! DoH, single zone transfers, and recursive AXFR down a delegation tree.

mod args;
mod bootstrap;
mod di;
mod output;

use args::Cli;
use clap::Parser;
use dnsq_application::use_cases::QueryRequest;
use dnsq_domain::{DnsProtocol, DomainError, RecordType};
use std::time::Duration;
use tracing::debug;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    let plan = cli.plan()?;
    let server = bootstrap::infer_server(plan.server.as_deref(), &config);
    let format = config.query.format;

    debug!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        server = %server,
        name = %plan.name,
        timeout_ms = config.query.timeout_ms,
        "Configuration loaded"
    );

    let wants_transfer = cli.recaxfr || plan.record_types.contains(&RecordType::AXFR);
    let protocol = select_upstream(&server, cli.odoh_proxy.as_deref(), wants_transfer)?;

    let use_cases = di::UseCases::new(&config);

    if cli.recaxfr {
        let report = use_cases
            .recursive_transfer
            .execute(&plan.name, &server)
            .await?;
        println!("{}", output::render_report(&report, format)?);
        return Ok(());
    }

    if plan.record_types.contains(&RecordType::AXFR) {
        let records = use_cases.transfer_zone.execute(&plan.name, &server).await?;
        println!(
            "{}",
            output::render_transfer(&plan.name, &server, &records, format)?
        );
        return Ok(());
    }

    let request = QueryRequest {
        server: protocol,
        name: plan.name,
        record_types: plan.record_types,
        options: plan.options,
        timeout: Duration::from_millis(config.query.timeout_ms),
    };
    let answers = use_cases.resolve.execute(&request).await?;
    println!("{}", output::render_answers(&answers, format)?);

    Ok(())
}

/// Upstream for this run. An ODoH proxy turns the server into the ODoH
/// target; transfers cannot be relayed that way.
fn select_upstream(
    server: &str,
    odoh_proxy: Option<&str>,
    wants_transfer: bool,
) -> Result<DnsProtocol, DomainError> {
    let Some(proxy) = odoh_proxy else {
        return DnsProtocol::parse(server);
    };
    let protocol = DnsProtocol::oblivious(server, proxy)?;
    if wants_transfer {
        return Err(DomainError::ZoneTransferUnsupported(
            protocol.protocol_name().to_string(),
        ));
    }
    Ok(protocol)
}
