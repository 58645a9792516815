use clap::Parser;
use dnsq_domain::config::OutputFormat;
use dnsq_domain::{CliOverrides, DnsClass, DomainError, Label, QueryOptions, RecordType};
use std::net::IpAddr;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "dnsq")]
#[command(version)]
#[command(about = "DNS lookup client with recursive zone transfers")]
pub struct Cli {
    /// Name to query
    #[arg(short = 'q', long)]
    pub qname: Option<String>,

    /// Server to query (udp://, tcp://, tls://, https:// or bare host[:port])
    #[arg(short = 's', long)]
    pub server: Option<String>,

    /// Relay queries to the https:// server through this Oblivious DoH proxy
    #[arg(long, value_name = "URL")]
    pub odoh_proxy: Option<String>,

    /// Record type to query; repeatable
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub record_types: Vec<String>,

    /// Reverse lookup: the name is an IP address, queried as PTR
    #[arg(short = 'x', long)]
    pub reverse: bool,

    /// Output format: pretty, json or raw
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Timeout per exchange in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short = 'c', long)]
    pub config: Option<String>,

    /// Debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Transfer the zone and every zone delegated below it, one file per zone
    #[arg(long)]
    pub recaxfr: bool,

    /// With --recaxfr, skip zones whose transfer fails instead of stopping
    #[arg(long)]
    pub axfr_skip_failed: bool,

    /// Free arguments: @server, record types, class, +flags and name, in any order
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

/// What to ask, after positional arguments have been sorted out.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub name: Label,
    pub server: Option<String>,
    pub record_types: Vec<RecordType>,
    pub options: QueryOptions,
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            log_level: self.verbose.then(|| "debug".to_string()),
            timeout_ms: self.timeout,
            format: self.format,
            skip_failed_zones: self.axfr_skip_failed,
        }
    }

    /// Merges flags and free arguments. Flags win; among free arguments the
    /// first server and the first name are kept.
    pub fn plan(&self) -> Result<QueryPlan, DomainError> {
        let mut qname = self.qname.clone();
        let mut server = self.server.clone();
        let mut options = QueryOptions::default();
        let mut class_set = false;
        let mut record_types = self
            .record_types
            .iter()
            .map(|t| RecordType::from_str(t))
            .collect::<Result<Vec<_>, _>>()?;

        for arg in &self.args {
            if let Some(s) = arg.strip_prefix('@') {
                server.get_or_insert_with(|| s.to_string());
            } else if arg.starts_with('+') {
                options.apply_plus_flag(arg)?;
            } else if let Ok(rt) = RecordType::from_str(arg) {
                record_types.push(rt);
            } else if let Ok(class) = DnsClass::from_str(arg) {
                if !class_set {
                    options.class = class;
                    class_set = true;
                }
            } else {
                qname.get_or_insert_with(|| arg.clone());
            }
        }

        let name = if self.reverse {
            let raw = qname.unwrap_or_default();
            let addr = raw
                .parse::<IpAddr>()
                .map_err(|_| DomainError::InvalidAddress(raw.clone()))?;
            record_types = vec![RecordType::PTR];
            Label::reverse(addr)
        } else {
            match qname {
                Some(name) => Label::parse(&name)?,
                None => Label::root(),
            }
        };

        if record_types.is_empty() {
            record_types.push(RecordType::A);
        }

        Ok(QueryPlan {
            name,
            server,
            record_types,
            options,
        })
    }
}
