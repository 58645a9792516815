use dnsq_domain::Config;
use tracing::debug;

const RESOLV_CONF: &str = "/etc/resolv.conf";

/// Server to query: the command line, else the first `nameserver` of
/// /etc/resolv.conf, else `query.default_server`.
pub fn infer_server(explicit: Option<&str>, config: &Config) -> String {
    if let Some(server) = explicit {
        return server.to_string();
    }

    match std::fs::read_to_string(RESOLV_CONF) {
        Ok(content) => {
            if let Some(server) = first_nameserver(&content) {
                debug!(server = %server, "Using nameserver from {}", RESOLV_CONF);
                return server;
            }
        }
        Err(e) => debug!(error = %e, "Cannot read {}", RESOLV_CONF),
    }

    config.query.default_server.clone()
}

fn first_nameserver(content: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .find_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("nameserver"), Some(addr)) => Some(addr.to_string()),
                _ => None,
            }
        })
}
