use dnsq_domain::{DomainError, Endpoint};
use std::net::{IpAddr, SocketAddr};
use tracing::debug;

/// Turns `host:port` into a socket address. IP literals skip the lookup;
/// hostnames take the first address the system resolver returns.
pub async fn resolve_endpoint(endpoint: &Endpoint) -> Result<SocketAddr, DomainError> {
    if let Ok(ip) = endpoint.host.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, endpoint.port));
    }

    let mut addrs = tokio::net::lookup_host((endpoint.host.as_ref(), endpoint.port))
        .await
        .map_err(|e| {
            DomainError::InvalidServer(format!("cannot resolve {}: {}", endpoint.host, e))
        })?;

    let addr = addrs.next().ok_or_else(|| {
        DomainError::InvalidServer(format!("{} has no addresses", endpoint.host))
    })?;

    debug!(host = %endpoint.host, resolved = %addr, "Upstream hostname resolved");
    Ok(addr)
}
