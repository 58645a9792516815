use crate::DomainError;
use std::fmt;
use std::sync::Arc;

pub const DNS_PORT: u16 = 53;
pub const DOT_PORT: u16 = 853;
const DOH_DEFAULT_PATH: &str = "/dns-query";
const ODOH_PROXY_DEFAULT_PATH: &str = "/proxy";

/// Unresolved `host:port` pair; hostnames are looked up by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub host: Arc<str>,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<Arc<str>>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parses `host`, `host:port`, `[v6]:port` or a bare IPv6 literal.
    pub fn parse(authority: &str, default_port: u16) -> Result<Self, DomainError> {
        if authority.is_empty() {
            return Err(DomainError::InvalidServer("empty server address".to_string()));
        }

        if let Some(rest) = authority.strip_prefix('[') {
            let (host, tail) = rest.split_once(']').ok_or_else(|| {
                DomainError::InvalidServer(format!("unterminated IPv6 literal: {authority}"))
            })?;
            let port = match tail.strip_prefix(':') {
                Some(p) => parse_port(p, authority)?,
                None if tail.is_empty() => default_port,
                None => {
                    return Err(DomainError::InvalidServer(format!(
                        "unexpected characters after IPv6 literal: {authority}"
                    )))
                }
            };
            return Ok(Self::new(host, port));
        }

        match authority.matches(':').count() {
            0 => Ok(Self::new(authority, default_port)),
            1 => {
                let (host, port) = authority.split_once(':').unwrap_or((authority, ""));
                if host.is_empty() {
                    return Err(DomainError::InvalidServer(format!(
                        "missing host: {authority}"
                    )));
                }
                Ok(Self::new(host, parse_port(port, authority)?))
            }
            // Bare IPv6 literal, no port.
            _ => Ok(Self::new(authority, default_port)),
        }
    }
}

fn parse_port(port: &str, authority: &str) -> Result<u16, DomainError> {
    port.parse::<u16>()
        .ok()
        .filter(|p| *p != 0)
        .ok_or_else(|| DomainError::InvalidServer(format!("invalid port in {authority}")))
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Upstream server together with the encapsulation used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DnsProtocol {
    Udp { endpoint: Endpoint },
    Tcp { endpoint: Endpoint },
    Tls { endpoint: Endpoint, hostname: Arc<str> },
    Https { url: Arc<str>, hostname: Arc<str> },
    /// Oblivious DoH: the query is sealed to the target's public key and
    /// relayed through the proxy, which never sees the plaintext.
    ObliviousHttps {
        target_host: Arc<str>,
        target_path: Arc<str>,
        proxy_url: Arc<str>,
    },
}

impl DnsProtocol {
    /// Parses a server string.
    ///
    /// - `9.9.9.9`, `dns.quad9.net:5353`, `udp://…` → UDP, port 53
    /// - `tcp://…` → TCP, port 53
    /// - `tls://dns.quad9.net` → DNS-over-TLS, port 853
    /// - `https://dns.quad9.net` → DNS-over-HTTPS, path `/dns-query` if absent
    ///
    /// A leading `@` (dig style) is ignored.
    pub fn parse(server: &str) -> Result<Self, DomainError> {
        let server = server.trim();
        let server = server.strip_prefix('@').unwrap_or(server);

        let Some((scheme, rest)) = server.split_once("://") else {
            return Ok(Self::Udp {
                endpoint: Endpoint::parse(server, DNS_PORT)?,
            });
        };

        match scheme.to_ascii_lowercase().as_str() {
            "udp" => Ok(Self::Udp {
                endpoint: Endpoint::parse(rest, DNS_PORT)?,
            }),
            "tcp" => Ok(Self::Tcp {
                endpoint: Endpoint::parse(rest, DNS_PORT)?,
            }),
            "tls" => {
                let endpoint = Endpoint::parse(rest, DOT_PORT)?;
                let hostname = Arc::clone(&endpoint.host);
                Ok(Self::Tls { endpoint, hostname })
            }
            "https" => {
                let (authority, path) = match rest.find('/') {
                    Some(idx) => rest.split_at(idx),
                    None => (rest, ""),
                };
                let endpoint = Endpoint::parse(authority, 443)?;
                let path = if path.is_empty() || path == "/" {
                    DOH_DEFAULT_PATH
                } else {
                    path
                };
                Ok(Self::Https {
                    url: Arc::from(format!("https://{authority}{path}")),
                    hostname: endpoint.host,
                })
            }
            other => Err(DomainError::InvalidServer(format!(
                "unsupported scheme '{other}' in {server}"
            ))),
        }
    }

    /// Builds an ODoH upstream from a target and a proxy. Both must be
    /// `https://` URLs; a proxy without a path gets `/proxy`.
    pub fn oblivious(target: &str, proxy: &str) -> Result<Self, DomainError> {
        let Ok(Self::Https { url, .. }) = Self::parse(target) else {
            return Err(DomainError::InvalidServer(
                "ODoH target must use HTTPS".to_string(),
            ));
        };
        let proxy = proxy.trim();
        let proxy_rest = proxy
            .split_once("://")
            .filter(|(scheme, rest)| scheme.eq_ignore_ascii_case("https") && !rest.is_empty())
            .map(|(_, rest)| rest)
            .ok_or_else(|| DomainError::InvalidServer("ODoH proxy must use HTTPS".to_string()))?;
        let proxy_url = if proxy_rest.contains('/') {
            Arc::from(format!("https://{proxy_rest}"))
        } else {
            Arc::from(format!("https://{proxy_rest}{ODOH_PROXY_DEFAULT_PATH}"))
        };

        // `url` was rebuilt by `parse`, so it always carries a path.
        let rest = url.strip_prefix("https://").unwrap_or(&url[..]);
        let (host, path) = rest.split_at(rest.find('/').unwrap_or(rest.len()));
        Ok(Self::ObliviousHttps {
            target_host: Arc::from(host),
            target_path: Arc::from(path),
            proxy_url,
        })
    }

    /// The same server reached over TCP; used for truncated UDP answers
    /// and for zone transfers, which need a stream transport.
    pub fn as_stream(&self) -> Option<Self> {
        match self {
            Self::Udp { endpoint } | Self::Tcp { endpoint } => Some(Self::Tcp {
                endpoint: endpoint.clone(),
            }),
            Self::Tls { .. } => Some(self.clone()),
            Self::Https { .. } | Self::ObliviousHttps { .. } => None,
        }
    }

    pub fn protocol_name(&self) -> &'static str {
        match self {
            Self::Udp { .. } => "UDP",
            Self::Tcp { .. } => "TCP",
            Self::Tls { .. } => "TLS",
            Self::Https { .. } => "HTTPS",
            Self::ObliviousHttps { .. } => "ODoH",
        }
    }
}

impl fmt::Display for DnsProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Udp { endpoint } => write!(f, "udp://{endpoint}"),
            Self::Tcp { endpoint } => write!(f, "tcp://{endpoint}"),
            Self::Tls { endpoint, .. } => write!(f, "tls://{endpoint}"),
            Self::Https { url, .. } => f.write_str(url),
            Self::ObliviousHttps {
                target_host,
                target_path,
                proxy_url,
            } => write!(f, "https://{target_host}{target_path} via {proxy_url}"),
        }
    }
}
