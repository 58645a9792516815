use super::https::CLIENT;
use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dnsq_domain::DomainError;
use odoh_rs::{
    compose, decrypt_response, encrypt_query, parse, ObliviousDoHConfigContents,
    ObliviousDoHConfigs, ObliviousDoHMessage, ObliviousDoHMessagePlaintext,
};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// RFC 9230 §4.1 media type for sealed queries and responses.
const ODOH_MESSAGE: &str = "application/oblivious-dns-message";
const CONFIGS_PATH: &str = "/.well-known/odohconfigs";

/// Oblivious DNS-over-HTTPS (RFC 9230).
///
/// The target's HPKE configuration is fetched from the target directly;
/// the sealed query itself only ever goes to the proxy.
pub struct ObliviousHttpsTransport {
    target_host: Arc<str>,
    target_path: Arc<str>,
    proxy_url: Arc<str>,
}

impl ObliviousHttpsTransport {
    pub fn new(target_host: Arc<str>, target_path: Arc<str>, proxy_url: Arc<str>) -> Self {
        Self {
            target_host,
            target_path,
            proxy_url,
        }
    }

    fn failed(&self, reason: impl Into<String>) -> DomainError {
        DomainError::TransportFailed {
            server: format!("{} via {}", self.target_host, self.proxy_url),
            reason: reason.into(),
        }
    }

    fn request_error(&self, what: &str, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::TransportTimeout {
                server: self.target_host.to_string(),
            }
        } else {
            self.failed(format!("{what} failed: {e}"))
        }
    }

    async fn fetch_config(
        &self,
        client: &reqwest::Client,
        timeout: Duration,
    ) -> Result<ObliviousDoHConfigContents, DomainError> {
        let url = format!("https://{}{}", self.target_host, CONFIGS_PATH);
        let response = client
            .get(&url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.request_error("ODoH config fetch", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.failed(format!("ODoH config fetch: HTTP {status}")));
        }

        let mut body = response
            .bytes()
            .await
            .map_err(|e| self.request_error("reading ODoH configs", e))?;

        let configs: ObliviousDoHConfigs = parse(&mut body)
            .map_err(|e| self.failed(format!("invalid ODoH configs: {e}")))?;
        let config = configs
            .supported()
            .into_iter()
            .next()
            .ok_or_else(|| self.failed("target offers no supported ODoH config"))?;

        Ok(config.into())
    }
}

/// Proxy URL carrying the target as RFC 9230 §4.1 query parameters.
pub(crate) fn proxy_request_url(proxy_url: &str, target_host: &str, target_path: &str) -> String {
    let separator = if proxy_url.contains('?') { '&' } else { '?' };
    format!(
        "{proxy_url}{separator}targethost={}&targetpath={}",
        encode_query_value(target_host),
        encode_query_value(target_path)
    )
}

fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[async_trait]
impl DnsTransport for ObliviousHttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let client = CLIENT
            .as_ref()
            .map_err(|e| self.failed(format!("HTTP client setup failed: {e}")))?;
        let start = Instant::now();

        let config = self.fetch_config(client, timeout).await?;

        let plaintext = ObliviousDoHMessagePlaintext::new(message_bytes, 0);
        // The thread RNG is not Send; keep it out of any await.
        let (sealed, secret) = {
            let mut rng = rand::thread_rng();
            encrypt_query(&plaintext, &config, &mut rng)
                .map_err(|e| self.failed(format!("sealing query failed: {e}")))?
        };
        let body = compose(&sealed)
            .map_err(|e| self.failed(format!("encoding ODoH query failed: {e}")))?
            .freeze();

        let remaining = timeout.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            return Err(DomainError::TransportTimeout {
                server: self.target_host.to_string(),
            });
        }

        let url = proxy_request_url(&self.proxy_url, &self.target_host, &self.target_path);
        let response = client
            .post(&url)
            .header(CONTENT_TYPE, ODOH_MESSAGE)
            .header(ACCEPT, ODOH_MESSAGE)
            .timeout(remaining)
            .body(body)
            .send()
            .await
            .map_err(|e| self.request_error("ODoH request", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.failed(format!("HTTP {status}")));
        }

        let mut reply = response
            .bytes()
            .await
            .map_err(|e| self.request_error("reading ODoH body", e))?;

        let sealed_reply: ObliviousDoHMessage = parse(&mut reply)
            .map_err(|e| self.failed(format!("malformed ODoH response: {e}")))?;
        let opened = decrypt_response(&plaintext, &sealed_reply, secret)
            .map_err(|e| self.failed(format!("opening ODoH response failed: {e}")))?;
        let bytes: Bytes = opened.into_msg();

        debug!(
            target = %self.target_host,
            proxy = %self.proxy_url,
            bytes_received = bytes.len(),
            "ODoH response received"
        );

        Ok(TransportResponse {
            bytes,
            protocol_used: "ODoH",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "ODoH"
    }
}
