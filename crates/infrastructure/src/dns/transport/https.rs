use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use dnsq_domain::DomainError;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::sync::{Arc, LazyLock};
use std::time::Duration;
use tracing::debug;

/// RFC 8484 §6 media type, used for both request and response bodies.
const DNS_MESSAGE: &str = "application/dns-message";

/// One pooled client per process; a CLI run sends a handful of requests at most.
pub(super) static CLIENT: LazyLock<Result<reqwest::Client, String>> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(1)
        .user_agent(concat!("dnsq/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| e.to_string())
});

/// DNS-over-HTTPS transport (RFC 8484), POST only.
pub struct HttpsTransport {
    url: Arc<str>,
}

impl HttpsTransport {
    pub fn new(url: impl Into<Arc<str>>) -> Self {
        Self { url: url.into() }
    }

    fn failed(&self, reason: impl Into<String>) -> DomainError {
        DomainError::TransportFailed {
            server: self.url.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl DnsTransport for HttpsTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let client = CLIENT
            .as_ref()
            .map_err(|e| self.failed(format!("HTTP client setup failed: {e}")))?;

        let response = client
            .post(self.url.as_ref())
            .header(CONTENT_TYPE, DNS_MESSAGE)
            .header(ACCEPT, DNS_MESSAGE)
            .timeout(timeout)
            .body(message_bytes.to_vec())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::TransportTimeout {
                        server: self.url.to_string(),
                    }
                } else {
                    self.failed(format!("DoH request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.failed(format!("HTTP {status}")));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        if !content_type.starts_with(DNS_MESSAGE) {
            return Err(self.failed(format!(
                "unexpected content type '{content_type}'"
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.failed(format!("reading DoH body failed: {e}")))?;

        debug!(url = %self.url, bytes_received = body.len(), "DoH response received");

        Ok(TransportResponse {
            bytes: body,
            protocol_used: "HTTPS",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "HTTPS"
    }
}
