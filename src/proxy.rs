//! Client for the external proxy-management service.
//!
//! The pool itself (rotation, failure cooldowns) lives in that service; this
//! client only borrows one endpoint per fetch and reports bad ones back.
//! Neither call is allowed to abort a scrape: acquisition failures collapse
//! to `None` and failure reports are fire-and-forget.

use crate::config::Config;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use wreq::Client;

/// Sentinel URL meaning "perform the request without a proxy".
pub const DIRECT: &str = "direct";

/// One proxy endpoint on loan from the pool service.
///
/// Unknown fields in the service response are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyEndpoint {
    pub url: String,
}

impl ProxyEndpoint {
    /// True when the pool told us to go out unproxied.
    pub fn is_direct(&self) -> bool {
        self.url == DIRECT
    }
}

/// Talks to the proxy pool service. Holds no state between calls.
pub struct ProxyClient {
    service_url: String,
    timeout: Duration,
}

impl ProxyClient {
    /// Creates a client for the configured pool service.
    pub fn new(config: &Config) -> Self {
        Self {
            service_url: config.proxy_service_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.proxy_timeout_secs),
        }
    }

    /// Borrows one endpoint from the pool.
    ///
    /// Any transport failure, non-success status, or undecodable body yields
    /// `None`; the caller then fetches directly.
    pub async fn acquire(&self) -> Option<ProxyEndpoint> {
        let client = Client::builder().timeout(self.timeout).build().ok()?;

        let response = match client.get(format!("{}/proxy", self.service_url)).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("proxy service unreachable: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("proxy service returned status {}", response.status());
            return None;
        }

        let body = response.text().await.ok()?;
        match serde_json::from_str::<ProxyEndpoint>(&body) {
            Ok(endpoint) => {
                debug!("acquired proxy: {}", endpoint.url);
                Some(endpoint)
            }
            Err(e) => {
                debug!("undecodable proxy response: {}", e);
                None
            }
        }
    }

    /// Reports a misbehaving endpoint back to the pool. Best effort; every
    /// failure of the report itself is swallowed.
    pub async fn report_failure(&self, proxy_url: &str) {
        let Ok(client) = Client::builder().timeout(self.timeout).build() else {
            return;
        };

        let payload = serde_json::json!({ "proxy_url": proxy_url }).to_string();
        let result = client
            .post(format!("{}/proxy/failed", self.service_url))
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await;

        match result {
            Ok(_) => debug!("reported failed proxy: {}", proxy_url),
            Err(e) => debug!("failure report dropped: {}", e),
        }
    }
}
