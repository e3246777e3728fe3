// Count endpoint HTTP client
//
// Wraps `reqwest::Client` with the one request the display needs:
// `GET <url>` expecting `200 {"value": N}`. Anything else is an error;
// the caller decides how to show it.

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::CountResponse;

/// HTTP client for a footfall counting server.
#[derive(Debug, Clone)]
pub struct CountClient {
    http: reqwest::Client,
    url: Url,
}

impl CountClient {
    /// Create a client for the full count URL (e.g. `http://192.168.0.100:8000/count`).
    pub fn new(url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, url })
    }

    /// Create a client from a URL string and a pre-built `reqwest::Client`.
    pub fn from_reqwest(url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let url = Url::parse(url)?;
        Ok(Self { http, url })
    }

    /// The URL polled by [`fetch_count`](Self::fetch_count).
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the current count.
    ///
    /// Only `200 OK` is a success; every other status, including other
    /// 2xx codes, is reported as [`Error::Status`].
    pub async fn fetch_count(&self) -> Result<CountResponse, Error> {
        debug!("GET {}", self.url);

        let resp = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_owned(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
