//! Host and session data sources.

use std::future::Future;
use std::path::PathBuf;

use reqwest::Client;
use tokio::fs;

use crate::error::{CoreError, TransportError};

/// Provider of raw host and session payloads.
pub trait DataSource: Send + Sync + 'static {
    fn fetch_hosts(&self) -> impl Future<Output = Result<String, TransportError>> + Send;

    fn fetch_sessions(&self) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// Where one payload comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// HTTP GET
    Http(String),
    /// Local JSON file
    File(PathBuf),
    /// Fixed payload
    Inline(String),
}

impl Endpoint {
    /// Treat `http://` and `https://` as URLs, anything else as a file path.
    pub fn parse(target: &str) -> Self {
        if target.starts_with("http://") || target.starts_with("https://") {
            Endpoint::Http(target.to_string())
        } else {
            Endpoint::File(PathBuf::from(target))
        }
    }

    async fn fetch(&self, client: &Client) -> Result<String, TransportError> {
        match self {
            Endpoint::Http(url) => get_text(client, url).await,
            Endpoint::File(path) => {
                fs::read_to_string(path)
                    .await
                    .map_err(|source| TransportError::File {
                        path: path.display().to_string(),
                        source,
                    })
            }
            Endpoint::Inline(payload) => Ok(payload.clone()),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Http(url) => write!(f, "{}", url),
            Endpoint::File(path) => write!(f, "{}", path.display()),
            Endpoint::Inline(_) => write!(f, "<inline>"),
        }
    }
}

async fn get_text(client: &Client, url: &str) -> Result<String, TransportError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| TransportError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| TransportError::Request {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// A [`DataSource`] backed by one endpoint per payload.
#[derive(Debug, Clone)]
pub struct EndpointSource {
    client: Client,
    hosts: Endpoint,
    sessions: Endpoint,
}

impl EndpointSource {
    /// Build a source. No request timeout is set beyond the transport's own.
    pub fn new(hosts: Endpoint, sessions: Endpoint) -> Result<Self, CoreError> {
        let client = Client::builder()
            .build()
            .map_err(|e| CoreError::Other(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            client,
            hosts,
            sessions,
        })
    }

    pub fn hosts_endpoint(&self) -> &Endpoint {
        &self.hosts
    }

    pub fn sessions_endpoint(&self) -> &Endpoint {
        &self.sessions
    }
}

impl DataSource for EndpointSource {
    async fn fetch_hosts(&self) -> Result<String, TransportError> {
        self.hosts.fetch(&self.client).await
    }

    async fn fetch_sessions(&self) -> Result<String, TransportError> {
        self.sessions.fetch(&self.client).await
    }
}
