use std::net::SocketAddrV4;

use async_trait::async_trait;
use reqwest::{Client, redirect};
use roomfinder_common::error::{ProbeError, ScanError};

use super::{PING_PATH, ProbeTransport, tcp};

/// Probes over real sockets: `reqwest` for the health ping, a raw TCP
/// exchange for the fallback.
///
/// Holds one pooled client shared by every probe of a scan.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ScanError> {
        let client = Client::builder()
            .no_proxy()
            .redirect(redirect::Policy::none())
            .user_agent(concat!("roomfinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ScanError::Defect(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ProbeTransport for HttpTransport {
    async fn http_ping(&self, target: SocketAddrV4) -> Result<(), ProbeError> {
        let url = format!("http://{target}{PING_PATH}");
        match self.client.get(url).send().await {
            // Status and body are irrelevant, a response is proof enough.
            Ok(_response) => Ok(()),
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout),
            Err(e) => Err(ProbeError::NetworkUnreachable(e.to_string())),
        }
    }

    async fn fetch_resource(&self, target: SocketAddrV4) -> Result<(), ProbeError> {
        tcp::fetch_any_byte(target, &tcp::resource_path()).await
    }
}
