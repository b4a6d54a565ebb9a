//! The network seam of the engine.
//!
//! The prober only ever talks to a [`ProbeTransport`]. [`transport::HttpTransport`]
//! is the real implementation; tests swap in scripted ones.

use std::net::SocketAddrV4;

use async_trait::async_trait;
use roomfinder_common::error::ProbeError;

pub mod tcp;
pub mod transport;

/// Health path every hub is expected to answer on.
pub const PING_PATH: &str = "/ping";
/// Static resource used by the port-open fallback.
pub const RESOURCE_PATH: &str = "/favicon.ico";

/// The two network exchanges the detection heuristic relies on.
///
/// Implementations do not enforce deadlines themselves, callers race them.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    /// `GET` the health path. Any HTTP response, whatever its status, is `Ok`.
    async fn http_ping(&self, target: SocketAddrV4) -> Result<(), ProbeError>;

    /// Content-agnostic fetch of the fallback resource. `Ok` means the
    /// transport-level exchange worked, nothing more.
    async fn fetch_resource(&self, target: SocketAddrV4) -> Result<(), ProbeError>;
}
