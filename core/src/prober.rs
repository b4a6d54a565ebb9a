//! # Single-Address Prober
//!
//! Decides whether a hub lives at one address with a two-stage heuristic,
//! tried port by port in the configured order:
//!
//! 1. **HTTP ping**: `GET /ping`. Any response at all, error statuses
//!    included, means a device is there ([`DiscoveryMethod::HttpPing`]).
//! 2. **Port-open fallback**: only when the ping failed. A raw fetch of a
//!    static resource that gets any reply back ([`DiscoveryMethod::PortOpen`]).
//!    Embedded HTTP stacks are too inconsistent to rely on the first stage
//!    alone, so this trades identification precision for recall.
//!
//! Each stage is raced against the same per-attempt deadline. Failures of
//! any kind only move the prober on to the next stage or port; the only
//! observable outcome is a [`Device`] or nothing.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Arc;
use std::time::Duration;

use roomfinder_common::device::{Device, DiscoveryMethod};
use roomfinder_common::error::ScanError;
use roomfinder_common::settings::ScanSettings;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::network::ProbeTransport;
use crate::timeout;

#[derive(Clone)]
pub struct Prober {
    transport: Arc<dyn ProbeTransport>,
}

impl Prober {
    pub fn new(transport: Arc<dyn ProbeTransport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn ProbeTransport> {
        &self.transport
    }

    /// Probes `address` on each of `ports` in turn until one stage succeeds.
    pub async fn probe(
        &self,
        address: Ipv4Addr,
        ports: &[u16],
        deadline: Duration,
        cancel: &CancellationToken,
    ) -> Option<Device> {
        for &port in ports {
            if cancel.is_cancelled() {
                trace!(%address, "probe abandoned, scan cancelled");
                return None;
            }

            let target = SocketAddrV4::new(address, port);
            let dispatched = Instant::now();

            match timeout::race(deadline, cancel, self.transport.http_ping(target)).await {
                Ok(()) => {
                    debug!(%target, "hub answered ping");
                    return Some(Device::found(
                        address,
                        port,
                        DiscoveryMethod::HttpPing,
                        dispatched.elapsed(),
                    ));
                }
                Err(e) => trace!(%target, "ping failed: {e}"),
            }

            match timeout::race(deadline, cancel, self.transport.fetch_resource(target)).await {
                Ok(()) => {
                    debug!(%target, "port open, no ping response");
                    return Some(Device::found(
                        address,
                        port,
                        DiscoveryMethod::PortOpen,
                        dispatched.elapsed(),
                    ));
                }
                Err(e) => trace!(%target, "resource fetch failed: {e}"),
            }
        }

        None
    }

    /// Targeted probe of a user-supplied address with the configured ports
    /// and deadline. A device found this way is tagged [`DiscoveryMethod::Manual`].
    pub async fn probe_manual(
        &self,
        address: &str,
        settings: &ScanSettings,
        cancel: &CancellationToken,
    ) -> Result<Option<Device>, ScanError> {
        let address: Ipv4Addr = address
            .trim()
            .parse()
            .map_err(|_| ScanError::InvalidAddress(address.to_string()))?;
        settings.validate_probe()?;

        let found = self
            .probe(address, &settings.ports, settings.timeout(), cancel)
            .await;
        Ok(found.map(Device::into_manual))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
