//! # Scan Orchestrator
//!
//! Drives every address of the configured subnets through the [`Prober`]
//! under a fixed concurrency ceiling.
//!
//! Addresses are dispatched in consecutive **waves** of [`CONCURRENCY_LIMIT`].
//! A wave is a barrier: the next one is not dispatched until every probe of
//! the current one has settled. After each wave the progress callback gets
//! `completed / total`, then the wave's devices are yielded in dispatch
//! order, regardless of which probe finished first.
//!
//! The returned [`DeviceStream`] is lazy. Nothing is probed until it is
//! polled, cancellation is checked before each wave, and the cancellation
//! token also reaches every in-flight attempt so a cancelled wave settles
//! immediately instead of waiting out its deadlines.

use std::net::Ipv4Addr;
use std::pin::Pin;
use std::sync::Arc;

use futures::Stream;
use futures::future::join_all;
use roomfinder_common::device::Device;
use roomfinder_common::error::ScanError;
use roomfinder_common::network::subnet;
use roomfinder_common::settings::ScanSettings;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::connectivity::{self, Connectivity};
use crate::network::ProbeTransport;
use crate::network::transport::HttpTransport;
use crate::prober::Prober;

/// Maximum number of addresses probed at once.
pub const CONCURRENCY_LIMIT: usize = 40;

pub type DeviceStream = Pin<Box<dyn Stream<Item = Result<Device, ScanError>> + Send>>;

#[derive(Clone)]
pub struct Scanner {
    prober: Prober,
}

impl Scanner {
    pub fn new(transport: Arc<dyn ProbeTransport>) -> Self {
        Self {
            prober: Prober::new(transport),
        }
    }

    /// Scanner backed by real sockets.
    pub fn with_http() -> Result<Self, ScanError> {
        Ok(Self::new(Arc::new(HttpTransport::new()?)))
    }

    /// Scans every subnet in `settings`.
    ///
    /// Only invalid settings surface as an `Err` item, after which the stream
    /// ends. Addresses where nothing answered are silently skipped.
    pub fn discover<P>(
        &self,
        settings: ScanSettings,
        mut on_progress: P,
        cancel: CancellationToken,
    ) -> DeviceStream
    where
        P: FnMut(f64) + Send + 'static,
    {
        let prober = self.prober.clone();

        Box::pin(async_stream::stream! {
            let prefixes = match settings.validate().and_then(|_| settings.prefixes()) {
                Ok(prefixes) => prefixes,
                Err(e) => {
                    debug!("refusing to scan: {e}");
                    yield Err(e);
                    return;
                }
            };

            let addrs: Vec<Ipv4Addr> = subnet::enumerate(&prefixes);
            let total = addrs.len();
            if total == 0 {
                on_progress(1.0);
                return;
            }

            let deadline = settings.timeout();
            let ports = settings.ports;
            let mut completed = 0usize;

            info!("scanning {total} addresses on {} port(s)", ports.len());

            for (wave_idx, wave) in addrs.chunks(CONCURRENCY_LIMIT).enumerate() {
                if cancel.is_cancelled() {
                    debug!("scan cancelled before wave {wave_idx}");
                    return;
                }

                let probes = wave
                    .iter()
                    .map(|&addr| prober.probe(addr, &ports, deadline, &cancel));
                let results: Vec<Option<Device>> = join_all(probes).await;

                completed += wave.len();
                on_progress(completed as f64 / total as f64);

                let found: Vec<Device> = results.into_iter().flatten().collect();
                debug!(
                    "wave {wave_idx} settled: {} found, {completed}/{total} probed",
                    found.len()
                );

                for device in found {
                    info!(address = %device.address, method = %device.discovery_method, "found device");
                    yield Ok(device);
                }
            }
        })
    }

    /// Manual probe of a single address, see [`Prober::probe_manual`].
    pub async fn probe_manual(
        &self,
        address: &str,
        settings: &ScanSettings,
        cancel: &CancellationToken,
    ) -> Result<Option<Device>, ScanError> {
        self.prober.probe_manual(address, settings, cancel).await
    }

    pub async fn connectivity(&self, address: Ipv4Addr, port: u16) -> Connectivity {
        connectivity::test(self.prober.transport().as_ref(), address, port).await
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
