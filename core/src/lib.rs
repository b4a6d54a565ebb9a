//! # Roomfinder Core
//!
//! The discovery engine. Layered leaf to root:
//!
//! * **[`timeout`]**: races an attempt against its deadline and the scan's cancellation token.
//! * **[`network`]**: the [`network::ProbeTransport`] seam and its socket-backed implementation.
//! * **[`prober`]**: two-stage presence check of a single address.
//! * **[`connectivity`]**: single-attempt reachability check for the connection flow.
//! * **[`scanner`]**: bounded-concurrency orchestration over whole subnets.

pub mod connectivity;
pub mod network;
pub mod prober;
pub mod scanner;
pub mod timeout;

#[cfg(test)]
mod testing;

pub use scanner::{CONCURRENCY_LIMIT, DeviceStream, Scanner};
