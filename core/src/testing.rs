//! Scripted transport for unit tests. Pair with `start_paused` runtimes so
//! simulated latencies cost no wall-clock time.

use std::collections::{HashMap, HashSet};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use roomfinder_common::error::ProbeError;

use crate::network::ProbeTransport;

/// Latency of an unscripted target before it refuses.
pub const REFUSAL_DELAY: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Respond(Duration),
    Refuse(Duration),
    Hang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ping,
    Resource,
}

#[derive(Debug, Clone, Copy)]
struct Script {
    ping: Outcome,
    resource: Outcome,
}

#[derive(Default)]
pub struct MockTransport {
    scripts: HashMap<SocketAddrV4, Script>,
    calls: Mutex<Vec<(SocketAddrV4, Stage)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, ip: Ipv4Addr, port: u16, ping: Outcome, resource: Outcome) -> Self {
        self.scripts
            .insert(SocketAddrV4::new(ip, port), Script { ping, resource });
        self
    }

    /// Hub answering `/ping` after `latency`.
    pub fn hub(self, ip: Ipv4Addr, port: u16, latency: Duration) -> Self {
        self.script(ip, port, Outcome::Respond(latency), Outcome::Refuse(REFUSAL_DELAY))
    }

    /// Device that only passes the raw fallback.
    pub fn open_port(self, ip: Ipv4Addr, port: u16, latency: Duration) -> Self {
        self.script(ip, port, Outcome::Refuse(REFUSAL_DELAY), Outcome::Respond(latency))
    }

    pub fn calls(&self) -> Vec<(SocketAddrV4, Stage)> {
        self.calls.lock().unwrap().clone()
    }

    /// Distinct addresses in first-dispatch order.
    pub fn probed_addresses(&self) -> Vec<Ipv4Addr> {
        let mut seen = HashSet::new();
        self.calls()
            .iter()
            .map(|(target, _)| *target.ip())
            .filter(|ip| seen.insert(*ip))
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn play(&self, target: SocketAddrV4, stage: Stage) -> Result<(), ProbeError> {
        self.calls.lock().unwrap().push((target, stage));
        let _guard = InFlight::enter(self);

        let outcome = match (self.scripts.get(&target), stage) {
            (Some(script), Stage::Ping) => script.ping,
            (Some(script), Stage::Resource) => script.resource,
            (None, _) => Outcome::Refuse(REFUSAL_DELAY),
        };

        match outcome {
            Outcome::Respond(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            Outcome::Refuse(delay) => {
                tokio::time::sleep(delay).await;
                Err(ProbeError::NetworkUnreachable("connection refused".into()))
            }
            Outcome::Hang => std::future::pending::<Result<(), ProbeError>>().await,
        }
    }
}

struct InFlight<'a>(&'a MockTransport);

impl<'a> InFlight<'a> {
    fn enter(mock: &'a MockTransport) -> Self {
        let now = mock.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        mock.max_in_flight.fetch_max(now, Ordering::SeqCst);
        Self(mock)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ProbeTransport for MockTransport {
    async fn http_ping(&self, target: SocketAddrV4) -> Result<(), ProbeError> {
        self.play(target, Stage::Ping).await
    }

    async fn fetch_resource(&self, target: SocketAddrV4) -> Result<(), ProbeError> {
        self.play(target, Stage::Resource).await
    }
}
