//! Single-attempt reachability check used to confirm a connection to a hub
//! that was already discovered or typed in by the user. No fallback stage.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use tracing::debug;

use crate::network::ProbeTransport;
use crate::timeout;

pub const CONNECTIVITY_DEADLINE: Duration = Duration::from_millis(3000);
pub const DEFAULT_PORT: u16 = 80;
pub const METHOD: &str = "HTTP Ping";
pub const UNREACHABLE_EXPLANATION: &str = "Device did not respond to the ping request. \
     It might be offline or on a different network.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connectivity {
    pub reachable: bool,
    pub method: &'static str,
    /// Human-readable reason, only set when unreachable.
    pub explanation: Option<String>,
}

pub async fn test(transport: &dyn ProbeTransport, address: Ipv4Addr, port: u16) -> Connectivity {
    let target = SocketAddrV4::new(address, port);

    match timeout::with_deadline(CONNECTIVITY_DEADLINE, transport.http_ping(target)).await {
        Ok(()) => Connectivity {
            reachable: true,
            method: METHOD,
            explanation: None,
        },
        Err(e) => {
            debug!(%target, "connectivity test failed: {e}");
            Connectivity {
                reachable: false,
                method: METHOD,
                explanation: Some(UNREACHABLE_EXPLANATION.to_string()),
            }
        }
    }
}
