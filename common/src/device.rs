//! # Device Model
//!
//! A [`Device`] is created exactly once, by the stage of the probe heuristic
//! that succeeded, and is never mutated afterwards. Ownership passes to
//! whoever consumes the scan.

use std::fmt;
use std::net::Ipv4Addr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HUB_NAME: &str = "SmartRoomHub";
pub const PORT_OPEN_NAME: &str = "SmartRoomHub (Port Open)";
pub const DEMO_NAME: &str = "SmartRoomHub (Demo)";

const DEMO_ADDR: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 100);
const DEMO_RTT_MS: u64 = 42;
const DEFAULT_HTTP_PORT: u16 = 80;

/// Which detection mechanism found the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryMethod {
    /// The `/ping` endpoint answered with any HTTP response.
    HttpPing,
    /// Only a raw resource fetch succeeded, no application-level handshake.
    PortOpen,
    /// Reserved for broadcast discovery, never produced by the scanner.
    Mdns,
    /// Found by a targeted single-address probe.
    Manual,
    /// Demo entry, not backed by a network probe.
    Mock,
}

impl fmt::Display for DiscoveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiscoveryMethod::HttpPing => "http-ping",
            DiscoveryMethod::PortOpen => "port-open",
            DiscoveryMethod::Mdns => "mdns",
            DiscoveryMethod::Manual => "manual",
            DiscoveryMethod::Mock => "mock",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceStatus {
    Online,
    Offline,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub address: Ipv4Addr,
    pub display_name: String,
    pub discovery_method: DiscoveryMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round_trip_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub last_seen: DateTime<Utc>,
    pub status: DeviceStatus,
}

impl Device {
    /// Builds an online device for a probe that just succeeded on `port`.
    pub fn found(
        address: Ipv4Addr,
        port: u16,
        discovery_method: DiscoveryMethod,
        round_trip: Duration,
    ) -> Self {
        let display_name = match discovery_method {
            DiscoveryMethod::PortOpen => PORT_OPEN_NAME,
            _ => HUB_NAME,
        };

        Self {
            address,
            display_name: display_name.to_string(),
            discovery_method,
            round_trip_ms: Some(round_trip.as_millis() as u64),
            port: Some(port),
            last_seen: Utc::now(),
            status: DeviceStatus::Online,
        }
    }

    /// The demo hub shown before any scan has run.
    pub fn demo() -> Self {
        Self {
            address: DEMO_ADDR,
            display_name: DEMO_NAME.to_string(),
            discovery_method: DiscoveryMethod::Mock,
            round_trip_ms: Some(DEMO_RTT_MS),
            port: None,
            last_seen: Utc::now(),
            status: DeviceStatus::Online,
        }
    }

    /// Re-tags a device as found by a manual probe, keeping everything else.
    pub fn into_manual(self) -> Self {
        Self {
            discovery_method: DiscoveryMethod::Manual,
            ..self
        }
    }

    /// Address of the device's own web UI.
    pub fn ui_url(&self) -> String {
        Self::url_for(self.address, self.port.unwrap_or(DEFAULT_HTTP_PORT))
    }

    /// Web UI address of whatever listens on `address:port`. Port 80 is left implicit.
    pub fn url_for(address: Ipv4Addr, port: u16) -> String {
        if port == DEFAULT_HTTP_PORT {
            format!("http://{address}")
        } else {
            format!("http://{address}:{port}")
        }
    }

    pub fn is_mock(&self) -> bool {
        self.discovery_method == DiscoveryMethod::Mock
    }
}
