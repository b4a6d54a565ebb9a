//! # Subnet Enumerator
//!
//! Expands dotted `/24` prefixes such as `"192.168.1."` into the host
//! addresses `.1` through `.254`. Host `0` (network) and `255` (broadcast)
//! are never produced.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const FIRST_HOST: u8 = 1;
const LAST_HOST: u8 = 254;

/// Number of addresses produced per prefix.
pub const HOSTS_PER_PREFIX: usize = (LAST_HOST - FIRST_HOST + 1) as usize;

/// The first three octets of an IPv4 `/24`, written as `"a.b.c."`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubnetPrefix {
    octets: [u8; 3],
}

impl SubnetPrefix {
    pub fn host(&self, n: u8) -> Ipv4Addr {
        let [a, b, c] = self.octets;
        Ipv4Addr::new(a, b, c, n)
    }

    pub fn hosts(&self) -> HostRange {
        HostRange::new(self.host(FIRST_HOST), self.host(LAST_HOST))
    }
}

impl FromStr for SubnetPrefix {
    type Err = String;

    /// Accepts exactly three canonical decimal octets followed by a trailing dot.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_suffix('.')
            .ok_or_else(|| format!("subnet prefix must end with '.': {s:?}"))?;

        let parts: Vec<&str> = body.split('.').collect();
        if parts.len() != 3 {
            return Err(format!("subnet prefix must have three octets: {s:?}"));
        }

        let mut octets = [0u8; 3];
        for (slot, part) in octets.iter_mut().zip(&parts) {
            *slot = parse_octet(part).ok_or_else(|| format!("invalid octet {part:?} in {s:?}"))?;
        }

        Ok(Self { octets })
    }
}

fn parse_octet(part: &str) -> Option<u8> {
    let canonical = !part.is_empty()
        && part.bytes().all(|b| b.is_ascii_digit())
        && (part == "0" || !part.starts_with('0'));
    canonical.then(|| part.parse().ok()).flatten()
}

impl fmt::Display for SubnetPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.octets;
        write!(f, "{a}.{b}.{c}.")
    }
}

impl TryFrom<String> for SubnetPrefix {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SubnetPrefix> for String {
    fn from(prefix: SubnetPrefix) -> Self {
        prefix.to_string()
    }
}

/// An inclusive span of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostRange {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl HostRange {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }
}

/// Every host address of every prefix, prefixes in input order and host
/// numbers ascending within each prefix.
pub fn enumerate(prefixes: &[SubnetPrefix]) -> Vec<Ipv4Addr> {
    let mut addrs = Vec::with_capacity(prefixes.len() * HOSTS_PER_PREFIX);
    for prefix in prefixes {
        addrs.extend(prefix.hosts().to_iter());
    }
    addrs
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
