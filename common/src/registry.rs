use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use crate::device::Device;

/// Devices known to a front-end, keyed by address.
///
/// A device seen again replaces the earlier entry. Purely in-memory.
#[derive(Debug, Default, Clone)]
pub struct DeviceRegistry {
    devices: BTreeMap<Ipv4Addr, Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-seeded with the demo hub.
    pub fn with_demo() -> Self {
        let mut registry = Self::new();
        registry.insert(Device::demo());
        registry
    }

    pub fn insert(&mut self, device: Device) -> Option<Device> {
        self.devices.insert(device.address, device)
    }

    pub fn get(&self, address: &Ipv4Addr) -> Option<&Device> {
        self.devices.get(address)
    }

    /// Drops every entry found by a probe, keeping demo entries.
    pub fn clear_discovered(&mut self) {
        self.devices.retain(|_, device| device.is_mock());
    }

    /// Count of entries that came from the network.
    pub fn discovered_count(&self) -> usize {
        self.devices.values().filter(|d| !d.is_mock()).count()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }
}
