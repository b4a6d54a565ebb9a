use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};

use futures::StreamExt;
use roomfinder_common::device::{Device, DiscoveryMethod, HUB_NAME, PORT_OPEN_NAME};
use roomfinder_common::error::ScanError;
use roomfinder_common::registry::DeviceRegistry;
use roomfinder_core::Scanner;
use tokio_util::sync::CancellationToken;

use crate::utils::{Behavior, ClosedPort, FakeDevice, loopback_settings};

/// Runs a full discovery and returns what was yielded plus every progress report.
async fn run(
    settings: roomfinder_common::settings::ScanSettings,
    cancel: CancellationToken,
) -> (Vec<Result<Device, ScanError>>, Vec<f64>) {
    let scanner = Scanner::with_http().expect("http transport");
    let progress = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&progress);

    let items: Vec<_> = scanner
        .discover(settings, move |p| sink.lock().unwrap().push(p), cancel)
        .collect()
        .await;

    let reports = progress.lock().unwrap().clone();
    (items, reports)
}

/// Sweeping 127.0.0.0/24 must only turn up the listener on 127.0.0.1;
/// the rest of the loopback range refuses the port.
#[tokio::test]
async fn discovery_finds_http_hub_on_loopback() {
    let hub = FakeDevice::spawn(Behavior::Http).await.unwrap();

    let (items, progress) = run(loopback_settings(&[hub.port()]), CancellationToken::new()).await;

    assert_eq!(items.len(), 1, "expected exactly one device: {items:?}");
    let device = items.into_iter().next().unwrap().unwrap();
    assert_eq!(device.address, Ipv4Addr::LOCALHOST);
    assert_eq!(device.port, Some(hub.port()));
    assert_eq!(device.discovery_method, DiscoveryMethod::HttpPing);
    assert_eq!(device.display_name, HUB_NAME);

    // 254 hosts in waves of 40
    assert_eq!(progress.len(), 7);
    assert_eq!(progress.last().copied(), Some(1.0));
    assert!(progress.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn non_http_listener_is_reported_as_open_port() {
    let device = FakeDevice::spawn(Behavior::Banner).await.unwrap();

    let (items, _) = run(loopback_settings(&[device.port()]), CancellationToken::new()).await;

    assert_eq!(items.len(), 1);
    let found = items.into_iter().next().unwrap().unwrap();
    assert_eq!(found.discovery_method, DiscoveryMethod::PortOpen);
    assert_eq!(found.display_name, PORT_OPEN_NAME);
}

#[tokio::test]
async fn later_port_is_tried_when_first_is_closed() {
    let hub = FakeDevice::spawn(Behavior::Http).await.unwrap();
    let closed = ClosedPort::reserve().unwrap();

    let (items, _) = run(
        loopback_settings(&[closed.port().unwrap(), hub.port()]),
        CancellationToken::new(),
    )
    .await;

    let devices: Vec<Device> = items.into_iter().map(Result::unwrap).collect();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].port, Some(hub.port()));
}

#[tokio::test]
async fn nothing_listening_yields_empty_scan() {
    let closed = ClosedPort::reserve().unwrap();

    let (items, progress) = run(
        loopback_settings(&[closed.port().unwrap()]),
        CancellationToken::new(),
    )
    .await;

    assert!(items.is_empty());
    assert_eq!(progress.last().copied(), Some(1.0));
}

#[tokio::test]
async fn cancelled_scan_dispatches_nothing() {
    let hub = FakeDevice::spawn(Behavior::Http).await.unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let (items, progress) = run(loopback_settings(&[hub.port()]), cancel).await;

    assert!(items.is_empty());
    assert!(progress.is_empty());
}

#[tokio::test]
async fn invalid_settings_end_the_stream_with_one_error() {
    let mut settings = loopback_settings(&[80]);
    settings.timeout_ms = 100;

    let (items, progress) = run(settings, CancellationToken::new()).await;

    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(ScanError::InvalidSettings(_))));
    assert!(progress.is_empty());
}

#[tokio::test]
async fn registry_keeps_demo_next_to_scan_results() {
    let hub = FakeDevice::spawn(Behavior::Http).await.unwrap();
    let (items, _) = run(loopback_settings(&[hub.port()]), CancellationToken::new()).await;

    let mut registry = DeviceRegistry::with_demo();
    registry.clear_discovered();
    for device in items {
        registry.insert(device.unwrap());
    }

    assert_eq!(registry.len(), 2);
    assert_eq!(registry.discovered_count(), 1);
    assert!(registry.get(&Ipv4Addr::LOCALHOST).is_some());
}
