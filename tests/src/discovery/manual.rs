use std::time::{Duration, Instant};

use roomfinder_common::device::DiscoveryMethod;
use roomfinder_common::error::ScanError;
use roomfinder_common::settings::SettingsStore;
use roomfinder_core::Scanner;
use tokio_util::sync::CancellationToken;

use crate::utils::{Behavior, FakeDevice, loopback_settings};

#[tokio::test]
async fn manual_probe_tags_device_as_manual() {
    let hub = FakeDevice::spawn(Behavior::Http).await.unwrap();
    let scanner = Scanner::with_http().unwrap();

    let found = scanner
        .probe_manual(
            " 127.0.0.1 ",
            &loopback_settings(&[hub.port()]),
            &CancellationToken::new(),
        )
        .await
        .unwrap()
        .expect("hub should answer");

    assert_eq!(found.discovery_method, DiscoveryMethod::Manual);
    assert_eq!(found.port, Some(hub.port()));
    assert!(found.round_trip_ms.is_some());
}

#[tokio::test]
async fn manual_probe_rejects_garbage_address() {
    let scanner = Scanner::with_http().unwrap();

    let err = scanner
        .probe_manual("192.168.1", &loopback_settings(&[80]), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::InvalidAddress(_)));
}

/// A device that accepts but never answers costs one deadline per stage.
#[tokio::test]
async fn silent_device_is_not_found() {
    let device = FakeDevice::spawn(Behavior::Silent).await.unwrap();
    let scanner = Scanner::with_http().unwrap();
    let settings = loopback_settings(&[device.port()]);

    let start = Instant::now();
    let found = scanner
        .probe_manual("127.0.0.1", &settings, &CancellationToken::new())
        .await
        .unwrap();

    assert!(found.is_none());
    assert!(start.elapsed() >= Duration::from_millis(2 * settings.timeout_ms));
}

#[tokio::test]
async fn manual_address_survives_in_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::new(dir.path().join("settings.json"));

    store
        .update(roomfinder_common::settings::ScanSettingsPatch {
            manual_ip: Some("127.0.0.1".to_string()),
            ..Default::default()
        })
        .unwrap();

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded.manual_ip, "127.0.0.1");
    assert_eq!(reloaded.ports, vec![80, 443, 3000, 8080]);
}
