use std::net::Ipv4Addr;

use roomfinder_core::Scanner;
use roomfinder_core::connectivity::{METHOD, UNREACHABLE_EXPLANATION};

use crate::utils::{Behavior, ClosedPort, FakeDevice};

#[tokio::test]
async fn reachable_hub_passes_connectivity_test() {
    let hub = FakeDevice::spawn(Behavior::Http).await.unwrap();
    let scanner = Scanner::with_http().unwrap();

    let result = scanner.connectivity(Ipv4Addr::LOCALHOST, hub.port()).await;

    assert!(result.reachable);
    assert_eq!(result.method, METHOD);
    assert!(result.explanation.is_none());
}

#[tokio::test]
async fn closed_port_fails_with_explanation() {
    let closed = ClosedPort::reserve().unwrap();
    let scanner = Scanner::with_http().unwrap();

    let result = scanner
        .connectivity(Ipv4Addr::LOCALHOST, closed.port().unwrap())
        .await;

    assert!(!result.reachable);
    assert_eq!(result.explanation.as_deref(), Some(UNREACHABLE_EXPLANATION));
}

/// Connectivity has no fallback stage, so a non-HTTP listener does not count.
#[tokio::test]
async fn banner_only_listener_is_unreachable() {
    let device = FakeDevice::spawn(Behavior::Banner).await.unwrap();
    let scanner = Scanner::with_http().unwrap();

    let result = scanner.connectivity(Ipv4Addr::LOCALHOST, device.port()).await;

    assert!(!result.reachable);
}

#[tokio::test]
async fn reserved_closed_port_cannot_be_taken_by_a_listener() {
    let closed = ClosedPort::reserve().unwrap();
    let port = closed.port().unwrap();

    assert!(tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, port)).await.is_err());
}
