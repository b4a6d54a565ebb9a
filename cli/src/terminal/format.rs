use crate::terminal::colors;
use colored::*;
use roomfinder_common::device::{Device, DiscoveryMethod};

type Detail = (String, ColoredString);

pub fn method_to_value(method: DiscoveryMethod) -> ColoredString {
    let label = method.to_string();
    match method {
        DiscoveryMethod::PortOpen => label.color(colors::WEAK_MATCH),
        DiscoveryMethod::Mock => label.dimmed(),
        _ => label.color(colors::PRIMARY),
    }
}

pub fn device_to_details(device: &Device) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "IPv4".to_string(),
        device.address.to_string().color(colors::IPV4_ADDR),
    )];

    if let Some(port) = device.port {
        details.push(("Port".to_string(), port.to_string().color(colors::PORT)));
    }

    details.push(("Found by".to_string(), method_to_value(device.discovery_method)));

    if let Some(rtt) = device.round_trip_ms {
        details.push(("RTT".to_string(), format!("{rtt}ms").normal()));
    }

    details.push((
        "Seen".to_string(),
        device
            .last_seen
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .normal(),
    ));
    details.push(("UI".to_string(), device.ui_url().underline()));
    details
}
