use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use futures::StreamExt;
use roomfinder_common::device::Device;
use roomfinder_common::error::ScanError;
use roomfinder_common::registry::DeviceRegistry;
use roomfinder_common::{success, warn};
use roomfinder_core::Scanner;
use tokio_util::sync::CancellationToken;
use tracing::info_span;

use crate::commands::SettingsArgs;
use crate::config::Config;
use crate::rprint;
use crate::terminal::{colors, format, print, progress};

pub async fn discover(
    overrides: SettingsArgs,
    demo: bool,
    json: bool,
    cfg: &Config,
) -> anyhow::Result<()> {
    let mut settings = cfg.store.load().context("loading scan settings")?;
    settings.merge(overrides.into_patch());

    let scanner = Scanner::with_http().context("preparing the network transport")?;
    let mut registry = if demo {
        DeviceRegistry::with_demo()
    } else {
        DeviceRegistry::new()
    };

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let span = info_span!("discovery");
    progress::prepare(&span);
    let guard = span.enter();

    let start_time: Instant = Instant::now();
    let mut stream = scanner.discover(settings, progress::reporter(span.clone()), cancel.clone());

    let mut failure = None;
    while let Some(item) = stream.next().await {
        match item {
            Ok(device) => {
                registry.insert(device);
                progress::report_found(&span, registry.discovered_count());
            }
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    drop(guard);
    drop(span);

    if let Some(e) = failure {
        return Err(scan_failure(e));
    }
    if cancel.is_cancelled() {
        warn!("Scan stopped early, results are partial");
    }

    if json {
        let devices: Vec<&Device> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }

    discovery_ends(&registry, start_time.elapsed(), cfg);
    Ok(())
}

fn scan_failure(e: ScanError) -> anyhow::Error {
    if e.is_defect() {
        anyhow::Error::new(e).context("scan could not complete")
    } else {
        anyhow::Error::new(e)
    }
}

fn discovery_ends(registry: &DeviceRegistry, total_time: Duration, cfg: &Config) {
    if registry.is_empty() {
        no_hubs_found(cfg);
        return;
    }

    print::header("SmartRoomHub Discovery", cfg.quiet);
    print_devices(registry);
    print_summary(registry.discovered_count(), total_time, cfg);
}

fn no_hubs_found(cfg: &Config) {
    print::header("ZERO HUBS DETECTED", cfg.quiet);
    if !cfg.quiet {
        print::no_results();
    }
}

fn print_devices(registry: &DeviceRegistry) {
    let len = registry.len();
    for (idx, device) in registry.iter().enumerate() {
        print::tree_head(idx, &device.display_name);
        print::as_tree_one_level(format::device_to_details(device));
        if idx + 1 != len {
            rprint!();
        }
    }
}

fn print_summary(found: usize, total_time: Duration, cfg: &Config) {
    let found: ColoredString = format!("{found} new hubs").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString =
        format!("Discovery Complete: {found} identified in {total_time}").color(colors::TEXT_DEFAULT);

    if cfg.quiet {
        success!("{}", output);
    } else {
        print::fat_separator();
        print::centerln(&output.to_string());
    }
}
