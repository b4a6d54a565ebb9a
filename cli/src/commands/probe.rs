use anyhow::Context;
use roomfinder_common::settings::ScanSettingsPatch;
use roomfinder_common::{success, warn};
use roomfinder_core::Scanner;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::terminal::{format, print};

pub async fn probe(address: &str, cfg: &Config) -> anyhow::Result<()> {
    let settings = cfg.store.load().context("loading scan settings")?;
    let scanner = Scanner::with_http().context("preparing the network transport")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let found = scanner.probe_manual(address, &settings, &cancel).await?;

    // only a well-formed address gets this far, remember it for next time
    cfg.store
        .update(ScanSettingsPatch {
            manual_ip: Some(address.trim().to_string()),
            ..Default::default()
        })
        .context("saving the manual address")?;

    match found {
        Some(device) => {
            success!("{} answered on port {}", device.address, device.port.unwrap_or_default());
            print::tree_head(0, &device.display_name);
            print::as_tree_one_level(format::device_to_details(&device));
        }
        None if cancel.is_cancelled() => warn!("Probe of {} stopped before it finished", address.trim()),
        None => warn!("Device not found at {} on ports {:?}", address.trim(), settings.ports),
    }
    Ok(())
}
