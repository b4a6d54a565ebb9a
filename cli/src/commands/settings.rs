use anyhow::Context;
use colored::*;
use roomfinder_common::settings::ScanSettings;
use roomfinder_common::success;

use crate::commands::SettingsAction;
use crate::config::Config;
use crate::terminal::{colors, print};

const KEY_WIDTH: usize = 9;

pub fn settings(action: SettingsAction, cfg: &Config) -> anyhow::Result<()> {
    let store = &cfg.store;
    match action {
        SettingsAction::Show => {
            let current = store.load().context("loading scan settings")?;
            show(&current, cfg);
        }
        SettingsAction::Set { values } => {
            let patch = values.into_patch();
            if patch.is_empty() {
                anyhow::bail!("nothing to change, pass --subnet, --port or --timeout");
            }

            let mut candidate = store.load().context("loading scan settings")?;
            candidate.merge(patch.clone());
            candidate.validate()?;

            let saved = store.update(patch).context("saving scan settings")?;
            success!("Settings saved to {}", store.path().display());
            show(&saved, cfg);
        }
        SettingsAction::Reset => {
            let defaults = store.reset().context("resetting scan settings")?;
            success!("Settings restored to defaults");
            show(&defaults, cfg);
        }
    }
    Ok(())
}

fn show(settings: &ScanSettings, cfg: &Config) {
    print::header("scan settings", cfg.quiet);

    let ports: Vec<String> = settings.ports.iter().map(u16::to_string).collect();
    let manual = if settings.manual_ip.is_empty() {
        "-".dimmed()
    } else {
        settings.manual_ip.color(colors::IPV4_ADDR)
    };

    print::aligned_line("Subnets", KEY_WIDTH, settings.subnets.join(", ").color(colors::IPV4_ADDR));
    print::aligned_line("Ports", KEY_WIDTH, ports.join(", ").color(colors::PORT));
    print::aligned_line("Timeout", KEY_WIDTH, format!("{}ms", settings.timeout_ms));
    print::aligned_line("Manual IP", KEY_WIDTH, manual);
    print::aligned_line("File", KEY_WIDTH, store_path(cfg).dimmed());
}

fn store_path(cfg: &Config) -> String {
    cfg.store.path().display().to_string()
}
