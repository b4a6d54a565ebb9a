mod commands;
mod config;
mod terminal;

use anyhow::Context;
use commands::{CommandLine, Commands, connect, discover, probe, settings};
use config::Config;
use roomfinder_common::settings::SettingsStore;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let store = match commands.config {
        Some(path) => SettingsStore::new(path),
        None => SettingsStore::open_default().context("locating the settings file")?,
    };
    let cfg = Config {
        quiet: commands.quiet,
        store,
    };

    print::banner(cfg.quiet);

    match commands.command {
        Commands::Discover {
            overrides,
            demo,
            json,
        } => {
            print::header("getting ready for discovery", cfg.quiet);
            discover::discover(overrides, demo, json, &cfg).await
        }
        Commands::Probe { address } => {
            print::header("manual probe", cfg.quiet);
            probe::probe(&address, &cfg).await
        }
        Commands::Connect { address, port } => {
            print::header("connecting", cfg.quiet);
            connect::connect(address, port, &cfg).await
        }
        Commands::Settings { action } => settings::settings(action, &cfg),
    }
}
