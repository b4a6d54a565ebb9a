pub mod connect;
pub mod discover;
pub mod probe;
pub mod settings;

use std::net::Ipv4Addr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use roomfinder_common::settings::ScanSettingsPatch;
use roomfinder_core::connectivity::DEFAULT_PORT;

#[derive(Parser)]
#[command(name = "roomfinder")]
#[command(about = "Find SmartRoomHub devices on the local network.", version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file to use instead of the platform default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print results
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the configured subnets for hubs
    #[command(alias = "d")]
    Discover {
        #[command(flatten)]
        overrides: SettingsArgs,
        /// Show the demo hub alongside scan results
        #[arg(long)]
        demo: bool,
        /// Print devices as JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
    /// Probe a single address with the stored ports and timeout
    #[command(alias = "p")]
    Probe { address: String },
    /// Check that a hub answers before opening its UI
    #[command(alias = "c")]
    Connect {
        address: Ipv4Addr,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Show or change the stored scan settings
    #[command(alias = "s")]
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,
    /// Store new values; anything not given is kept
    Set {
        #[command(flatten)]
        values: SettingsArgs,
    },
    /// Restore the defaults
    Reset,
}

#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// Subnet prefix such as 192.168.1. (repeatable)
    #[arg(long = "subnet", value_name = "PREFIX")]
    pub subnets: Vec<String>,
    /// Candidate port, tried in the order given (repeatable)
    #[arg(long = "port", value_name = "PORT")]
    pub ports: Vec<u16>,
    /// Per-attempt timeout in milliseconds
    #[arg(long = "timeout", value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

impl SettingsArgs {
    pub fn into_patch(self) -> ScanSettingsPatch {
        ScanSettingsPatch {
            subnets: (!self.subnets.is_empty()).then_some(self.subnets),
            ports: (!self.ports.is_empty()).then_some(self.ports),
            timeout_ms: self.timeout_ms,
            manual_ip: None,
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
