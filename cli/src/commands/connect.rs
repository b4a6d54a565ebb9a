use std::net::Ipv4Addr;

use anyhow::{Context, bail};
use colored::*;
use roomfinder_common::device::Device;
use roomfinder_common::success;
use roomfinder_core::Scanner;

use crate::config::Config;
use crate::terminal::{colors, print};

pub async fn connect(address: Ipv4Addr, port: u16, cfg: &Config) -> anyhow::Result<()> {
    let scanner = Scanner::with_http().context("preparing the network transport")?;
    let result = scanner.connectivity(address, port).await;

    if !result.reachable {
        let reason = result.explanation.unwrap_or_default();
        bail!("{address}:{port} is not reachable via {}. {reason}", result.method);
    }

    let url = Device::url_for(address, port);

    success!("{address}:{port} answered the {}", result.method);
    if cfg.quiet {
        println!("{url}");
    } else {
        print::aligned_line("Open", 4, url.color(colors::IPV4_ADDR).underline());
    }
    Ok(())
}
