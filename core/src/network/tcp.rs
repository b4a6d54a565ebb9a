use std::net::SocketAddrV4;

use chrono::Utc;
use roomfinder_common::error::ProbeError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::RESOURCE_PATH;

/// Resource path with a cache-busting query, so intermediaries never answer
/// on the device's behalf.
pub fn resource_path() -> String {
    format!("{RESOURCE_PATH}?t={}", Utc::now().timestamp_millis())
}

/// Connects, writes a bare `GET` for `path` and waits for the first byte of
/// whatever comes back. The reply itself is never parsed.
pub async fn fetch_any_byte(target: SocketAddrV4, path: &str) -> Result<(), ProbeError> {
    let mut stream = TcpStream::connect(target).await.map_err(io_failure)?;

    let request = format!("GET {path} HTTP/1.0\r\nHost: {target}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(request.as_bytes())
        .await
        .map_err(io_failure)?;

    let mut first = [0u8; 1];
    match stream.read(&mut first).await {
        Ok(0) => Err(ProbeError::NetworkUnreachable(
            "connection closed without a reply".into(),
        )),
        Ok(_) => Ok(()),
        Err(e) => Err(io_failure(e)),
    }
}

fn io_failure(e: std::io::Error) -> ProbeError {
    ProbeError::NetworkUnreachable(e.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
