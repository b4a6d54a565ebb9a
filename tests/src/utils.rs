use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

use roomfinder_common::settings::ScanSettings;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::task::JoinHandle;

pub const LOOPBACK_PREFIX: &str = "127.0.0.";
pub const HTTP_REPLY: &[u8] =
    b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";
pub const BANNER_REPLY: &[u8] = b"SSH-2.0-OpenSSH_9.6\r\n";

/// How a fake device treats an incoming connection.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Answers every request like a tiny web server.
    Http,
    /// Sends a non-HTTP banner, then closes.
    Banner,
    /// Accepts and then never says anything.
    Silent,
}

pub struct FakeDevice {
    pub addr: SocketAddrV4,
    task: JoinHandle<()>,
}

impl FakeDevice {
    pub async fn spawn(behavior: Behavior) -> anyhow::Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let SocketAddr::V4(addr) = listener.local_addr()? else {
            anyhow::bail!("loopback listener is not IPv4");
        };

        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(serve(stream, behavior));
            }
        });

        Ok(Self { addr, task })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn serve(mut stream: TcpStream, behavior: Behavior) {
    let mut request = [0u8; 1024];
    let _ = stream.read(&mut request).await;

    match behavior {
        Behavior::Http => {
            let _ = stream.write_all(HTTP_REPLY).await;
        }
        Behavior::Banner => {
            let _ = stream.write_all(BANNER_REPLY).await;
        }
        Behavior::Silent => {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
    }
    let _ = stream.shutdown().await;
}

/// Settings that sweep the loopback /24 on the given ports with the
/// shortest allowed deadline.
pub fn loopback_settings(ports: &[u16]) -> ScanSettings {
    ScanSettings {
        subnets: vec![LOOPBACK_PREFIX.to_string()],
        ports: ports.to_vec(),
        timeout_ms: roomfinder_common::settings::MIN_TIMEOUT_MS,
        manual_ip: String::new(),
    }
}

/// A localhost port that refuses connections for as long as this value lives.
///
/// The socket is bound but never listens, so no other listener can claim the
/// port while a test relies on it being closed.
pub struct ClosedPort {
    socket: TcpSocket,
}

impl ClosedPort {
    pub fn reserve() -> anyhow::Result<Self> {
        let socket = TcpSocket::new_v4()?;
        socket.bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)))?;
        Ok(Self { socket })
    }

    pub fn port(&self) -> anyhow::Result<u16> {
        Ok(self.socket.local_addr()?.port())
    }
}
