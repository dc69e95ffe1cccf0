//! TCP connect/disconnect probe.
use crate::{ProbeError, Result};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tokio::net::TcpSocket;
use tracing::trace;

/// Where the probe socket is bound before connecting.
#[derive(Debug, Clone, Default)]
pub struct Binding<'a> {
    /// Local address to bind.
    pub local_addr: Option<SocketAddr>,
    /// Interface name (SO_BINDTODEVICE).
    pub interface: Option<&'a str>,
}

/// Connect to `addr`, measure the time to establishment, then close.
///
/// Timing starts when the connect is issued; socket setup and binding are
/// not part of the measurement.
pub async fn connect_and_disconnect(
    addr: SocketAddr,
    binding: &Binding<'_>,
    timeout: Duration,
) -> Result<Duration> {
    let socket = build_socket(addr, binding)?;
    let start = Instant::now();
    let stream = tokio::time::timeout(timeout, socket.connect(addr))
        .await
        .map_err(|_| ProbeError::Timeout(timeout))??;
    let elapsed = start.elapsed();
    trace!(%addr, ?elapsed, "tcp connected, closing");
    drop(stream);
    Ok(elapsed)
}

fn build_socket(addr: SocketAddr, binding: &Binding<'_>) -> Result<TcpSocket> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_nonblocking(true)?;
    socket.set_nodelay(true)?;
    if let Some(name) = binding.interface {
        bind_device(&socket, name)?;
    }
    if let Some(local) = binding.local_addr {
        socket.bind(&local.into())?;
    }
    Ok(TcpSocket::from_std_stream(socket.into()))
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn bind_device(socket: &Socket, name: &str) -> Result<()> {
    socket.bind_device(Some(name.as_bytes()))?;
    Ok(())
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn bind_device(_socket: &Socket, name: &str) -> Result<()> {
    Err(ProbeError::invalid_target(format!(
        "binding to interface {name} is not supported on this platform"
    )))
}
