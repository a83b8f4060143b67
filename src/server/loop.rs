// Server loop module
// Binds the listener and accepts connections until shutdown

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use super::listener::bind_listener;
use crate::config::AppState;
use crate::logger;

/// Bind `addr` and serve until `shutdown` is notified.
///
/// A port already in use is not fatal: the diagnostic is logged and the
/// process stays up, idle, until shutdown. Any other bind error is returned.
pub async fn run(
    addr: SocketAddr,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let listener = match bind_listener(addr) {
        Ok(listener) => listener,
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
            logger::log_port_in_use(addr.port());
            shutdown.notified().await;
            logger::log_shutdown();
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    logger::log_listening(listener.local_addr()?.port());
    start_server_loop(listener, state, shutdown).await
}

/// Accept connections on `listener` until `shutdown` is notified.
///
/// Connections already being served keep running on their own tasks.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            _ = shutdown.notified() => {
                logger::log_shutdown();
                return Ok(());
            }
        }
    }
}
