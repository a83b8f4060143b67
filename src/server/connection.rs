// Connection handling module
// Serves one accepted TCP connection on its own task

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Hand an accepted connection to its own task.
///
/// Connections share nothing mutable, so each runs independently; a failure
/// on one is logged and never affects the others.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    logger::log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
    tokio::spawn(serve_connection(stream, peer_addr, Arc::clone(state)));
}

/// Serve HTTP/1 requests on `stream` until the client closes it.
async fn serve_connection(stream: TcpStream, peer_addr: SocketAddr, state: Arc<AppState>) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(state.keep_alive);

    let service = service_fn(move |req| {
        handler::handle_request(req, Arc::clone(&state), Some(peer_addr))
    });

    if let Err(err) = builder.serve_connection(io, service).await {
        logger::log_connection_error(&err);
    }
}
