//! TLS accept loop.
//!
//! Every accepted TCP connection gets its own task which completes the TLS
//! handshake and then serves HTTP/1.1 or HTTP/2 until the peer hangs up. A
//! failed handshake or connection only ends that connection.

use std::{future::Future, io, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Result;
use axum::Router;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
    service::TowerToHyperService,
};
use rustls::ServerConfig;
use tokio::{
    net::{TcpListener, TcpStream},
    sync::watch,
    task::JoinSet,
};
use tokio_rustls::TlsAcceptor;
use tracing::{debug, info, warn};

/// Back-off after a failed `accept`, so persistent errors do not spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Upper bound on waiting for open connections after shutdown is requested.
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

enum Event {
    Shutdown,
    Accepted(io::Result<(TcpStream, SocketAddr)>),
    Finished,
}

/// Serve `router` over TLS on `listener` until `shutdown` resolves.
///
/// Once `shutdown` fires no new connections are accepted, every open
/// connection is asked to close after its current request, and this returns
/// when they all have, or after [`DRAIN_TIMEOUT`] with the stragglers aborted.
///
/// # Errors
///
/// Returns an error if the listener's local address cannot be read.
pub async fn serve<F>(
    listener: TcpListener,
    tls: Arc<ServerConfig>,
    router: Router,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let acceptor = TlsAcceptor::from(tls);
    let (stop_tx, stop_rx) = watch::channel(false);
    let mut connections = JoinSet::new();
    info!(addr = %listener.local_addr()?, "listening");

    tokio::pin!(shutdown);
    loop {
        let event = tokio::select! {
            _ = &mut shutdown => Event::Shutdown,
            accepted = listener.accept() => Event::Accepted(accepted),
            Some(_) = connections.join_next(), if !connections.is_empty() => Event::Finished,
        };

        let (tcp, peer) = match event {
            Event::Shutdown => break,
            Event::Finished => continue,
            Event::Accepted(Ok(conn)) => conn,
            Event::Accepted(Err(e)) => {
                warn!(error = %e, "failed to accept connection");
                tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                continue;
            }
        };

        let acceptor = acceptor.clone();
        let service = TowerToHyperService::new(router.clone());
        let mut stop = stop_rx.clone();
        connections.spawn(async move {
            let stream = match acceptor.accept(tcp).await {
                Ok(s) => s,
                Err(e) => {
                    debug!(peer = %peer, error = %e, "TLS handshake failed");
                    return;
                }
            };

            let builder = Builder::new(TokioExecutor::new());
            let conn = builder.serve_connection(TokioIo::new(stream), service);
            tokio::pin!(conn);
            let result = tokio::select! {
                result = conn.as_mut() => result,
                _ = stop.changed() => {
                    conn.as_mut().graceful_shutdown();
                    conn.as_mut().await
                }
            };
            if let Err(e) = result {
                debug!(peer = %peer, error = %e, "connection closed with error");
            }
        });
    }

    info!(
        open = connections.len(),
        "shutdown requested, draining connections"
    );
    drop(listener);
    let _ = stop_tx.send(true);

    let drained = tokio::time::timeout(DRAIN_TIMEOUT, async {
        while connections.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        warn!(
            open = connections.len(),
            "connections still open after drain timeout, aborting"
        );
        connections.shutdown().await;
    }
    Ok(())
}
