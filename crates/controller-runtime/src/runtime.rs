//! Controller lifecycle: build the registry, serve HTTP, run the roster
//! report, and stop everything on shutdown.

use crate::config::ControllerConfig;
use crate::error::RuntimeError;
use crate::report::roster_report;
use oc_peer_registry::{serve, PeerRegistryApi, RegistryService};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

/// The controller runtime owning the one registry instance.
pub struct ControllerRuntime {
    config: ControllerConfig,
    /// Registry service shared with every request handler.
    service: Arc<RegistryService>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl ControllerRuntime {
    /// Create a runtime with an empty registry.
    pub fn new(config: ControllerConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        let service = Arc::new(RegistryService::new(config.registry.clone())?);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Ok(Self {
            config,
            service,
            shutdown_tx,
            shutdown_rx,
        })
    }

    pub fn service(&self) -> Arc<RegistryService> {
        Arc::clone(&self.service)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Bind the configured HTTP address.
    pub async fn bind(&self) -> Result<TcpListener, RuntimeError> {
        let addr = self.config.http_addr();
        TcpListener::bind(addr)
            .await
            .map_err(|source| RuntimeError::Bind { addr, source })
    }

    /// Serve on `listener` until `signal` resolves, then drain and return.
    pub async fn run<F>(self, listener: TcpListener, signal: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr: Option<SocketAddr> = listener.local_addr().ok();
        let space = self.config.registry.address_space.clone();
        info!(
            addr = ?local_addr,
            network = %space.network,
            prefix_len = space.prefix_len,
            first_host_offset = space.first_host_offset,
            "Controller listening (POST /join, GET /peers, GET /health)"
        );

        let api: Arc<dyn PeerRegistryApi> = self.service.clone();

        let report = self.config.report.interval().map(|period| {
            tokio::spawn(roster_report(
                Arc::clone(&api),
                period,
                self.shutdown_rx.clone(),
            ))
        });

        let shutdown_tx = self.shutdown_tx;
        let result = serve(listener, api, async move {
            signal.await;
            info!("Received shutdown signal");
            let _ = shutdown_tx.send(true);
        })
        .await;

        if let Some(report) = report {
            if let Err(e) = report.await {
                warn!(error = %e, "Roster report task failed");
            }
        }

        result.map_err(RuntimeError::Serve)?;
        info!(peers = self.service.stats().peers, "Controller stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
