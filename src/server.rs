//! HTTPS server for the admission webhook
//!
//! The API server only calls webhooks over TLS, so the router is served with
//! `axum-server` on top of rustls. The serving certificate and key are read
//! from PEM files (normally a mounted Secret) once at startup.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tokio::signal;
use tracing::{error, info};

use crate::config::WebhookConfig;
use crate::webhook::webhook_router;
use crate::{Error, Result};

/// Install the process-wide rustls crypto provider (aws-lc-rs)
///
/// Returns an error if a different provider was installed first.
pub fn install_crypto_provider() -> Result<()> {
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .map_err(|_| Error::tls("a different rustls crypto provider is already installed"))
}

/// Load the serving certificate and key
pub async fn load_tls_config(cert: &Path, key: &Path) -> Result<RustlsConfig> {
    RustlsConfig::from_pem_file(cert, key).await.map_err(|e| {
        Error::tls(format!(
            "failed to load certificate {} / key {}: {}",
            cert.display(),
            key.display(),
            e
        ))
    })
}

/// Run the HTTPS webhook server until SIGINT or SIGTERM
pub async fn serve(config: &WebhookConfig) -> Result<()> {
    let tls_config = load_tls_config(&config.tls_cert, &config.tls_key).await?;
    info!(
        cert = %config.tls_cert.display(),
        key = %config.tls_key.display(),
        "Loaded serving certificate"
    );

    serve_with_tls(config.listen_addr, tls_config, config.shutdown_grace()).await
}

/// Run the HTTPS webhook server with an already loaded TLS config
pub async fn serve_with_tls(
    addr: SocketAddr,
    tls_config: RustlsConfig,
    grace: Duration,
) -> Result<()> {
    let handle = Handle::new();
    tokio::spawn(shutdown_on_signal(handle.clone(), grace));

    info!(addr = %addr, "Starting HTTPS webhook server");
    axum_server::bind_rustls(addr, tls_config)
        .handle(handle)
        .serve(webhook_router().into_make_service())
        .await
        .map_err(|e| {
            error!(error = %e, "HTTPS server error");
            Error::Io(e)
        })?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_on_signal(handle: Handle, grace: Duration) {
    shutdown_signal().await;
    handle.graceful_shutdown(Some(grace));
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_certificate_is_tls_error() {
        let cert = PathBuf::from("/nonexistent/cumulo-webhook/tls.crt");
        let key = PathBuf::from("/nonexistent/cumulo-webhook/tls.key");

        let err = load_tls_config(&cert, &key).await.unwrap_err();
        assert!(matches!(err, Error::Tls(_)));
        assert!(err.to_string().contains("/nonexistent/cumulo-webhook/tls.crt"));
    }

    #[tokio::test]
    async fn test_serve_fails_fast_without_certificate() {
        let config = WebhookConfig {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            tls_cert: PathBuf::from("/nonexistent/tls.crt"),
            tls_key: PathBuf::from("/nonexistent/tls.key"),
            log_format: crate::config::LogFormat::Text,
            shutdown_grace_secs: 0,
        };

        assert!(matches!(serve(&config).await, Err(Error::Tls(_))));
    }

    #[test]
    fn test_crypto_provider_install_is_stable() {
        // Installing the same provider twice is rejected by rustls, but the
        // first install in this process must succeed or already be in place.
        let _ = install_crypto_provider();
        assert!(rustls::crypto::CryptoProvider::get_default().is_some());
    }
}
