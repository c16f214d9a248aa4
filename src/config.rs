//! Command line and environment configuration
//!
//! Every flag can also be set through a `CUMULO_WEBHOOK_*` environment
//! variable so the webhook can be configured from a Deployment manifest.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::{DEFAULT_TLS_CERT_PATH, DEFAULT_TLS_KEY_PATH};

/// Log output format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human readable text
    Text,
}

/// Cumulo webhook - mutating admission webhook for the cumulo.ai label
#[derive(Parser, Debug, Clone)]
#[command(name = "cumulo-webhook", version, about, long_about = None)]
pub struct WebhookConfig {
    /// Address the HTTPS server listens on
    #[arg(long, env = "CUMULO_WEBHOOK_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// PEM-encoded serving certificate
    #[arg(long, env = "CUMULO_WEBHOOK_TLS_CERT", default_value = DEFAULT_TLS_CERT_PATH)]
    pub tls_cert: PathBuf,

    /// PEM-encoded serving key
    #[arg(long, env = "CUMULO_WEBHOOK_TLS_KEY", default_value = DEFAULT_TLS_KEY_PATH)]
    pub tls_key: PathBuf,

    /// Log output format
    #[arg(long, env = "CUMULO_WEBHOOK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Json)]
    pub log_format: LogFormat,

    /// Seconds to let in-flight admission requests finish on shutdown
    #[arg(long, env = "CUMULO_WEBHOOK_SHUTDOWN_GRACE_SECS", default_value = "10")]
    pub shutdown_grace_secs: u64,
}

impl WebhookConfig {
    /// Grace period for in-flight requests on shutdown
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
