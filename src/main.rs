//! Cumulo Webhook - mutating admission webhook for the cumulo.ai label

use clap::Parser;

use cumulo_webhook::config::WebhookConfig;
use cumulo_webhook::{server, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The webhook is only reachable over TLS; without a crypto provider
    // nothing can be served.
    if let Err(e) = server::install_crypto_provider() {
        eprintln!("CRITICAL: Failed to install rustls crypto provider: {e}");
        std::process::exit(1);
    }

    let config = WebhookConfig::parse();

    telemetry::init_telemetry(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.listen_addr,
        "Starting cumulo webhook"
    );

    server::serve(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Webhook server failed: {}", e))
}
