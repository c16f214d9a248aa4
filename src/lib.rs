//! Cumulo Webhook - mutating admission webhook for the `cumulo.ai` label
//!
//! The API server calls this webhook synchronously while admitting workload
//! objects. The webhook inspects the object's labels and answers with a
//! single-operation JSON patch that sets the managed label:
//!
//! - label absent: add it with value `"true"`
//! - label present (any value): set it to `"false"`
//!
//! # Modules
//!
//! - [`patch`] - Patch decision engine (pure, stateless)
//! - [`webhook`] - AdmissionReview handling and HTTP routes
//! - [`server`] - HTTPS server bootstrap and graceful shutdown
//! - [`config`] - Command line / environment configuration
//! - [`telemetry`] - Tracing subscriber setup
//! - [`error`] - Error types for the webhook

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod patch;
pub mod server;
pub mod telemetry;
pub mod webhook;

pub use error::Error;

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Default Configuration Constants
// =============================================================================

/// Label managed by the webhook
pub const MANAGED_LABEL: &str = "cumulo.ai";

/// Default port for the HTTPS admission server
pub const DEFAULT_WEBHOOK_PORT: u16 = 8080;

/// Default path of the PEM-encoded serving certificate
pub const DEFAULT_TLS_CERT_PATH: &str = "/etc/certs/tls.crt";

/// Default path of the PEM-encoded serving key
pub const DEFAULT_TLS_KEY_PATH: &str = "/etc/certs/tls.key";
