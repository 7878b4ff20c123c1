use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3847;

/// Default request body cap. Agent logs are large; this only guards
/// against runaway uploads.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Relay server configuration. Every flag can also be set from the
/// environment.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dispatch-server",
    version,
    about = "Verify agent dispatch output and format issue comments"
)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "DISPATCH_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "DISPATCH_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Emit JSON log lines instead of human-readable output
    #[arg(long, env = "DISPATCH_LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "DISPATCH_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: DEFAULT_PORT,
            log_json: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_logging(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    if config.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
