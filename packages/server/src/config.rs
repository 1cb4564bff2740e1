//! Server configuration from command-line arguments and environment.

use clap::Parser;

use crate::ui::state::DEFAULT_OUTBOX_CAPACITY;

/// Room-based WebSocket relay server
#[derive(Debug, Clone, Parser)]
#[command(name = "roomcast-server", version, about)]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Messages buffered per connection before new ones are dropped
    #[arg(
        long,
        env = "OUTBOX_CAPACITY",
        default_value_t = DEFAULT_OUTBOX_CAPACITY as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub outbox_capacity: u32,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
