//! Terminal chat client for the Roomcast relay.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-client -- --url ws://localhost:8080
//! ```

use clap::Parser;
use roomcast_shared::logger::setup_logger;

/// Terminal chat client for the Roomcast relay
#[derive(Debug, Parser)]
#[command(name = "roomcast-client", version, about)]
struct Args {
    /// WebSocket URL of the server
    #[arg(short, long, env = "ROOMCAST_URL", default_value = "ws://localhost:8080")]
    url: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let code = match roomcast_client::run_client(&args.url).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Client error: {}", e);
            eprintln!("Error: {e}");
            1
        }
    };

    // The line editor thread may still be blocked on stdin
    std::process::exit(code);
}
