//! Terminal chat client for snakk.
//!
//! Prints room events and sends each line typed at the prompt. Slash
//! commands (`/nick`, `/me`, `/help`, `/uptime`) are passed to the server.
//! Reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin snakk-client -- 127.0.0.1:8080
//! cargo run --bin snakk-client -- --url wss://chat.example.com/ws
//! ```

use clap::Parser;
use snakk_client::{domain::resolve_url, run_client};
use snakk_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "snakk-client")]
#[command(about = "Terminal client for the snakk chat server", long_about = None)]
struct Args {
    /// Server address (host:port)
    #[arg(default_value = "127.0.0.1:8080")]
    host: String,

    /// Full WebSocket URL, overrides the host
    #[arg(short = 'u', long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    // Logs share the terminal with the chat, keep them quiet
    if let Err(e) = setup_logger(env!("CARGO_BIN_NAME"), "warn", None) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let args = Args::parse();

    let url = match resolve_url(&args.host, args.url.as_deref()) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_client(url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
