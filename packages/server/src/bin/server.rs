//! snakk chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin snakk-server
//! cargo run --bin snakk-server -- --config ./config.json --host 127.0.0.1
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use snakk_server::{
    domain::IdentityRegistry,
    infrastructure::{config::DEFAULT_CONFIG_PATH, load_config},
    ui::{AppState, Server},
    usecase::Coordinator,
};
use snakk_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "snakk-server")]
#[command(about = "Single-room WebSocket chat server", long_about = None)]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // The logger depends on the configuration, so config errors go to stderr
    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = setup_logger(env!("CARGO_BIN_NAME"), &config.log_level, config.log_file()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    // Initialize dependencies in order:
    // 1. Registry and clock
    // 2. Coordinator task
    // 3. AppState
    // 4. Server
    let registry = Arc::new(IdentityRegistry::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let coordinator = Coordinator::new(
        config.chat_history_num_lines,
        registry.clone(),
        clock.clone(),
    );
    let (handle, mut coordinator_task) = coordinator.start();

    let state = AppState::new(
        handle,
        registry,
        clock,
        config.chat_history_num_lines,
        config.basic_auth(),
    );
    let server = Server::new(state);

    tokio::select! {
        result = server.run(&args.host, config.serve_port) => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
                std::process::exit(1);
            }
        }
        result = &mut coordinator_task => {
            match result {
                Err(e) => tracing::error!("Room coordinator crashed: {}", e),
                Ok(()) => tracing::error!("Room coordinator stopped unexpectedly"),
            }
            std::process::exit(1);
        }
    }
}
