mod app_state;
mod config;
mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app_state::AppState;
use crate::config::Config;

#[tokio::main]
/// Loads the board, builds the kernel, and serves the wire protocol. Exits
/// non-zero if the board file can't be read or parsed — there is nothing
/// useful this process can do without a board.
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=info", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(true)
                .with_line_number(true)
                .with_target(true),
        )
        .init();

    let config = match Config::parse(std::env::args()) {
        Ok(config) => config,
        Err(message) => {
            tracing::error!(%message, "invalid startup arguments");
            eprintln!("{message}");
            std::process::exit(1);
        }
    };

    let labels = match kernel::load_board(&config.board_path).await {
        Ok(labels) => labels,
        Err(error) => {
            tracing::error!(%error, path = ?config.board_path, "failed to load board");
            std::process::exit(1);
        }
    };

    tracing::info!(rows = labels.len(), path = ?config.board_path, "board loaded");

    let state = Arc::new(AppState::new(kernel::Kernel::new(labels)));

    let app = Router::new()
        .route("/look/{player}", get(routes::look))
        .route("/flip/{player}/{row_col}", get(routes::flip))
        .route("/watch/{player}", get(routes::watch))
        .route("/replace/{player}/{from}/{to}", get(routes::replace))
        .route("/healthz", get(routes::healthz))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!(addr, "memory-server listening");
    axum::serve(listener, app).await.unwrap();
}
