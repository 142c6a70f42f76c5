//! HTTP route handlers: the transport boundary between the wire protocol and
//! the kernel's own async API.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::{KernelError, WATCH_DEFAULT_TIMEOUT};
use serde::Deserialize;

use crate::app_state::AppState;

pub async fn look(State(state): State<Arc<AppState>>, Path(player): Path<String>) -> String {
    tracing::debug!(player, "look");
    state.kernel.look(&player).await.render()
}

pub async fn flip(
    State(state): State<Arc<AppState>>,
    Path((player, row_col)): Path<(String, String)>,
) -> Response {
    let Some((row, col)) = parse_coord(&row_col) else {
        tracing::warn!(player, row_col, "malformed flip coordinate");
        return (StatusCode::CONFLICT, "cannot flip this card: bad coordinate".to_string())
            .into_response();
    };

    match state.kernel.flip(&player, row, col).await {
        Ok(board) => {
            tracing::debug!(player, row, col, "flip applied");
            board.render().into_response()
        }
        Err(err) => {
            tracing::warn!(player, row, col, %err, "flip failed");
            rule_failure_response(err)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WatchParams {
    timeout_secs: Option<u64>,
}

pub async fn watch(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
    Query(params): Query<WatchParams>,
) -> String {
    let timeout = params
        .timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(WATCH_DEFAULT_TIMEOUT);
    tracing::debug!(player, ?timeout, "watch");
    state.kernel.watch(&player, timeout).await.render()
}

pub async fn replace(
    State(state): State<Arc<AppState>>,
    Path((player, from, to)): Path<(String, String, String)>,
) -> String {
    tracing::debug!(player, from, to, "replace");
    let board = state
        .kernel
        .map(&player, |label| {
            let from = from.clone();
            let to = to.clone();
            async move { if label == from { to } else { label } }
        })
        .await;
    board.render()
}

pub async fn healthz() -> &'static str {
    "ok"
}

fn parse_coord(raw: &str) -> Option<(usize, usize)> {
    let (row, col) = raw.split_once(',')?;
    Some((row.parse().ok()?, col.parse().ok()?))
}

fn rule_failure_response(err: KernelError) -> Response {
    // All rule failures, `bad-coord` included, render as 409 per spec.md §7's
    // propagation policy.
    (StatusCode::CONFLICT, format!("cannot flip this card: {err}")).into_response()
}
