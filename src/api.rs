use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::ToSocketAddrs;

use crate::proc::Enumerator;
use crate::snapshot::SnapshotBuilder;
use crate::system;

/// Shared read-only configuration for the reporting endpoints.
///
/// Holds no scan state: every request runs its own scan with its own
/// aggregation table, so concurrent reads never interfere.
#[derive(Debug, Clone)]
pub struct ReportState {
    enumerator: Enumerator,
    builder: SnapshotBuilder,
}

impl ReportState {
    pub fn new(enumerator: Enumerator, builder: SnapshotBuilder) -> Self {
        Self {
            enumerator,
            builder,
        }
    }
}

async fn container_snapshot(State(state): State<ReportState>) -> Response {
    let result = tokio::task::spawn_blocking(move || {
        let samples = state.enumerator.samples()?;
        Ok::<_, crate::proc::Error>(state.builder.snapshot(samples))
    })
    .await
    .expect("spawn_blocking panicked");

    match result {
        Ok(doc) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            doc,
        )
            .into_response(),
        Err(err) => {
            log::error!("Failed to scan process table: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to build container snapshot",
            )
                .into_response()
        }
    }
}

async fn system_report(State(state): State<ReportState>) -> Response {
    let result = tokio::task::spawn_blocking(move || system::collect(&state.enumerator))
        .await
        .expect("spawn_blocking panicked");

    match result {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => {
            log::error!("Failed to collect system report: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to collect system report",
            )
                .into_response()
        }
    }
}

pub struct APIServer {
    router: axum::Router,
}

impl APIServer {
    pub async fn new(state: ReportState) -> Self {
        let router = axum::Router::new()
            .route("/containers", get(container_snapshot))
            .route("/system", get(system_report))
            .with_state(state);
        Self { router }
    }

    pub async fn listen(self, addr: impl ToSocketAddrs) {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .expect("TCP Listener bind");
        axum::serve(listener, self.router.into_make_service())
            .await
            .unwrap()
    }
}
