// SPDX-FileCopyrightText: 2026 Shelf Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Handles GET /fileserver/{file_name} and GET /health.

use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shelf_core::ContractKind;
use shelf_dispatch::{DispatchError, DispatchResponse};
use tokio_util::io::ReaderStream;

use crate::server::AppState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_secs: u64,
    /// Registered file sources.
    pub file_sources: usize,
    /// Registered transformers.
    pub transformers: usize,
}

/// GET /fileserver/{file_name}
///
/// Streams the file with its content type, or answers 400/404 with a JSON error.
pub async fn get_file(State(state): State<AppState>, Path(file_name): Path<String>) -> Response {
    serve(&state, &file_name).await
}

/// GET /fileserver/ with no name.
pub async fn get_blank_file(State(state): State<AppState>) -> Response {
    serve(&state, "").await
}

async fn serve(state: &AppState, file_name: &str) -> Response {
    match state.dispatcher.dispatch(file_name).await {
        Ok(response) => stream_file(response),
        Err(e) => error_response(&e),
    }
}

fn stream_file(response: DispatchResponse) -> Response {
    let DispatchResponse {
        content_type, file, ..
    } = response;
    match file.into_stream() {
        Ok(stream) => {
            let body = Body::from_stream(ReaderStream::new(stream));
            ([(header::CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "dispatched file has no stream");
            internal_error()
        }
    }
}

/// Map a dispatch failure to its status code and JSON body.
pub fn error_response(err: &DispatchError) -> Response {
    let status = match err {
        DispatchError::BadRequest | DispatchError::Untyped { .. } => StatusCode::BAD_REQUEST,
        DispatchError::NotFound { .. } => StatusCode::NOT_FOUND,
        DispatchError::Internal(_) => return internal_error(),
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: "internal server error".to_string(),
        }),
    )
        .into_response()
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let registry = state.dispatcher.registry();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        file_sources: registry.count(ContractKind::FileSource),
        transformers: registry.count(ContractKind::Transformer),
    })
}
