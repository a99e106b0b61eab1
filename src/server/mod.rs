// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Larissa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Larissa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The persistence HTTP surface: selection acknowledgement and CSV export,
//! plus opt-in append-only request logging.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};

use crate::format::{series_from_value, SelectionRecord};
use crate::store::DataFolder;

#[derive(Debug, Clone)]
pub struct ServerContext {
    folder: DataFolder,
    logging: bool,
}

impl ServerContext {
    pub fn new(folder: DataFolder, logging: bool) -> Self {
        Self { folder, logging }
    }

    pub fn folder(&self) -> &DataFolder {
        &self.folder
    }

    pub fn logging(&self) -> bool {
        self.logging
    }
}

/// Builds the API router. The request-log middleware is attached only when
/// logging was requested on the command line.
pub fn router(context: ServerContext) -> Router {
    let logging = context.logging;
    let router = Router::new()
        .route("/api/save-selection", post(save_selection))
        .route("/api/save-data", post(save_data));

    let router = if logging {
        router.layer(middleware::from_fn_with_state(context.clone(), log_request))
    } else {
        router
    };

    router.with_state(context)
}

fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn failure(message: impl Into<String>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "success": false, "message": message.into() }))
}

/// Accepts the finalized selection. The payload must be a sequence of
/// records; persistence here is the acknowledgement plus, when logging is
/// enabled, an append to the log file (values survive the round trip via
/// the response contract, not a data file).
async fn save_selection(
    State(context): State<ServerContext>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if let Err(error) = series_from_value(&payload) {
        return (StatusCode::BAD_REQUEST, failure(error.to_string()));
    }

    if context.logging {
        let line = format!("{} - Selection saved: {payload}", iso_now());
        if let Err(error) = context.folder.append_log_line(&line) {
            eprintln!("larissa: failed to log selection: {error}");
        }
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true, "message": "Selection saved" })),
    )
}

/// Persists a full generated series as a timestamped CSV file.
async fn save_data(
    State(context): State<ServerContext>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let series = match series_from_value(&payload) {
        Ok(series) => series,
        Err(error) => return (StatusCode::BAD_REQUEST, failure(error.to_string())),
    };

    let records = series.points().iter().map(SelectionRecord::from_point).collect::<Vec<_>>();
    match context.folder.save_series_csv(&records) {
        Ok(saved) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "filename": saved.filename,
                "path": saved.path.display().to_string(),
            })),
        ),
        Err(error) => (StatusCode::INTERNAL_SERVER_ERROR, failure(error.to_string())),
    }
}

/// `timestamp method url status response-time ms`, appended per request.
async fn log_request(
    State(context): State<ServerContext>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let line = format!(
        "{} {method} {uri} {} {elapsed_ms:.3} ms",
        iso_now(),
        response.status().as_u16(),
    );
    if let Err(error) = context.folder.append_log_line(&line) {
        eprintln!("larissa: failed to log request: {error}");
    }

    response
}
