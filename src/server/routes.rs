use axum::extract::{RawQuery, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::AppState;
use crate::clock::HourFormat;
use crate::commands::{self, Command, QueryParams};
use crate::errors::CommandError;

/// Routes without middleware. Methods other than GET and OPTIONS answer 501.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", with_preflight(get(health)))
        .route("/api/time", with_preflight(get(time)))
        .route("/api/list", with_preflight(get(list)))
        .fallback(fallback)
        .with_state(state)
}

fn with_preflight(
    route: axum::routing::MethodRouter<AppState>,
) -> axum::routing::MethodRouter<AppState> {
    route.options(preflight).fallback(not_implemented)
}

impl IntoResponse for CommandError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status()).unwrap_or(StatusCode::BAD_REQUEST);
        (status, Json(commands::error_body(&self))).into_response()
    }
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "status": "healthy" }))
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn time(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let query = QueryParams::parse(query.as_deref().unwrap_or(""));
    let tz = query.get("tz").unwrap_or("");
    let format = HourFormat::parse_lenient(query.get("format").unwrap_or("24"));
    let payload = state.clock.payload(tz, format);

    let evicted = state.history.lock().append(payload.history_record());
    if let Some(evicted) = evicted {
        tracing::debug!("time record evicted {}", evicted);
    }

    match serde_json::to_value(&payload) {
        Ok(body) => Json(body).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal Server Error", "detail": e.to_string() })),
        )
            .into_response(),
    }
}

async fn list(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let query = QueryParams::parse(query.as_deref().unwrap_or(""));
    let command = match Command::from_query(&query) {
        Ok(command) => command,
        Err(e) => return e.into_response(),
    };
    let name = command.name();
    let result = commands::execute(&mut state.history.lock(), command);
    match result {
        Ok(body) => Json(body).into_response(),
        Err(e) => {
            tracing::debug!("command {} failed: {}", name, e);
            e.into_response()
        }
    }
}

async fn fallback(method: Method, uri: Uri) -> Response {
    if method == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else if method == Method::GET || method == Method::HEAD {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Not Found", "path": uri.path() })),
        )
            .into_response()
    } else {
        not_implemented(method).await
    }
}

async fn not_implemented(method: Method) -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "error": "Not Implemented", "method": method.as_str() })),
    )
        .into_response()
}
