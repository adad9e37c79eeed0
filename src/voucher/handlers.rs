use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    app_state::AppState,
    voucher::{
        cors::{ALLOW_ANY_ORIGIN, preflight},
        dtos::{ErrorResponse, ParseVoucherRequest, WeddingInfo},
    },
};

/// 200 whose body is `payload` encoded as a JSON string literal.
///
/// `payload` is itself JSON text, so clients decode twice.
fn json_string_response(payload: String) -> Response {
    (
        StatusCode::OK,
        [ALLOW_ANY_ORIGIN, (CONTENT_TYPE, "application/json")],
        Value::String(payload).to_string(),
    )
        .into_response()
}

fn error_response(status: StatusCode, error: String, note: Option<String>) -> Response {
    (
        status,
        [ALLOW_ANY_ORIGIN],
        Json(ErrorResponse { error, note }),
    )
        .into_response()
}

pub async fn sample_handler() -> Response {
    match serde_json::to_string_pretty(&WeddingInfo::sample()) {
        Ok(payload) => json_string_response(payload),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None),
    }
}

pub async fn sample_preflight() -> Response {
    preflight("GET")
}

pub async fn parse_voucher_preflight() -> Response {
    preflight("POST")
}

pub async fn parse_voucher_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = match ParseVoucherRequest::from_body(&body) {
        Ok(request) => request,
        Err(e) => {
            info!(error = %e, "rejected voucher request");
            return (StatusCode::BAD_REQUEST, [ALLOW_ANY_ORIGIN], e.to_string()).into_response();
        }
    };

    match state.voucher_service.parse(&request.link).await {
        Ok(answer) => json_string_response(answer),
        Err(e) => match e.raw_response() {
            Some(raw) => {
                warn!(error = %e, "completion response had no usable content");
                error_response(StatusCode::NOT_FOUND, e.to_string(), Some(raw.to_string()))
            }
            None => {
                error!(error = %e, "voucher parsing failed");
                let raw_body = String::from_utf8_lossy(&body);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{e}{raw_body}"),
                    None,
                )
            }
        },
    }
}
