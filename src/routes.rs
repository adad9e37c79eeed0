use axum::{
    Router,
    body::Body,
    http::{HeaderName, Request},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info_span;

use crate::{
    app_state::AppState,
    health::health_check,
    voucher::handlers::{
        parse_voucher_handler, parse_voucher_preflight, sample_handler, sample_preflight,
    },
};

const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn router(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/test_handler", get(sample_handler).options(sample_preflight))
        .route(
            "/parse_voucher_handler",
            post(parse_voucher_handler).options(parse_voucher_preflight),
        )
        .route("/healthz", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        let request_id = request
                            .headers()
                            .get(REQUEST_ID_HEADER)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or("-");
                        info_span!(
                            "http_request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id,
                        )
                    }),
                )
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .with_state(state)
}
