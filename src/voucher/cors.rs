use axum::{
    http::{
        HeaderName, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
        },
    },
    response::{IntoResponse, Response},
};

/// Header every response carries.
pub const ALLOW_ANY_ORIGIN: (HeaderName, &str) = (ACCESS_CONTROL_ALLOW_ORIGIN, "*");

const ALLOWED_HEADERS: &str = "Authorization, Content-Type";
const MAX_AGE_SECS: &str = "3600";

/// 204 answer to a CORS preflight for an endpoint accepting `method`.
pub fn preflight(method: &'static str) -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            ALLOW_ANY_ORIGIN,
            (ACCESS_CONTROL_ALLOW_METHODS, method),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (ACCESS_CONTROL_MAX_AGE, MAX_AGE_SECS),
        ],
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflight_advertises_method() {
        let response = preflight("POST");

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let headers = response.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "POST");
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_HEADERS],
            "Authorization, Content-Type"
        );
        assert_eq!(headers[ACCESS_CONTROL_MAX_AGE], "3600");
    }
}
