use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Total budget for one page fetch, connect included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_BODY_SIZE: u64 = 10 * 1024 * 1024; // 10MB
const USER_AGENT: &str = "Mozilla/5.0 (compatible; VoucherParser/0.1)";

static HTTP_CLIENT: Lazy<Client> =
    Lazy::new(|| build_client(FETCH_TIMEOUT).expect("Failed to build HTTP client"));

/// Page client with the fetcher's user agent, accept header and `timeout`.
pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                reqwest::header::HeaderValue::from_static(
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                ),
            );
            headers
        })
        .build()
        .map_err(|e| FetchError::Unknown(e.to_string()))
}

/// Single GET of `url` on the shared client, no retries. Non-2xx responses are errors.
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    fetch_with(&HTTP_CLIENT, url).await
}

#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_with(client: &Client, url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;
    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(FetchError::UnsupportedScheme(parsed_url.scheme().to_string()));
    }

    let response = client
        .get(parsed_url)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();
    let headers = response.headers().clone();

    if !status.is_success() {
        return Err(FetchError::Http { status });
    }

    let content_type = headers
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    let body_bytes = response
        .bytes()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Content-Length may be missing or wrong
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    let page = process_response(final_url, status, headers, body_bytes, &content_type);
    debug!(
        status = %page.status,
        charset = ?page.charset,
        bytes = page.body_raw.len(),
        fetched_at = %page.fetched_at,
        "fetched page"
    );
    Ok(page)
}

/// Fetch `url` and return its decoded HTML, or an empty string on any failure.
///
/// Callers cannot tell an unreachable page from an empty one; the failure is
/// only visible in the logs.
pub async fn fetch_html(url: &str) -> String {
    fetch_html_with(&HTTP_CLIENT, url).await
}

pub async fn fetch_html_with(client: &Client, url: &str) -> String {
    match fetch_with(client, url).await {
        Ok(page) => page.body_utf8,
        Err(err) => {
            warn!(url = %url, error = %err, timeout = err.is_timeout(), "fetch failed, continuing with empty page");
            String::new()
        }
    }
}
