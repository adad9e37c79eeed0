use crate::fetcher::types::{Charset, PageResponse};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::{StatusCode, header::HeaderMap};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

/// How far into the body we look for `<meta>` charset hints.
const SNIFF_WINDOW: usize = 4096;

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    headers: HeaderMap,
    body_bytes: Bytes,
    content_type: &str,
) -> PageResponse {
    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, &charset);

    PageResponse {
        url_final,
        status,
        headers,
        body_raw: body_bytes,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    }
}

fn encoding_from_captures(captures: Option<regex::Captures<'_>>) -> Option<&'static Encoding> {
    let label = captures?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

pub(crate) fn detect_charset(content_type: &str, body_bytes: &[u8]) -> Charset {
    // 1. Content-Type header
    if let Some(encoding) = encoding_from_captures(CHARSET_REGEX.captures(content_type)) {
        return Charset::from_encoding(encoding);
    }

    // 2. <meta charset> / <meta http-equiv> near the top of the document
    let search_bytes = &body_bytes[..body_bytes.len().min(SNIFF_WINDOW)];
    let search_str = String::from_utf8_lossy(search_bytes);

    if let Some(encoding) = encoding_from_captures(META_CHARSET_REGEX.captures(&search_str)) {
        return Charset::from_encoding(encoding);
    }
    if let Some(encoding) = encoding_from_captures(META_HTTP_EQUIV_REGEX.captures(&search_str)) {
        return Charset::from_encoding(encoding);
    }

    // 3. Heuristic detection
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, body_bytes.len() <= SNIFF_WINDOW);
    let detected = detector.guess(None, true);

    Charset::from_encoding(detected)
}

/// Decode into UTF-8. Malformed sequences become U+FFFD instead of failing,
/// a partially garbled page still carries usable fragments.
pub(crate) fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> String {
    let encoding = charset.encoding();
    let (decoded, used, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        debug!(encoding = used.name(), "body contained malformed sequences");
    }

    decoded.into_owned()
}
