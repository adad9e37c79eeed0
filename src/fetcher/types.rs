use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::{StatusCode, header::HeaderMap};
use serde::{Deserialize, Serialize};
use url::Url;

/// Character set a page was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Charset {
    Utf8,
    EucKr,
    Windows1252,
    /// Any other WHATWG encoding, by its canonical name.
    Other(String),
}

impl Charset {
    pub fn from_encoding(encoding: &'static encoding_rs::Encoding) -> Self {
        use std::ptr;

        if ptr::eq(encoding, encoding_rs::UTF_8) {
            Self::Utf8
        } else if ptr::eq(encoding, encoding_rs::EUC_KR) {
            Self::EucKr
        } else if ptr::eq(encoding, encoding_rs::WINDOWS_1252) {
            Self::Windows1252
        } else {
            Self::Other(encoding.name().to_string())
        }
    }

    pub fn encoding(&self) -> &'static encoding_rs::Encoding {
        match self {
            Self::Utf8 => encoding_rs::UTF_8,
            Self::EucKr => encoding_rs::EUC_KR,
            Self::Windows1252 => encoding_rs::WINDOWS_1252,
            Self::Other(name) => {
                encoding_rs::Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8)
            }
        }
    }
}

#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body_raw: Bytes,
    pub body_utf8: String,
    pub charset: Charset,
    pub fetched_at: DateTime<Utc>,
}
