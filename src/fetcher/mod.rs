pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{FETCH_TIMEOUT, build_client, fetch, fetch_html, fetch_html_with, fetch_with};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};
