//! Wedding-invitation ("voucher") parser.
//!
//! Fetches an invitation page, flattens it into canonical text, and asks a
//! language model to fill in a fixed JSON shape (thumbnail, groom, bride,
//! datetime, location).

pub mod app_state;
pub mod completion;
pub mod config;
pub mod extractor;
pub mod fetcher;
pub mod health;
pub mod routes;
pub mod telemetry;
pub mod voucher;

pub use routes::router;
