//! The invitation ("voucher") endpoints and the service behind them.

pub mod cors;
pub mod dtos;
pub mod handlers;
pub mod service;

pub use dtos::{ParseVoucherRequest, RequestError, WeddingInfo};
pub use service::VoucherService;
