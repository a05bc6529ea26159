//! HTTP API: routing, authentication and request/response mapping for the
//! voucher export.

pub mod app;
pub mod context;
pub mod middleware;
