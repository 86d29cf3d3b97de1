//! Rulesheet API Server module
//!
//! Upload form, JSON API and download endpoint.
//! Run with `rulesheet-server`.

pub mod handlers;
pub mod pages;
pub mod server;

pub use server::{build_router, run_api_server};
