#![forbid(unsafe_code)]

//! `after8-deals` — late-night food deals served from an in-memory store.

pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod store;

pub use config::GlobalConfig;
pub use errors::{AppError, Result};
