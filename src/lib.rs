#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod alert;
pub mod config;
pub mod error;
pub mod format;
pub mod gchat;
pub mod metrics;
pub mod relay;
pub mod server;
pub mod telemetry;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
