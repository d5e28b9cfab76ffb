//! Google Chat delivery.

pub(crate) mod client;
pub(crate) mod params;

pub use client::{DEFAULT_BASE_URL, GChatClient};
pub use params::QueryParameters;
