//! HTTP networking module
//!
//! Provides the HTTP client used to reach search providers.

mod client;

pub use client::HttpClient;
