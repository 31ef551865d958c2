//! Search orchestration
//!
//! Resolves the requested sources, queries each provider concurrently under
//! its own timeout, and merges the answers in request order.

mod executor;
mod models;

pub use executor::Search;
pub use models::*;
