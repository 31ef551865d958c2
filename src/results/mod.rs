//! Result types, container and deduplication
//!
//! This module defines the record format every provider is normalized into,
//! and the merge step that turns per-provider lists into one result.

mod container;
mod dedup;
mod types;

pub use container::ResultContainer;
pub use dedup::dedupe;
pub use types::*;
