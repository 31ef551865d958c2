//! Search engine module
//!
//! Defines the Engine trait and provides a registry for the supported providers.

mod loader;
mod registry;
mod traits;

// Engine implementations
pub mod google;
pub mod wikipedia;

pub use loader::EngineLoader;
pub use registry::{normalize_identifier, EngineRegistry};
pub use traits::*;
