//! Web server module
//!
//! Exposes the aggregator over HTTP: an HTML form, a JSON search API and a
//! listing of the configured engines.

mod handlers;
mod routes;
mod state;

pub use handlers::ApiError;
pub use routes::create_router;
pub use state::AppState;
