// Library entry point for Vidhyarthi Seva.
// Exposes modules for integration tests; main.rs is the binary entry point.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod schema;
pub mod services;
pub mod utility;

pub use error::ApiError;
pub use models::AppState;
