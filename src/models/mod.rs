pub mod models;

pub use models::AppState;
