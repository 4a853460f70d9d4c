//! HTTP surface: pages, the JSON mode API, health and metrics.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ApiResult};
pub use handlers::AppState;
pub use routes::create_router;
