//! Display manager: central control service for a kiosk display.
//!
//! The service holds a single "current mode" chosen from a static table of
//! display modes. A display page polls the current mode and shows the
//! mode's URL in an iframe; a control page lets any device on the network
//! switch modes.
//!
//! ```text
//!   phone ── POST /api/mode ──▶ ┌──────────────┐ ◀── GET /api/state ── display
//!                               │  ModeState   │
//!                               │ (one-slot    │
//!                               │  register)   │
//!                               └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`modes`]: Mode table and the current-mode register
//! - [`views`]: HTML page rendering
//! - [`api`]: HTTP routes and handlers
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod modes;
pub mod utils;
pub mod views;

pub use config::Config;
pub use error::{Result, ServiceError};
