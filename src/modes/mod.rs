//! Display modes and the active-mode register.
//!
//! This module handles:
//! - Mode definitions
//! - The static, validated mode table
//! - The current-mode register and mode changes

pub mod definition;
pub mod registry;
pub mod state;

pub use definition::ModeDefinition;
pub use registry::{ModeRegistry, DEFAULT_MODE};
pub use state::{ModeChange, ModeSnapshot, ModeState};
