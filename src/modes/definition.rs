//! Display mode value type.

use serde::Serialize;

/// A named display configuration.
///
/// The id is the registry key; on the wire a mode is rendered as
/// `{"name": ..., "url": ...}` beneath its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeDefinition {
    /// Registry key (e.g., "infohub").
    #[serde(skip)]
    pub id: String,
    /// Human-readable name shown on the control page.
    pub name: String,
    /// Page the display should show while this mode is active.
    pub url: String,
}

impl ModeDefinition {
    /// Create a new mode definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }
}
