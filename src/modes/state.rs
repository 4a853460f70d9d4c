//! The current-mode register and the operations on it.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::error::{ModeError, RegistryError};
use crate::metrics;

use super::registry::ModeRegistry;

/// Current mode and the URL the display should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeSnapshot {
    /// Active mode id.
    pub mode: String,
    /// Target URL of the active mode.
    pub url: String,
}

/// Result of a successful mode change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeChange {
    /// Always "success".
    pub status: &'static str,
    /// Mode that is now active.
    pub new_mode: String,
    /// Target URL of the new mode.
    pub url: String,
}

/// Owned register holding the active mode.
///
/// Invariant: the held id is always a key of the registry. Writes go
/// through [`ModeState::set_mode`], which validates before taking the
/// write lock; concurrent writers are serialized and the last one wins.
#[derive(Debug)]
pub struct ModeState {
    registry: Arc<ModeRegistry>,
    current: RwLock<String>,
}

impl ModeState {
    /// Create the register, starting at `default_mode`.
    pub fn new(registry: Arc<ModeRegistry>, default_mode: &str) -> Result<Self, RegistryError> {
        if !registry.contains(default_mode) {
            return Err(RegistryError::UnknownDefault(default_mode.to_string()));
        }

        Ok(Self {
            registry,
            current: RwLock::new(default_mode.to_string()),
        })
    }

    /// The immutable mode table.
    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    /// Id of the active mode.
    pub fn current_mode(&self) -> Result<String, ModeError> {
        let current = self.current.read().map_err(|e| ModeError::Internal(e.to_string()))?;
        Ok(current.clone())
    }

    /// Active mode and its URL, read as one consistent pair.
    pub fn snapshot(&self) -> Result<ModeSnapshot, ModeError> {
        let current = self.current.read().map_err(|e| ModeError::Internal(e.to_string()))?;
        let url = self.url_of(&current)?;

        Ok(ModeSnapshot {
            mode: current.clone(),
            url,
        })
    }

    /// Replace the active mode.
    ///
    /// Unknown ids leave the register untouched.
    #[instrument(skip(self))]
    pub fn set_mode(&self, requested: &str) -> Result<ModeChange, ModeError> {
        let Some(mode) = self.registry.get(requested) else {
            warn!("Rejected unknown mode {:?}", requested);
            return Err(ModeError::Unknown(requested.to_string()));
        };

        let previous = {
            let mut current = self
                .current
                .write()
                .map_err(|e| ModeError::Internal(e.to_string()))?;
            std::mem::replace(&mut *current, mode.id.clone())
        };

        if previous != mode.id {
            info!("Display mode changed: {} -> {}", previous, mode.id);
        } else {
            info!("Display mode reasserted: {}", mode.id);
        }
        metrics::inc_mode_changes(&mode.id);

        Ok(ModeChange {
            status: "success",
            new_mode: mode.id.clone(),
            url: mode.url.clone(),
        })
    }

    fn url_of(&self, id: &str) -> Result<String, ModeError> {
        self.registry
            .get(id)
            .map(|m| m.url.clone())
            .ok_or_else(|| ModeError::Internal(format!("current mode {id:?} is not registered")))
    }
}
