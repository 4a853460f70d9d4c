//! Immutable table of configured display modes.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::RegistryError;

use super::definition::ModeDefinition;

/// Mode selected when nothing else is configured.
pub const DEFAULT_MODE: &str = "infohub";

/// Ordered, validated mapping from mode id to definition.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    modes: Vec<ModeDefinition>,
    index: HashMap<String, usize>,
}

impl ModeRegistry {
    /// Build a registry, rejecting empty tables, blank ids and duplicates.
    pub fn new(modes: Vec<ModeDefinition>) -> Result<Self, RegistryError> {
        if modes.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut index = HashMap::with_capacity(modes.len());
        for (position, mode) in modes.iter().enumerate() {
            if mode.id.trim().is_empty() {
                return Err(RegistryError::EmptyId);
            }
            if index.insert(mode.id.clone(), position).is_some() {
                return Err(RegistryError::DuplicateId(mode.id.clone()));
            }
        }

        Ok(Self { modes, index })
    }

    /// The modes the display manager ships with.
    pub fn builtin() -> Self {
        Self::new(vec![
            ModeDefinition::new("infohub", "InfoHub", "http://localhost:5000"),
            ModeDefinition::new("security", "Surveillance Mode", "http://localhost:8080"),
        ])
        .expect("built-in mode table is valid")
    }

    /// Look up a mode by id.
    pub fn get(&self, id: &str) -> Option<&ModeDefinition> {
        self.index.get(id).map(|&position| &self.modes[position])
    }

    /// Check whether `id` is a configured mode.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate modes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ModeDefinition> {
        self.modes.iter()
    }

    /// Mode ids in declaration order.
    pub fn ids(&self) -> Vec<&str> {
        self.modes.iter().map(|m| m.id.as_str()).collect()
    }

    /// Number of configured modes.
    pub fn len(&self) -> usize {
        self.modes.len()
    }

    /// Always false for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

impl Serialize for ModeRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.modes.len()))?;
        for mode in &self.modes {
            map.serialize_entry(&mode.id, mode)?;
        }
        map.end()
    }
}
