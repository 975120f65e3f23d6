//! Stable element descriptors
//!
//! A descriptor is produced by the external DOM-to-selector resolver and is
//! opaque to this crate: we only require that it re-locates the same logical
//! element later, compares for equality, and round-trips through JSON without
//! loss. Two captures of the same logical element may reference different
//! concrete DOM nodes but yield equal descriptors.

use serde::{Deserialize, Serialize};

/// Opaque, serializable reference to a DOM element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementDescriptor(serde_json::Value);

impl ElementDescriptor {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }
}

impl From<serde_json::Value> for ElementDescriptor {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}
