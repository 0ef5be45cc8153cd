//! Schema identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a stored schema by name and optional version.
///
/// With no version, a lookup resolves the highest stored version of the
/// name. With a version, the lookup pins that exact version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaIdentifier {
    /// Logical schema name.
    pub name: String,

    /// Exact version to resolve, if pinned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl SchemaIdentifier {
    /// Identify the latest version of `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// Identify an exact version of `name`.
    pub fn versioned(name: impl Into<String>, version: i32) -> Self {
        Self {
            name: name.into(),
            version: Some(version),
        }
    }

    /// Pin the identifier to a version.
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }
}

impl fmt::Display for SchemaIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version {
            Some(version) => write!(f, "{}@{}", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}
