//! Schema configuration: builds a `SchemaRegistry` from a TOML document.
//!
//! ```toml
//! [[attribute]]
//! name = "cust"
//! type = "text"
//! ```
//!
//! Slots follow declaration order.

use mfq_core::{
    error::CompileError,
    schema::{AttributeType, SchemaRegistry},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[remain::sorted]
#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("read schema config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid schema: {0}")]
    Schema(#[from] CompileError),

    #[error("parse schema config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("attribute '{name}' has unknown type '{ty}'")]
    UnknownType { name: String, ty: String },
}

///
/// SchemaConfig
///
/// Raw schema document. Attribute types stay as text until `into_registry`
/// so an unknown type is reported against its attribute.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    #[serde(default)]
    pub attribute: Vec<AttributeConfig>,
}

///
/// AttributeConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AttributeConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,
}

impl SchemaConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&text)
    }

    /// Resolve type names and build the registry.
    pub fn into_registry(self) -> Result<SchemaRegistry, ConfigError> {
        let attributes = self
            .attribute
            .into_iter()
            .map(|AttributeConfig { name, ty }| match ty.parse::<AttributeType>() {
                Ok(parsed) => Ok((name, parsed)),
                Err(_) => Err(ConfigError::UnknownType { name, ty }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let schema = SchemaRegistry::new(attributes)?;
        tracing::debug!(attributes = schema.len(), "schema registry loaded");

        Ok(schema)
    }
}

/// Parse a TOML schema document into a registry.
pub fn load_schema(text: &str) -> Result<SchemaRegistry, ConfigError> {
    SchemaConfig::from_toml(text)?.into_registry()
}

/// Read and parse a TOML schema file.
pub fn load_schema_file(path: impl AsRef<Path>) -> Result<SchemaRegistry, ConfigError> {
    SchemaConfig::load_from_file(path.as_ref())?.into_registry()
}

///
/// TESTS
///
