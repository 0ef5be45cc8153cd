//! Registry error taxonomy.
//!
//! Every failure surfaces to the caller unmodified — the registry performs
//! no local recovery and no retries. Transport errors pass through from the
//! search client as-is.

use avroreg_core::{AvroParseError, ConversionError};
use avroreg_search_client::ClientError;
use thiserror::Error;

/// Errors raised while resolving a schema.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The lookup did not produce exactly one hit.
    ///
    /// Zero hits means no such schema; more than one means the match was
    /// ambiguous. Both must fail rather than silently resolve.
    #[error("schema not found for '{name}'; hit count was {hit_count}")]
    SchemaNotFound {
        name: String,
        version: Option<i32>,
        hit_count: usize,
    },

    /// The sole hit's document has no textual `text` field.
    #[error("stored document for schema '{name}' is missing a textual 'text' field")]
    MissingSchemaText { name: String },

    /// The stored schema text is not valid Avro.
    #[error(transparent)]
    SchemaParse(#[from] AvroParseError),

    /// The search client failed; propagated unchanged.
    #[error(transparent)]
    Transport(#[from] ClientError),

    /// The schema parsed but cannot be adapted to the record model.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
