//! Core schema model for the avroreg schema registry.
//!
//! This crate holds the pieces the registry resolves *into*:
//!
//! - [`SchemaIdentifier`]: the name + optional version key a lookup starts from
//! - [`RecordSchema`] / [`RecordField`] / [`DataType`]: the in-process record
//!   model handed to consumers
//! - [`avro`]: parsing Avro schema text and converting it into the record
//!   model, with typed errors for constructs the model cannot express
//!
//! The record model is an owned tree: nested records are embedded, not
//! shared. Named-type references within a single schema document resolve
//! during conversion; recursive references are rejected.

pub mod avro;
mod identifier;
mod record;

pub use avro::{AvroParseError, ConversionError};
pub use identifier::SchemaIdentifier;
pub use record::{DataType, RecordField, RecordSchema, SchemaField, TEXT_FORMAT_AVRO};
