//! In-process record schema model.
//!
//! This is the representation the registry hands to consumers after
//! resolution: a named, ordered list of typed fields. It deliberately stays
//! an owned tree — nested records are embedded values, not shared handles.

use crate::identifier::SchemaIdentifier;
use serde_json::Value;

/// Text format label for Avro schema text.
pub const TEXT_FORMAT_AVRO: &str = "avro";

/// Pieces of schema information a registry can supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaField {
    /// The logical schema name.
    SchemaName,
    /// The raw schema text as stored.
    SchemaText,
    /// The format of the schema text (e.g., `"avro"`).
    SchemaTextFormat,
}

/// The type of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Boolean,
    Int,
    Long,
    Float,
    Double,
    String,
    Bytes,
    /// Fixed-length byte sequence.
    Fixed { size: usize },
    /// Arbitrary-precision decimal with fixed precision and scale.
    Decimal { precision: usize, scale: usize },
    /// Calendar date without a time component.
    Date,
    /// Time of day, millisecond precision.
    TimeMillis,
    /// Instant, millisecond precision.
    TimestampMillis,
    /// One of a fixed set of symbols.
    Enum { name: String, symbols: Vec<String> },
    /// Homogeneous list of the element type.
    Array(Box<DataType>),
    /// String-keyed map of the value type.
    Map(Box<DataType>),
    /// Nested record.
    Record(Box<RecordSchema>),
    /// One of several possible types.
    Choice(Vec<DataType>),
}

/// A single field of a record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    /// Field name.
    pub name: String,
    /// Field type.
    pub data_type: DataType,
    /// Whether the field may be null.
    pub nullable: bool,
    /// Default value, if the schema declares one.
    pub default: Option<Value>,
    /// Alternate names for the field.
    pub aliases: Vec<String>,
}

impl RecordField {
    /// Create a non-nullable field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
            default: None,
            aliases: Vec::new(),
        }
    }

    /// Mark the field nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set the field aliases.
    pub fn with_aliases(mut self, aliases: Vec<String>) -> Self {
        self.aliases = aliases;
        self
    }
}

/// A resolved record schema.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// Fully qualified record name, when the source declares one.
    pub name: Option<String>,
    /// Ordered fields.
    pub fields: Vec<RecordField>,
    /// Raw schema text as stored, when resolved from a registry.
    pub text: Option<String>,
    /// Format of `text` (e.g., [`TEXT_FORMAT_AVRO`]).
    pub text_format: Option<String>,
    /// Identifier the schema was resolved under.
    pub identifier: Option<SchemaIdentifier>,
}

impl RecordSchema {
    /// Create a schema from a name and fields.
    pub fn new(name: Option<String>, fields: Vec<RecordField>) -> Self {
        Self {
            name,
            fields,
            text: None,
            text_format: None,
            identifier: None,
        }
    }

    /// Attach the raw schema text and its format.
    pub fn with_text(mut self, text: impl Into<String>, format: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self.text_format = Some(format.into());
        self
    }

    /// Attach the identifier the schema was resolved under.
    pub fn with_identifier(mut self, identifier: SchemaIdentifier) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// Look up a field by name or alias.
    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.fields
            .iter()
            .find(|f| f.name == name || f.aliases.iter().any(|a| a == name))
    }

    /// Names of all fields, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
