//! Avro schema adapter.
//!
//! Parses Avro schema text and converts the parsed schema into the record
//! model. Conversion walks the schema tree, mapping each node to a
//! [`DataType`] and failing with a typed [`ConversionError`] on constructs
//! the record model cannot express.
//!
//! Named types (records, enums, fixed) defined earlier in the same document
//! resolve when referenced again. Recursive references are rejected: the
//! record model is an owned tree and cannot hold a cycle.

use apache_avro::schema::{Name, Schema, UnionSchema};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::record::{DataType, RecordField, RecordSchema};

/// Malformed Avro schema text.
#[derive(Debug, Error)]
#[error("malformed Avro schema: {0}")]
pub struct AvroParseError(#[from] pub apache_avro::Error);

/// The schema parsed, but cannot be adapted to the record model.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Only record schemas can be adapted at the top level.
    #[error("top-level Avro schema must be a record")]
    NotARecord,

    /// A construct the record model has no counterpart for.
    #[error("unsupported Avro construct: {construct}")]
    Unsupported { construct: String },

    /// A named-type reference with no definition in the document.
    #[error("unresolved named type reference: {name}")]
    UnresolvedReference { name: String },

    /// A named type referring to itself, directly or through its fields.
    #[error("recursive schema reference: {name}")]
    RecursiveReference { name: String },
}

/// Parse Avro schema text.
pub fn parse_schema(text: &str) -> Result<Schema, AvroParseError> {
    Schema::parse_str(text).map_err(AvroParseError)
}

/// Convert a parsed Avro schema into a [`RecordSchema`].
///
/// The top-level schema must be a record.
pub fn record_schema_from_avro(schema: &Schema) -> Result<RecordSchema, ConversionError> {
    let mut converter = Converter::default();
    match schema {
        Schema::Record(record) => converter.convert_record(record),
        _ => Err(ConversionError::NotARecord),
    }
}

#[derive(Default)]
struct Converter {
    /// Completed named types, by fullname.
    named: HashMap<String, DataType>,
    /// Record names currently being converted; a reference to one is a cycle.
    in_progress: HashSet<String>,
}

impl Converter {
    fn convert_record(
        &mut self,
        record: &apache_avro::schema::RecordSchema,
    ) -> Result<RecordSchema, ConversionError> {
        let full = fullname(&record.name);
        self.in_progress.insert(full.clone());

        let mut fields = Vec::with_capacity(record.fields.len());
        for field in &record.fields {
            fields.push(self.convert_field(field)?);
        }

        self.in_progress.remove(&full);
        let converted = RecordSchema::new(Some(full.clone()), fields);
        self.named
            .insert(full, DataType::Record(Box::new(converted.clone())));
        Ok(converted)
    }

    fn convert_field(
        &mut self,
        field: &apache_avro::schema::RecordField,
    ) -> Result<RecordField, ConversionError> {
        let (data_type, nullable) = match &field.schema {
            Schema::Union(union) => self.convert_union(union)?,
            other => (self.convert(other)?, false),
        };

        let mut converted = RecordField::new(&field.name, data_type);
        if nullable {
            converted = converted.nullable();
        }
        if let Some(default) = &field.default {
            converted = converted.with_default(default.clone());
        }
        if let Some(aliases) = &field.aliases {
            converted = converted.with_aliases(aliases.clone());
        }
        Ok(converted)
    }

    /// Convert a union, separating nullability from the payload type.
    ///
    /// `["null", T]` is a nullable `T`; a union with two or more non-null
    /// branches is a [`DataType::Choice`].
    fn convert_union(
        &mut self,
        union: &UnionSchema,
    ) -> Result<(DataType, bool), ConversionError> {
        let nullable = union
            .variants()
            .iter()
            .any(|variant| matches!(variant, Schema::Null));
        let non_null: Vec<&Schema> = union
            .variants()
            .iter()
            .filter(|variant| !matches!(variant, Schema::Null))
            .collect();

        match non_null.len() {
            0 => Err(ConversionError::Unsupported {
                construct: "union of only null".to_string(),
            }),
            1 => Ok((self.convert(non_null[0])?, nullable)),
            _ => {
                let branches = non_null
                    .into_iter()
                    .map(|variant| self.convert(variant))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((DataType::Choice(branches), nullable))
            }
        }
    }

    fn convert(&mut self, schema: &Schema) -> Result<DataType, ConversionError> {
        match schema {
            Schema::Boolean => Ok(DataType::Boolean),
            Schema::Int => Ok(DataType::Int),
            Schema::Long => Ok(DataType::Long),
            Schema::Float => Ok(DataType::Float),
            Schema::Double => Ok(DataType::Double),
            Schema::Bytes => Ok(DataType::Bytes),
            Schema::String | Schema::Uuid => Ok(DataType::String),

            Schema::Date => Ok(DataType::Date),
            Schema::TimeMillis | Schema::TimeMicros => Ok(DataType::TimeMillis),
            Schema::TimestampMillis
            | Schema::TimestampMicros
            | Schema::LocalTimestampMillis
            | Schema::LocalTimestampMicros => Ok(DataType::TimestampMillis),

            Schema::Decimal(decimal) => Ok(DataType::Decimal {
                precision: decimal.precision,
                scale: decimal.scale,
            }),

            Schema::Fixed(fixed) => {
                let data_type = DataType::Fixed { size: fixed.size };
                self.named.insert(fullname(&fixed.name), data_type.clone());
                Ok(data_type)
            }

            Schema::Enum(inner) => {
                let data_type = DataType::Enum {
                    name: inner.name.name.clone(),
                    symbols: inner.symbols.clone(),
                };
                self.named.insert(fullname(&inner.name), data_type.clone());
                Ok(data_type)
            }

            Schema::Array(array) => Ok(DataType::Array(Box::new(self.convert(&array.items)?))),
            Schema::Map(map) => Ok(DataType::Map(Box::new(self.convert(&map.types)?))),

            Schema::Union(union) => {
                // Nullability is only meaningful at field level; elsewhere the
                // payload type stands alone.
                self.convert_union(union).map(|(data_type, _)| data_type)
            }

            Schema::Record(record) => Ok(DataType::Record(Box::new(self.convert_record(record)?))),

            Schema::Ref { name } => {
                let full = fullname(name);
                if let Some(data_type) = self.named.get(&full) {
                    Ok(data_type.clone())
                } else if self.in_progress.contains(&full) {
                    Err(ConversionError::RecursiveReference { name: full })
                } else {
                    Err(ConversionError::UnresolvedReference { name: full })
                }
            }

            Schema::Null => Err(ConversionError::Unsupported {
                construct: "null outside a union".to_string(),
            }),
            Schema::Duration => Err(ConversionError::Unsupported {
                construct: "duration".to_string(),
            }),

            _ => Err(ConversionError::Unsupported {
                construct: "unrecognized schema form".to_string(),
            }),
        }
    }
}

fn fullname(name: &Name) -> String {
    match &name.namespace {
        Some(namespace) if !namespace.is_empty() => format!("{}.{}", namespace, name.name),
        _ => name.name.clone(),
    }
}
