//! Error types for map2sql

use crate::builder::StatementKind;
use thiserror::Error;

/// Result type alias for map2sql operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error types for statement generation
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Schema source could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Table name is not declared in the schema
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// Schema expects an embedded object where the document holds something else
    #[error("Type mismatch at '{path}': expected an object, found {found}")]
    SchemaTypeMismatch { path: String, found: &'static str },

    /// Document does not carry the query key used for the WHERE clause
    #[error("Missing query key in document: {0}")]
    MissingQueryKey(String),

    /// Query key has no usable field mapping in the schema
    #[error("Unknown query key: {0}")]
    UnknownQueryKey(String),

    /// Query value cannot be rendered as a SQL literal
    #[error("Unsupported value type for query key: {0}")]
    UnsupportedQueryValue(String),

    /// Statement would carry no fields
    #[error("Nothing to {0}")]
    EmptyStatement(StatementKind),

    /// UPDATE/DELETE without an identifying predicate
    #[error("{0} requires a WHERE clause")]
    MissingWhere(StatementKind),
}

impl ConvertError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a type mismatch error for a dotted path
    pub fn type_mismatch(path: impl Into<String>, found: &'static str) -> Self {
        Self::SchemaTypeMismatch {
            path: path.into(),
            found,
        }
    }

    /// Check if this is an unknown table error
    pub fn is_unknown_table(&self) -> bool {
        matches!(self, Self::UnknownTable(_))
    }

    /// Check if this is an empty statement error
    pub fn is_empty_statement(&self) -> bool {
        matches!(self, Self::EmptyStatement(_))
    }

    /// Check if this is a schema/document type mismatch
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::SchemaTypeMismatch { .. })
    }
}
