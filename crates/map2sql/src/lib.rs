//! # map2sql
//!
//! Schema-driven conversion of semi-structured documents into SQL statement
//! text.
//!
//! A declarative [`Schema`] maps document field paths to table columns and
//! SQL types. A [`Converter`] walks the schema in lock-step with a
//! [`Document`] and renders `INSERT`, `UPDATE` or `DELETE` statements with
//! inline literals for the selected [`Dialect`].
//!
//! ```ignore
//! use map2sql::{Converter, DialectKind};
//!
//! let conv = Converter::open("model.js", DialectKind::Oracle)?;
//! let doc = map2sql::document_from_json(serde_json::json!({
//!     "name": "Diana",
//!     "birthday": "2018-02-01 12:34:56",
//!     "career": { "company": "flicker" }
//! }))?;
//!
//! let insert = conv.insert("FOOBAR", &doc)?;
//! let update = conv.update("FOOBAR", "name", &doc)?;
//! let delete = conv.delete("FOOBAR", "name", &doc)?;
//! # Ok::<(), map2sql::ConvertError>(())
//! ```
//!
//! Statements are plain text, not parameterized. Values of `string` fields
//! are quoted with `'` doubled and `DATE` fields go through the dialect, but
//! strings mapped to any other type are inserted verbatim.

pub mod builder;
pub mod coerce;
pub mod converter;
pub mod dialect;
pub mod error;
pub mod schema;
pub mod value;
pub mod walker;

pub use builder::{
    DeleteBuilder, InsertBuilder, SqlBuilder, StatementKind, UpdateBuilder, WhereClause,
};
pub use coerce::ValueCoercer;
pub use converter::Converter;
pub use dialect::{Dialect, DialectKind, MySql, Oracle};
pub use error::{ConvertError, ConvertResult};
pub use schema::{FieldSpec, Schema, SchemaNode, SqlType, TableSchema};
pub use value::{Document, Value, document_from_json};
