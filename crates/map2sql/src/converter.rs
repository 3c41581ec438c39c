//! Schema-driven document -> SQL converter.

use crate::builder::{DeleteBuilder, InsertBuilder, SqlBuilder, UpdateBuilder};
use crate::coerce::ValueCoercer;
use crate::dialect::{Dialect, DialectKind};
use crate::error::{ConvertError, ConvertResult};
use crate::schema::{Schema, TableSchema};
use crate::value::Document;
use std::path::Path;

/// Converts documents into INSERT / UPDATE / DELETE statements for the tables
/// declared in a [`Schema`].
///
/// The schema and dialect are fixed at construction; every call builds its
/// own buffers, so a converter can be shared across threads.
///
/// # Example
/// ```ignore
/// use map2sql::{Converter, DialectKind, Document, Value};
///
/// let conv = Converter::open("model.js", DialectKind::MySql)?;
///
/// let mut doc = Document::new();
/// doc.insert("name".into(), Value::from("Diana"));
/// doc.insert("age".into(), Value::from(12));
///
/// let sql = conv.insert("FOOBAR", &doc)?;
/// // INSERT INTO FOOBAR (name,age) VALUES('Diana',12)
/// # Ok::<(), map2sql::ConvertError>(())
/// ```
#[derive(Debug)]
pub struct Converter {
    schema: Schema,
    dialect: Box<dyn Dialect>,
}

impl Converter {
    /// Create a converter from a parsed schema and a dialect.
    pub fn new(schema: Schema, dialect: impl Dialect + 'static) -> Self {
        Self {
            schema,
            dialect: Box::new(dialect),
        }
    }

    /// Create a converter with one of the built-in dialects.
    pub fn with_kind(schema: Schema, kind: DialectKind) -> Self {
        Self {
            schema,
            dialect: kind.into_dialect(),
        }
    }

    /// Load the schema file at `path` and create a converter.
    pub fn open(path: impl AsRef<Path>, kind: DialectKind) -> ConvertResult<Self> {
        let schema = Schema::load(path)?;
        Ok(Self::with_kind(schema, kind))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Build `INSERT INTO <table> (<cols>) VALUES(<vals>)`.
    ///
    /// Fields whose key is absent from `doc` are left out; explicit nulls are
    /// inserted as `NULL`. Fails if no field is left.
    pub fn insert(&self, table: &str, doc: &Document) -> ConvertResult<String> {
        let schema = self.table(table)?;
        let builder = InsertBuilder::from_document(table, schema, doc, &self.coercer())?;
        self.finish(table, &builder)
    }

    /// Build `UPDATE <table> SET <assignments> WHERE <col>=<literal>`.
    ///
    /// Every schema field is assigned (absent keys become `NULL`). The WHERE
    /// clause uses the value of `query_key` in `doc` and the type of the
    /// schema field with the same key.
    pub fn update(&self, table: &str, query_key: &str, doc: &Document) -> ConvertResult<String> {
        let schema = self.table(table)?;
        let builder =
            UpdateBuilder::from_document(table, schema, query_key, doc, &self.coercer())?;
        self.finish(table, &builder)
    }

    /// Build `DELETE FROM <table> WHERE <col>=<literal>`.
    pub fn delete(&self, table: &str, query_key: &str, doc: &Document) -> ConvertResult<String> {
        let schema = self.table(table)?;
        let builder =
            DeleteBuilder::from_document(table, schema, query_key, doc, &self.coercer())?;
        self.finish(table, &builder)
    }

    fn table(&self, name: &str) -> ConvertResult<&TableSchema> {
        self.schema
            .get(name)
            .ok_or_else(|| ConvertError::UnknownTable(name.to_string()))
    }

    fn coercer(&self) -> ValueCoercer<'_> {
        ValueCoercer::new(self.dialect.as_ref())
    }

    fn finish(&self, table: &str, builder: &impl SqlBuilder) -> ConvertResult<String> {
        let sql = builder.to_sql()?;
        tracing::debug!(
            target: "map2sql.sql",
            kind = %builder.kind(),
            table,
            dialect = self.dialect.name(),
            fields = builder.field_count(),
            sql = %sql,
        );
        Ok(sql)
    }
}
