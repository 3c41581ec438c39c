use super::StatementKind;
use super::traits::SqlBuilder;
use crate::coerce::ValueCoercer;
use crate::error::{ConvertError, ConvertResult};
use crate::schema::TableSchema;
use crate::value::Document;
use crate::walker::{self, MissingField};

/// INSERT builder.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    /// Table name
    table: String,
    /// Column names
    columns: Vec<String>,
    /// Literal values, parallel to `columns`
    values: Vec<String>,
}

impl InsertBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Walk `schema` against `doc` and collect every present field.
    ///
    /// Keys missing from the document are left out; keys holding null are
    /// inserted as `NULL`.
    pub fn from_document(
        table: &str,
        schema: &TableSchema,
        doc: &Document,
        coercer: &ValueCoercer<'_>,
    ) -> ConvertResult<Self> {
        let mut builder = Self::new(table);
        walker::walk(schema, Some(doc), MissingField::Skip, &mut |spec, value| {
            match coercer.render(&spec.sql_type, value) {
                Some(literal) => {
                    builder.set_literal(&spec.column, literal);
                    true
                }
                None => false,
            }
        })?;
        Ok(builder)
    }

    /// Add a column with an already-rendered literal.
    pub fn set_literal(&mut self, column: &str, literal: impl Into<String>) -> &mut Self {
        self.columns.push(column.to_string());
        self.values.push(literal.into());
        self
    }
}

impl SqlBuilder for InsertBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn build_sql(&self) -> String {
        format!(
            "INSERT INTO {} ({}) VALUES({})",
            self.table,
            self.columns.join(","),
            self.values.join(",")
        )
    }

    fn field_count(&self) -> usize {
        self.columns.len()
    }

    fn validate(&self) -> ConvertResult<()> {
        if self.columns.is_empty() {
            return Err(ConvertError::EmptyStatement(StatementKind::Insert));
        }
        Ok(())
    }
}
