use super::StatementKind;
use super::traits::SqlBuilder;
use super::where_clause::{WhereClause, query_value};
use crate::coerce::ValueCoercer;
use crate::error::{ConvertError, ConvertResult};
use crate::schema::TableSchema;
use crate::value::Document;
use crate::walker::{self, MissingField};

/// UPDATE builder.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    /// Table name
    table: String,
    /// `column=literal` assignments
    assignments: Vec<String>,
    /// WHERE clause
    where_clause: Option<WhereClause>,
}

impl UpdateBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            assignments: Vec::new(),
            where_clause: None,
        }
    }

    /// Walk `schema` against `doc` and assign every field, keyed by `query_key`.
    ///
    /// Every schema leaf ends up in the SET clause: keys missing from the
    /// document are set to `NULL`.
    pub fn from_document(
        table: &str,
        schema: &TableSchema,
        query_key: &str,
        doc: &Document,
        coercer: &ValueCoercer<'_>,
    ) -> ConvertResult<Self> {
        let key_value = query_value(query_key, doc)?;

        let mut builder = Self::new(table);
        walker::walk(schema, Some(doc), MissingField::Null, &mut |spec, value| {
            match coercer.render(&spec.sql_type, value) {
                Some(literal) => {
                    builder.set_literal(&spec.column, &literal);
                    true
                }
                None => false,
            }
        })?;
        if builder.assignments.is_empty() {
            return Err(ConvertError::EmptyStatement(StatementKind::Update));
        }

        builder.where_clause = Some(WhereClause::resolve(
            schema,
            query_key,
            key_value,
            coercer,
        )?);
        Ok(builder)
    }

    /// Add a `column=literal` assignment.
    pub fn set_literal(&mut self, column: &str, literal: &str) -> &mut Self {
        self.assignments.push(format!("{column}={literal}"));
        self
    }

    /// Set the WHERE clause.
    pub fn where_clause(&mut self, clause: WhereClause) -> &mut Self {
        self.where_clause = Some(clause);
        self
    }
}

impl SqlBuilder for UpdateBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn build_sql(&self) -> String {
        let mut sql = format!("UPDATE {} SET {}", self.table, self.assignments.join(","));
        if let Some(clause) = &self.where_clause {
            clause.write_sql(&mut sql);
        }
        sql
    }

    fn field_count(&self) -> usize {
        self.assignments.len()
    }

    fn validate(&self) -> ConvertResult<()> {
        if self.assignments.is_empty() {
            return Err(ConvertError::EmptyStatement(StatementKind::Update));
        }
        if self.where_clause.is_none() {
            return Err(ConvertError::MissingWhere(StatementKind::Update));
        }
        Ok(())
    }
}
