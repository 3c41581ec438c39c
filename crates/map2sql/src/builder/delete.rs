use super::StatementKind;
use super::traits::SqlBuilder;
use super::where_clause::WhereClause;
use crate::coerce::ValueCoercer;
use crate::error::{ConvertError, ConvertResult};
use crate::schema::TableSchema;
use crate::value::Document;

/// DELETE builder. A WHERE clause is mandatory.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    /// Table name
    table: String,
    /// WHERE clause
    where_clause: Option<WhereClause>,
}

impl DeleteBuilder {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_clause: None,
        }
    }

    /// Build the WHERE clause from `query_key`. The rest of the document is
    /// not looked at.
    pub fn from_document(
        table: &str,
        schema: &TableSchema,
        query_key: &str,
        doc: &Document,
        coercer: &ValueCoercer<'_>,
    ) -> ConvertResult<Self> {
        let mut builder = Self::new(table);
        builder.where_clause(WhereClause::from_query_key(schema, query_key, doc, coercer)?);
        Ok(builder)
    }

    /// Set the WHERE clause.
    pub fn where_clause(&mut self, clause: WhereClause) -> &mut Self {
        self.where_clause = Some(clause);
        self
    }
}

impl SqlBuilder for DeleteBuilder {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn build_sql(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table);
        if let Some(clause) = &self.where_clause {
            clause.write_sql(&mut sql);
        }
        sql
    }

    fn field_count(&self) -> usize {
        usize::from(self.where_clause.is_some())
    }

    fn validate(&self) -> ConvertResult<()> {
        if self.where_clause.is_none() {
            return Err(ConvertError::MissingWhere(StatementKind::Delete));
        }
        Ok(())
    }
}
