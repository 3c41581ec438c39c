use crate::coerce::ValueCoercer;
use crate::error::{ConvertError, ConvertResult};
use crate::schema::{SchemaNode, TableSchema};
use crate::value::{Document, Value};

/// `WHERE <column>=<literal>` built from a query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    pub column: String,
    pub literal: String,
}

impl WhereClause {
    /// Resolve `query_key` against the document and the table schema.
    ///
    /// The key is looked up at the top level of both. The schema entry must be
    /// a well-formed leaf; its type drives how the value is rendered.
    pub fn from_query_key(
        schema: &TableSchema,
        query_key: &str,
        doc: &Document,
        coercer: &ValueCoercer<'_>,
    ) -> ConvertResult<Self> {
        let value = query_value(query_key, doc)?;
        Self::resolve(schema, query_key, value, coercer)
    }

    pub(crate) fn resolve(
        schema: &TableSchema,
        query_key: &str,
        value: &Value,
        coercer: &ValueCoercer<'_>,
    ) -> ConvertResult<Self> {
        let spec = match schema.get(query_key) {
            Some(SchemaNode::Field(spec)) if spec.is_valid() => spec,
            _ => return Err(ConvertError::UnknownQueryKey(query_key.to_string())),
        };

        let literal = coercer
            .render(&spec.sql_type, value)
            .ok_or_else(|| ConvertError::UnsupportedQueryValue(query_key.to_string()))?;

        Ok(Self {
            column: spec.column.clone(),
            literal,
        })
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push_str(" WHERE ");
        out.push_str(&self.column);
        out.push('=');
        out.push_str(&self.literal);
    }
}

/// Document value of the query key.
pub(crate) fn query_value<'d>(query_key: &str, doc: &'d Document) -> ConvertResult<&'d Value> {
    doc.get(query_key)
        .ok_or_else(|| ConvertError::MissingQueryKey(query_key.to_string()))
}
