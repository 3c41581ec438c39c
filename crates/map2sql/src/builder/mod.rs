//! Statement builders.
//!
//! Each builder walks a table schema against a document and collects the
//! textual fragments of one statement:
//!
//! - INSERT: column list + value list; missing keys are left out.
//! - UPDATE: `column=value` assignments; missing keys are set to NULL.
//! - DELETE: only the WHERE clause.
//!
//! UPDATE and DELETE require the query key in both the document and the
//! schema. A statement with no fields is refused.

pub mod delete;
pub mod insert;
pub mod traits;
pub mod update;
pub mod where_clause;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use traits::SqlBuilder;
pub use update::UpdateBuilder;
pub use where_clause::WhereClause;

use std::fmt;

/// Kind of generated statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
