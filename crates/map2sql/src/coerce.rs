//! Value -> SQL literal coercion.

use crate::dialect::{Dialect, write_quoted};
use crate::schema::SqlType;
use crate::value::Value;
use std::fmt::Write;

/// Renders document values as literals for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct ValueCoercer<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> ValueCoercer<'a> {
    pub const fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Render `value` as a literal string.
    ///
    /// Returns `None` for values without a literal form (objects, arrays);
    /// the caller skips the field.
    pub fn render(&self, sql_type: &SqlType, value: &Value) -> Option<String> {
        let mut out = String::new();
        self.write(&mut out, sql_type, value).then_some(out)
    }

    /// Append the literal for `value` to `out`.
    ///
    /// Returns `false` (and writes nothing) when the value has no literal form.
    ///
    /// # Safety
    ///
    /// Strings whose type is neither `string` nor `DATE` are appended verbatim,
    /// so schemas can pass SQL expressions through. The caller must trust them.
    pub fn write(&self, out: &mut String, sql_type: &SqlType, value: &Value) -> bool {
        match value {
            Value::Null => out.push_str("NULL"),
            Value::Int(v) => write_scalar(out, sql_type, v),
            Value::Int64(v) => write_scalar(out, sql_type, v),
            Value::Float(v) => write_scalar(out, sql_type, v),
            Value::Bool(v) => write_scalar(out, sql_type, v),
            Value::String(s) => match sql_type {
                SqlType::Date => self.dialect.write_date(out, s),
                SqlType::Text => write_quoted(out, s),
                SqlType::Other(_) => out.push_str(s),
            },
            Value::Object(_) | Value::Array(_) => {
                tracing::error!(
                    target: "map2sql",
                    value_type = value.type_name(),
                    "model element type unsupported"
                );
                return false;
            }
        }
        true
    }
}

fn write_scalar(out: &mut String, sql_type: &SqlType, v: impl std::fmt::Display) {
    // Writing into a String never fails.
    if sql_type.is_text() {
        let _ = write!(out, "'{v}'");
    } else {
        let _ = write!(out, "{v}");
    }
}
