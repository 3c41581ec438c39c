//! Lock-step traversal of a table schema and a document.
//!
//! Embedded objects are resolved in one of two ways:
//!
//! - If the document holds an object under the embedded key, the walk
//!   descends into that object and lookups restart from its root.
//! - If the key is absent (or null), the embedded fields are looked up in the
//!   *same* document under dotted keys (`career.company`), so flattened
//!   documents work too.
//!
//! Callers should stick to one style per embedded object; mixing both for the
//! same key is not merged.

use crate::error::{ConvertError, ConvertResult};
use crate::schema::{FieldSpec, SchemaNode, TableSchema};
use crate::value::{Document, Value};

/// What to do with a leaf whose key is missing from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    /// Leave the field out (INSERT).
    Skip,
    /// Emit the field as NULL (UPDATE SET).
    Null,
}

/// Walk `schema` against `doc`, calling `emit` for every leaf that produces
/// output.
///
/// `emit` returns whether it actually wrote the field; only those count.
/// `doc = None` means the whole document is absent.
pub fn walk<F>(
    schema: &TableSchema,
    doc: Option<&Document>,
    missing: MissingField,
    emit: &mut F,
) -> ConvertResult<usize>
where
    F: FnMut(&FieldSpec, &Value) -> bool,
{
    walk_prefixed(schema, doc, "", missing, emit)
}

fn walk_prefixed<F>(
    schema: &TableSchema,
    doc: Option<&Document>,
    prefix: &str,
    missing: MissingField,
    emit: &mut F,
) -> ConvertResult<usize>
where
    F: FnMut(&FieldSpec, &Value) -> bool,
{
    let mut emitted = 0;

    for (key, node) in schema.iter() {
        let path = if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        };

        match node {
            SchemaNode::Nested(nested) => {
                emitted += match doc {
                    None => walk_prefixed(nested, None, "", missing, emit)?,
                    Some(d) => match d.get(&path) {
                        None | Some(Value::Null) => {
                            walk_prefixed(nested, Some(d), &path, missing, emit)?
                        }
                        Some(Value::Object(inner)) => {
                            walk_prefixed(nested, Some(inner), "", missing, emit)?
                        }
                        Some(other) => {
                            return Err(ConvertError::type_mismatch(path, other.type_name()));
                        }
                    },
                };
            }
            SchemaNode::Field(spec) => {
                if !spec.is_valid() {
                    tracing::warn!(target: "map2sql", path = %path, "skipping malformed field spec");
                    continue;
                }

                let value = match (doc.and_then(|d| d.get(&path)), missing) {
                    (Some(v), _) => v,
                    (None, MissingField::Null) => &Value::Null,
                    (None, MissingField::Skip) => continue,
                };
                if emit(spec, value) {
                    emitted += 1;
                }
            }
        }
    }

    Ok(emitted)
}
