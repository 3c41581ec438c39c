//! Declarative document -> table mapping.
//!
//! A schema source is a JSON object keyed by table name. Each table maps
//! document field names either to a leaf field spec or to a nested table
//! describing an embedded object:
//!
//! ```text
//! {
//!     "FOOBAR": {
//!         "name": "name,string",          // leaf: "<column>,<type>"
//!         "birthday": ["birthday", "DATE"], // leaf, array form
//!         "career": {                     // embedded object
//!             "company": "company,string"
//!         }
//!     }
//! }
//! ```
//!
//! `// ...` and `/* ... */` comments are stripped before parsing.

use crate::error::{ConvertError, ConvertResult};
use regex::Regex;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

fn comment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // `//` must be followed by whitespace or end of line so URLs in values survive.
        Regex::new(r"(?m)[ \t]*//(?:[ \t].*)?$|(?s:/\*.*?\*/)")
            .expect("invalid built-in comment regex")
    })
}

/// SQL type token of a leaf field.
///
/// Only two tokens change how a value is rendered; everything else is kept
/// verbatim and rendered raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    /// `string`: always quoted.
    Text,
    /// `DATE`: rendered by the dialect.
    Date,
    /// Any other token.
    Other(String),
}

impl SqlType {
    pub fn parse(token: &str) -> Self {
        match token {
            "string" => SqlType::Text,
            "DATE" => SqlType::Date,
            other => SqlType::Other(other.to_string()),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, SqlType::Text)
    }
}

/// A parsed `(column, type)` leaf mapping.
///
/// A spec that does not have exactly two parts is kept as an empty, invalid
/// spec: it never emits anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub column: String,
    pub sql_type: SqlType,
}

impl FieldSpec {
    pub fn new(column: impl Into<String>, sql_type: &str) -> Self {
        Self {
            column: column.into(),
            sql_type: SqlType::parse(sql_type),
        }
    }

    /// The empty, no-op spec.
    pub fn invalid() -> Self {
        Self {
            column: String::new(),
            sql_type: SqlType::Other(String::new()),
        }
    }

    /// Parse the `"<column>,<type>"` form.
    pub fn parse(spec: &str) -> Self {
        let parts: Vec<&str> = spec.split(',').collect();
        Self::from_parts(&parts)
    }

    fn from_parts(parts: &[&str]) -> Self {
        match parts {
            [column, sql_type] => Self::new(*column, sql_type),
            _ => Self::invalid(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.column.is_empty()
    }
}

/// A schema entry: either a leaf or an embedded object.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Field(FieldSpec),
    Nested(TableSchema),
}

/// Field mapping for one table (or one embedded object).
///
/// Entries keep their declaration order, which is the order fields appear in
/// generated statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSchema {
    entries: Vec<(String, SchemaNode)>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf field. Replaces an existing entry with the same key.
    pub fn field(mut self, key: impl Into<String>, column: &str, sql_type: &str) -> Self {
        self.insert(key.into(), SchemaNode::Field(FieldSpec::new(column, sql_type)));
        self
    }

    /// Add an embedded object. Replaces an existing entry with the same key.
    pub fn nested(mut self, key: impl Into<String>, schema: TableSchema) -> Self {
        self.insert(key.into(), SchemaNode::Nested(schema));
        self
    }

    pub fn insert(&mut self, key: String, node: SchemaNode) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((key, node)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn from_json(path: &str, value: &serde_json::Value) -> ConvertResult<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(ConvertError::config(format!(
                "'{path}' must be an object"
            )));
        };

        let mut table = TableSchema::new();
        for (key, value) in map {
            let child_path = format!("{path}.{key}");
            let node = match value {
                serde_json::Value::Object(_) => {
                    SchemaNode::Nested(TableSchema::from_json(&child_path, value)?)
                }
                serde_json::Value::String(spec) => SchemaNode::Field(FieldSpec::parse(spec)),
                serde_json::Value::Array(items) => {
                    let parts: Option<Vec<&str>> = items.iter().map(|v| v.as_str()).collect();
                    let Some(parts) = parts else {
                        return Err(ConvertError::config(format!(
                            "'{child_path}' field spec array must contain only strings"
                        )));
                    };
                    SchemaNode::Field(FieldSpec::from_parts(&parts))
                }
                other => {
                    return Err(ConvertError::config(format!(
                        "'{child_path}' must be a field spec or an object, got {other}"
                    )));
                }
            };
            table.insert(key.clone(), node);
        }
        Ok(table)
    }
}

/// Table name -> table mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    tables: Vec<(String, TableSchema)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table. Replaces an existing table with the same name.
    pub fn table(mut self, name: impl Into<String>, schema: TableSchema) -> Self {
        let name = name.into();
        match self.tables.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = schema,
            None => self.tables.push((name, schema)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// Table names in declaration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(n, _)| n.as_str())
    }

    /// Read and parse a schema file.
    pub fn load(path: impl AsRef<Path>) -> ConvertResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::config(format!("failed to read schema file {}: {e}", path.display()))
        })?;
        raw.parse::<Schema>().map_err(|e| match e {
            ConvertError::Config(msg) => {
                ConvertError::config(format!("schema file {}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Build a schema from an already-parsed JSON value.
    pub fn from_json(value: &serde_json::Value) -> ConvertResult<Self> {
        let serde_json::Value::Object(map) = value else {
            return Err(ConvertError::config("schema root must be an object"));
        };

        let mut schema = Schema::new();
        for (name, table) in map {
            schema = schema.table(name.clone(), TableSchema::from_json(name, table)?);
        }
        Ok(schema)
    }
}

impl FromStr for Schema {
    type Err = ConvertError;

    fn from_str(s: &str) -> ConvertResult<Self> {
        let stripped = strip_comments(s);
        let json: serde_json::Value = serde_json::from_str(&stripped)
            .map_err(|e| ConvertError::config(format!("parse error: {e}")))?;
        Schema::from_json(&json)
    }
}

/// Remove `// ...` and `/* ... */` comments from a schema source.
pub fn strip_comments(source: &str) -> String {
    comment_re().replace_all(source, "").into_owned()
}
