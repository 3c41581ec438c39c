//! Dialect-specific literal rendering.
//!
//! The only thing that differs between supported dialects is how a `DATE`
//! field is written. A new dialect implements [`Dialect::write_date`].

use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// Date literal rendering for one SQL dialect.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Dialect name (used in logs).
    fn name(&self) -> &'static str;

    /// Append the literal for a date-like string. Embedded single quotes must
    /// be doubled; the date text itself is not validated.
    fn write_date(&self, out: &mut String, date: &str);
}

/// MySQL: `'2018-02-01 12:34:56'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySql;

impl Dialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn write_date(&self, out: &mut String, date: &str) {
        write_quoted(out, date);
    }
}

/// Oracle: `to_date('2018-02-01 12:34:56','yyyy-MM-dd hh24:mi:ss')`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Oracle;

impl Dialect for Oracle {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn write_date(&self, out: &mut String, date: &str) {
        out.push_str("to_date(");
        write_quoted(out, date);
        out.push_str(",'yyyy-MM-dd hh24:mi:ss')");
    }
}

/// Built-in dialects, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialectKind {
    #[default]
    MySql,
    Oracle,
}

impl DialectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DialectKind::MySql => "mysql",
            DialectKind::Oracle => "oracle",
        }
    }

    pub fn into_dialect(self) -> Box<dyn Dialect> {
        match self {
            DialectKind::MySql => Box::new(MySql),
            DialectKind::Oracle => Box::new(Oracle),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialectKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(DialectKind::MySql),
            "oracle" => Ok(DialectKind::Oracle),
            other => Err(ConvertError::config(format!("unsupported dialect: {other}"))),
        }
    }
}

/// Append `'value'`, doubling embedded single quotes.
pub fn write_quoted(out: &mut String, value: &str) {
    out.reserve(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push_str("''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(dialect: &dyn Dialect, value: &str) -> String {
        let mut out = String::new();
        dialect.write_date(&mut out, value);
        out
    }

    #[test]
    fn mysql_date() {
        assert_eq!(date(&MySql, "2018-02-01 12:34:56"), "'2018-02-01 12:34:56'");
    }

    #[test]
    fn oracle_date() {
        assert_eq!(
            date(&Oracle, "2018-02-01 12:34:56"),
            "to_date('2018-02-01 12:34:56','yyyy-MM-dd hh24:mi:ss')"
        );
    }

    #[test]
    fn date_quotes_are_doubled() {
        assert_eq!(date(&MySql, "it's"), "'it''s'");
        assert_eq!(
            date(&Oracle, "'"),
            "to_date('''','yyyy-MM-dd hh24:mi:ss')"
        );
    }

    #[test]
    fn kind_from_str() {
        assert_eq!("mysql".parse::<DialectKind>().unwrap(), DialectKind::MySql);
        assert_eq!(" Oracle ".parse::<DialectKind>().unwrap(), DialectKind::Oracle);
        assert!("sqlite".parse::<DialectKind>().is_err());
        assert_eq!(DialectKind::Oracle.to_string(), "oracle");
        assert_eq!(DialectKind::Oracle.into_dialect().name(), "oracle");
    }
}
