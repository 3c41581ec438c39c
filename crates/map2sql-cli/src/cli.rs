use map2sql::{DialectKind, StatementKind};
use std::path::PathBuf;

pub const DEFAULT_CONFIG: &str = "map2sql.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Init,
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Init(InitArgs),
    Convert(ConvertArgs),
}

#[derive(Debug, Clone)]
pub struct InitArgs {
    pub config: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub kind: StatementKind,
    pub config: PathBuf,
    pub schema: Option<PathBuf>,
    pub dialect: Option<DialectKind>,
    pub table: String,
    pub key: Option<String>,
    pub files: Vec<PathBuf>,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help(HelpTopic::Root)),
        "init" => parse_init(it.map(|s| s.as_str())),
        "insert" => parse_convert(StatementKind::Insert, it.map(|s| s.as_str())),
        "update" => parse_convert(StatementKind::Update, it.map(|s| s.as_str())),
        "delete" => parse_convert(StatementKind::Delete, it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_init<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Init)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = PathBuf::from(v);
            }
            _ if token.starts_with("--config=") => {
                config = PathBuf::from(token.trim_start_matches("--config="));
            }
            other => anyhow::bail!("unknown argument: {other}"),
        }
    }

    Ok(Command::Init(InitArgs { config }))
}

fn parse_convert<'a>(
    kind: StatementKind,
    mut it: impl Iterator<Item = &'a str>,
) -> anyhow::Result<Command> {
    let mut config = PathBuf::from(DEFAULT_CONFIG);
    let mut schema: Option<PathBuf> = None;
    let mut dialect: Option<DialectKind> = None;
    let mut table: Option<String> = None;
    let mut key: Option<String> = None;
    let mut files: Vec<PathBuf> = Vec::new();

    while let Some(token) = it.next() {
        let (flag, inline) = match token.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
            _ => (token, None),
        };

        match flag {
            "-h" | "--help" => return Ok(Command::Help(help_topic(kind))),
            "--config" | "--schema" | "--dialect" | "--table" | "--key" => {
                let value = match inline {
                    Some(v) => v,
                    None => match it.next() {
                        Some(v) => v,
                        None => anyhow::bail!("{flag} requires a value"),
                    },
                };
                match flag {
                    "--config" => config = PathBuf::from(value),
                    "--schema" => schema = Some(PathBuf::from(value)),
                    "--dialect" => dialect = Some(value.parse()?),
                    "--table" => table = Some(value.to_string()),
                    _ => key = Some(value.to_string()),
                }
            }
            "-" => files.push(PathBuf::from("-")),
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => files.push(PathBuf::from(other)),
        }
    }

    let Some(table) = table else {
        anyhow::bail!("--table is required");
    };
    if table.trim().is_empty() {
        anyhow::bail!("--table must not be empty");
    }

    match (kind, &key) {
        (StatementKind::Insert, Some(_)) => anyhow::bail!("--key is not used by insert"),
        (StatementKind::Update | StatementKind::Delete, None) => {
            anyhow::bail!("--key is required for {}", kind.as_str().to_lowercase())
        }
        _ => {}
    }

    Ok(Command::Convert(ConvertArgs {
        kind,
        config,
        schema,
        dialect,
        table,
        key,
        files,
    }))
}

fn help_topic(kind: StatementKind) -> HelpTopic {
    match kind {
        StatementKind::Insert => HelpTopic::Insert,
        StatementKind::Update => HelpTopic::Update,
        StatementKind::Delete => HelpTopic::Delete,
    }
}

pub fn print_help(topic: HelpTopic) {
    let text = match topic {
        HelpTopic::Root => {
            r#"map2sql - convert JSON documents into SQL statements

USAGE:
  map2sql <COMMAND> [OPTIONS] [FILES...]

COMMANDS:
  insert   Emit INSERT statements
  update   Emit UPDATE statements keyed by --key
  delete   Emit DELETE statements keyed by --key
  init     Write a map2sql.toml template

Each FILE (or stdin when none is given, or `-`) holds one JSON object or an
array of JSON objects. One statement is printed per document.

Run `map2sql <COMMAND> --help` for command options.
"#
        }
        HelpTopic::Init => {
            r#"map2sql init - write a config template

USAGE:
  map2sql init [--config map2sql.toml]
"#
        }
        HelpTopic::Insert => {
            r#"map2sql insert - emit INSERT statements

USAGE:
  map2sql insert --table <TABLE> [OPTIONS] [FILES...]

OPTIONS:
  --config <PATH>     Config file (default: map2sql.toml)
  --schema <PATH>     Schema file (overrides config; config becomes optional)
  --dialect <NAME>    mysql | oracle (overrides config)
  --table <TABLE>     Table declared in the schema
"#
        }
        HelpTopic::Update => {
            r#"map2sql update - emit UPDATE statements

USAGE:
  map2sql update --table <TABLE> --key <KEY> [OPTIONS] [FILES...]

OPTIONS:
  --config <PATH>     Config file (default: map2sql.toml)
  --schema <PATH>     Schema file (overrides config; config becomes optional)
  --dialect <NAME>    mysql | oracle (overrides config)
  --table <TABLE>     Table declared in the schema
  --key <KEY>         Document/schema key used for the WHERE clause
"#
        }
        HelpTopic::Delete => {
            r#"map2sql delete - emit DELETE statements

USAGE:
  map2sql delete --table <TABLE> --key <KEY> [OPTIONS] [FILES...]

OPTIONS:
  --config <PATH>     Config file (default: map2sql.toml)
  --schema <PATH>     Schema file (overrides config; config becomes optional)
  --dialect <NAME>    mysql | oracle (overrides config)
  --table <TABLE>     Table declared in the schema
  --key <KEY>         Document/schema key used for the WHERE clause
"#
        }
    };
    print!("{text}");
}
