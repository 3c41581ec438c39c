use crate::cli::ConvertArgs;
use crate::config::ProjectConfig;
use crate::input::read_documents;
use map2sql::{Converter, DialectKind, StatementKind};
use std::io::Write;
use std::path::PathBuf;

pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let (schema_path, dialect) = resolve_sources(&args)?;
    let converter = Converter::open(&schema_path, dialect)?;

    if converter.schema().get(&args.table).is_none() {
        anyhow::bail!(
            "table {} is not declared in {}",
            args.table,
            schema_path.display()
        );
    }

    let docs = read_documents(&args.files)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for sourced in &docs {
        let sql = convert_one(&converter, &args, &sourced.doc)
            .map_err(|e| anyhow::anyhow!("{}: {e}", sourced.origin))?;
        writeln!(out, "{sql};")?;
    }

    tracing::info!(
        target: "map2sql.cli",
        kind = %args.kind,
        table = %args.table,
        statements = docs.len(),
        "done"
    );
    Ok(())
}

fn convert_one(
    converter: &Converter,
    args: &ConvertArgs,
    doc: &map2sql::Document,
) -> map2sql::ConvertResult<String> {
    let key = args.key.as_deref().unwrap_or_default();
    match args.kind {
        StatementKind::Insert => converter.insert(&args.table, doc),
        StatementKind::Update => converter.update(&args.table, key, doc),
        StatementKind::Delete => converter.delete(&args.table, key, doc),
    }
}

/// Work out the schema path and dialect from flags and (optionally) the config file.
///
/// The config file is only required when `--schema` is not given.
fn resolve_sources(args: &ConvertArgs) -> anyhow::Result<(PathBuf, DialectKind)> {
    let project = if args.schema.is_none() || args.config.exists() {
        Some(ProjectConfig::load(&args.config).map_err(|e| {
            anyhow::anyhow!("{e:#}; pass --schema or run `map2sql init` first")
        })?)
    } else {
        None
    };

    let schema_path = match &args.schema {
        Some(path) => path.clone(),
        None => project
            .as_ref()
            .map(ProjectConfig::schema_path)
            .ok_or_else(|| anyhow::anyhow!("no schema configured"))?,
    };

    let dialect = match (args.dialect, &project) {
        (Some(d), _) => d,
        (None, Some(project)) => project.dialect()?,
        (None, None) => DialectKind::default(),
    };

    Ok((schema_path, dialect))
}
