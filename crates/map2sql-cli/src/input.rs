use map2sql::{Document, document_from_json};
use std::io::Read;
use std::path::{Path, PathBuf};

/// One document and where it came from (for error messages).
#[derive(Debug)]
pub struct SourcedDocument {
    pub origin: String,
    pub doc: Document,
}

/// Read documents from `files`, or from stdin when `files` is empty.
/// `-` also means stdin.
pub fn read_documents(files: &[PathBuf]) -> anyhow::Result<Vec<SourcedDocument>> {
    if files.is_empty() {
        return read_stdin();
    }

    let mut docs = Vec::new();
    for file in files {
        if file == Path::new("-") {
            docs.extend(read_stdin()?);
            continue;
        }
        let content = std::fs::read_to_string(file)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", file.display()))?;
        docs.extend(parse_documents(&file.display().to_string(), &content)?);
    }
    Ok(docs)
}

fn read_stdin() -> anyhow::Result<Vec<SourcedDocument>> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;

    if buf.trim().is_empty() {
        anyhow::bail!("no documents provided (pass files or pipe JSON to stdin)");
    }
    parse_documents("stdin", &buf)
}

/// Parse one JSON object or an array of JSON objects.
pub fn parse_documents(name: &str, content: &str) -> anyhow::Result<Vec<SourcedDocument>> {
    let json: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| anyhow::anyhow!("failed to parse JSON from {name}: {e}"))?;

    let items = match json {
        serde_json::Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| (format!("{name}:doc{}", idx + 1), item))
            .collect(),
        other => vec![(name.to_string(), other)],
    };

    items
        .into_iter()
        .map(|(origin, item)| -> anyhow::Result<SourcedDocument> {
            let doc = document_from_json(item).map_err(|e| anyhow::anyhow!("{origin}: {e}"))?;
            Ok(SourcedDocument { origin, doc })
        })
        .collect()
}
