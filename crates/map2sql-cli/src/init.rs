use crate::cli::InitArgs;
use std::path::Path;

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    write_template(&args.config)?;
    println!("wrote {}", args.config.display());
    Ok(())
}

const TEMPLATE: &str = r#"
version = "1"

# Schema file mapping document fields to table columns (JSON, `//` and
# `/* */` comments allowed). Relative paths are resolved against this file.
schema = "model.js"

# mysql | oracle
dialect = "mysql"
"#;

fn write_template(path: &Path) -> anyhow::Result<()> {
    if path.exists() {
        anyhow::bail!("refusing to overwrite existing file: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                anyhow::anyhow!("failed to create directory {}: {e}", parent.display())
            })?;
        }
    }

    std::fs::write(path, TEMPLATE.trim_start_matches('\n'))
        .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
    Ok(())
}
