use map2sql::DialectKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_dir: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;
        Self::from_toml(config_path, &raw)
    }

    fn from_toml(config_path: &Path, raw: &str) -> anyhow::Result<Self> {
        let config_dir = config_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        let mut file: ConfigFile = toml::from_str(raw).map_err(|e| {
            anyhow::anyhow!(
                "failed to parse config file {}: {e}",
                config_path.display()
            )
        })?;

        file.expand_env()?;
        file.validate()?;

        Ok(Self { config_dir, file })
    }

    pub fn resolve_path(&self, p: impl AsRef<Path>) -> PathBuf {
        let p = p.as_ref();
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.config_dir.join(p)
        }
    }

    /// Schema file path, resolved against the config directory.
    pub fn schema_path(&self) -> PathBuf {
        self.resolve_path(&self.file.schema)
    }

    pub fn dialect(&self) -> anyhow::Result<DialectKind> {
        match &self.file.dialect {
            Some(name) => Ok(name.parse()?),
            None => Ok(DialectKind::default()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub schema: String,
    pub dialect: Option<String>,
}

impl ConfigFile {
    fn expand_env(&mut self) -> anyhow::Result<()> {
        self.schema = expand_env_vars(&self.schema)?;
        if let Some(dialect) = self.dialect.as_mut() {
            *dialect = expand_env_vars(dialect)?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim() != "1" {
            anyhow::bail!("unsupported config version: {}", self.version);
        }
        if self.schema.trim().is_empty() {
            anyhow::bail!("schema must not be empty");
        }
        if let Some(dialect) = &self.dialect {
            dialect.parse::<DialectKind>()?;
        }
        Ok(())
    }
}

fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'

            let mut key = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                key.push(ch);
            }

            if !closed {
                anyhow::bail!("unterminated env var reference: ${{{key}");
            }
            if key.is_empty() {
                anyhow::bail!("invalid env var reference: ${{}}");
            }

            let v = std::env::var(&key)
                .map_err(|_| anyhow::anyhow!("missing env var for config expansion: {key}"))?;
            out.push_str(&v);
            continue;
        }

        out.push(c);
    }

    Ok(out)
}
