use serde::{Deserialize, Serialize};

/// Output encoding for documents written by `rbacctl`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => anyhow::bail!("unknown output format '{}' (expected yaml or json)", other),
        }
    }
}

/// `rbacctl` configuration file (YAML).
///
/// Example `rbacctl.yaml`:
/// ```yaml
/// output: json
/// namespace: dev
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RbacCtlConfigFile {
    #[serde(default)]
    pub output: Option<OutputFormat>,
    /// Namespace stamped on namespaced objects that carry none
    #[serde(default, alias = "default-namespace")]
    pub namespace: Option<String>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg: RbacCtlConfigFile = load_config_file("/nonexistent/rbacctl.yaml").unwrap();
        assert!(cfg.output.is_none());
        assert!(cfg.namespace.is_none());
    }

    #[test]
    fn reads_yaml_with_aliases() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output: json\ndefault-namespace: dev").unwrap();

        let cfg: RbacCtlConfigFile = load_config_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.output, Some(OutputFormat::Json));
        assert_eq!(cfg.namespace.as_deref(), Some("dev"));
    }

    #[test]
    fn parse_output_format() {
        assert_eq!("YAML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("toml".parse::<OutputFormat>().is_err());
    }
}
