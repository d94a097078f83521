use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_CONC: usize = 1024;

/// Env var naming an optional TOML config file.
pub const CONFIG_ENV: &str = "AGENDA_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default)]
    pub http: HttpSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSection {
    /// Listen address, e.g. `127.0.0.1` or `0.0.0.0`.
    pub bind: String,
    pub port: u16,
    /// Upper bound on in-flight requests.
    pub max_conc: usize,
}

impl Default for HttpSection {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            max_conc: DEFAULT_MAX_CONC,
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<ServiceConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the file named by `AGENDA_CONFIG`, or fall back to defaults.
pub fn discover_config() -> Result<ServiceConfig, ConfigError> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            let cfg = load_config(&path)?;
            info!(path = %path, "loaded service config");
            Ok(cfg)
        }
        _ => Ok(ServiceConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp config");
        file.write_all(body.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let cfg = load_config(file.path()).expect("parse");
        assert_eq!(cfg, ServiceConfig::default());
        assert_eq!(cfg.http.port, 8000);
    }

    #[test]
    fn partial_http_section_keeps_other_defaults() {
        let file = write_config("[http]\nport = 9100\n");
        let cfg = load_config(file.path()).expect("parse");
        assert_eq!(cfg.http.port, 9100);
        assert_eq!(cfg.http.bind, DEFAULT_BIND);
        assert_eq!(cfg.http.max_conc, DEFAULT_MAX_CONC);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = write_config("[http]\nprot = 1\n");
        assert!(matches!(
            load_config(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = load_config(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
