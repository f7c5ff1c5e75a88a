//! Configuration management for docscore using the prefer crate.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upload size limit in bytes (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10_000_000;

/// Default port, matching the original service.
pub const DEFAULT_PORT: u16 = 3000;

/// Default upload directory, relative to the working directory.
const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {format} config: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory uploaded files are written to.
    pub upload_dir: PathBuf,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: usize,
    /// Tesseract language model.
    pub ocr_language: String,
    /// Keep uploaded files on disk after analysis.
    pub keep_uploads: bool,
    /// Interface the server binds to.
    pub host: String,
    /// Port the server listens on.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            ocr_language: "eng".to_string(),
            keep_uploads: true,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Create settings with a custom upload directory.
    pub fn with_upload_dir(upload_dir: PathBuf) -> Self {
        Self {
            upload_dir,
            ..Default::default()
        }
    }

    /// Ensure the upload directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        if self.upload_dir.is_dir() {
            tracing::debug!("Upload directory {} exists", self.upload_dir.display());
            return Ok(());
        }

        tracing::info!("Creating upload directory {}", self.upload_dir.display());
        std::fs::create_dir_all(&self.upload_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create upload directory '{}': {}",
                    self.upload_dir.display(),
                    e
                ),
            )
        })
    }

    /// Apply environment variable overrides.
    fn apply_env(&mut self) {
        if let Some(port) = env_var("PORT").and_then(|p| p.parse().ok()) {
            tracing::debug!("Using PORT from environment: {}", port);
            self.port = port;
        }
        if let Some(dir) = env_var("DOCSCORE_UPLOAD_DIR") {
            tracing::debug!("Using DOCSCORE_UPLOAD_DIR from environment: {}", dir);
            self.upload_dir = PathBuf::from(shellexpand::tilde(&dir).as_ref());
        }
        if let Some(max) = env_var("DOCSCORE_MAX_UPLOAD_BYTES").and_then(|m| m.parse().ok()) {
            tracing::debug!("Using DOCSCORE_MAX_UPLOAD_BYTES from environment: {}", max);
            self.max_upload_bytes = max;
        }
        if let Some(lang) = env_var("DOCSCORE_OCR_LANGUAGE") {
            tracing::debug!("Using DOCSCORE_OCR_LANGUAGE from environment: {}", lang);
            self.ocr_language = lang;
        }
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Upload directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<String>,
    /// Maximum upload size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_upload_bytes: Option<usize>,
    /// Tesseract language model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr_language: Option<String>,
    /// Keep uploaded files after analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_uploads: Option<bool>,
    /// Bind host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Bind port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers docscore config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("docscore").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("{}", e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, ConfigError> {
        match ext {
            "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "TOML",
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "YAML",
                message: e.to_string(),
            }),
            _ => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
                format: "JSON",
                message: e.to_string(),
            }),
        }
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref dir) = self.upload_dir {
            settings.upload_dir = self.resolve_path(dir, base_dir);
        }
        if let Some(max) = self.max_upload_bytes {
            settings.max_upload_bytes = max;
        }
        if let Some(ref lang) = self.ocr_language {
            settings.ocr_language = lang.clone();
        }
        if let Some(keep) = self.keep_uploads {
            settings.keep_uploads = keep;
        }
        if let Some(ref host) = self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Use CWD for relative paths instead of config file directory.
    pub use_cwd: bool,
}

/// Load settings from config file, then environment.
pub async fn load_settings_with_options(options: LoadOptions) -> anyhow::Result<(Settings, Config)> {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await?,
        None => Config::load().await,
    };

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = if options.use_cwd {
        cwd
    } else {
        config.base_dir().unwrap_or(cwd)
    };

    let mut settings = Settings::default();
    config.apply_to_settings(&mut settings, &base_dir);
    settings.apply_env();

    Ok((settings, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_upload_bytes, 10_000_000);
        assert_eq!(settings.ocr_language, "eng");
        assert_eq!(settings.port, 3000);
        assert!(settings.keep_uploads);
    }

    #[test]
    fn test_parse_formats() {
        let toml = Config::parse("upload_dir = \"files\"\nport = 8080\n", "toml").unwrap();
        assert_eq!(toml.upload_dir.as_deref(), Some("files"));
        assert_eq!(toml.port, Some(8080));

        let yaml = Config::parse("ocr_language: deu\nkeep_uploads: false\n", "yaml").unwrap();
        assert_eq!(yaml.ocr_language.as_deref(), Some("deu"));
        assert_eq!(yaml.keep_uploads, Some(false));

        let json = Config::parse(r#"{"max_upload_bytes": 1024}"#, "json").unwrap();
        assert_eq!(json.max_upload_bytes, Some(1024));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("port = \"not a number\"", "toml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "TOML", .. }));
    }

    #[test]
    fn test_apply_resolves_relative_upload_dir() {
        let config = Config {
            upload_dir: Some("uploads".to_string()),
            port: Some(9000),
            ..Default::default()
        };
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, Path::new("/srv/docscore"));

        assert_eq!(settings.upload_dir, PathBuf::from("/srv/docscore/uploads"));
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_absolute_path_kept() {
        let config = Config::default();
        assert_eq!(
            config.resolve_path("/var/uploads", Path::new("/srv")),
            PathBuf::from("/var/uploads")
        );
    }

    #[tokio::test]
    async fn test_load_from_path_sets_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docscore.toml");
        std::fs::write(&path, "upload_dir = \"incoming\"\n").unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.base_dir().as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_ensure_directories_creates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::with_upload_dir(dir.path().join("a").join("b"));
        settings.ensure_directories().unwrap();
        assert!(settings.upload_dir.is_dir());
        settings.ensure_directories().unwrap();
    }
}
