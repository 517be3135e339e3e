//! Configuration management for orderscan using the prefer crate.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::extraction::DEFAULT_RENDER_DPI;
use crate::repository::DbContext;

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "orderscan.db";

/// Default address the HTTP API listens on.
pub const DEFAULT_BIND: &str = "127.0.0.1:3030";

/// Default Tesseract language.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Default maximum upload size (25 MiB).
pub const DEFAULT_UPLOAD_LIMIT: usize = 25 * 1024 * 1024;

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    /// Supports sqlite: URLs. Set via DATABASE_URL env var.
    pub database_url: Option<String>,
    /// Address for `serve` when none is given on the command line.
    pub bind: String,
    /// Tesseract language code.
    pub ocr_language: String,
    /// Resolution pages are rendered at before OCR.
    pub render_dpi: u32,
    /// Keep physical layout when pulling embedded text.
    pub pdf_layout: bool,
    /// Maximum accepted request body in bytes.
    pub upload_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        // Local data dir -> Home dir -> Current dir
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("orderscan");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            bind: DEFAULT_BIND.to_string(),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            render_dpi: DEFAULT_RENDER_DPI,
            pdf_layout: false,
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            format!("sqlite:{}", self.database_path().display())
        }
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Check if the database appears to be initialized.
    pub fn database_exists(&self) -> bool {
        self.database_url.is_some() || self.database_path().exists()
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }

    /// Create a database context using the configured database URL or path.
    pub fn create_db_context(&self) -> DbContext {
        DbContext::from_url(&self.database_url())
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, prefer::FromValue)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    /// Database filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Bind address for the HTTP API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind: Option<String>,
    /// OCR settings.
    #[serde(default, skip_serializing_if = "OcrSection::is_default")]
    #[prefer(default)]
    pub ocr: OcrSection,
    /// Maximum upload size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_limit: Option<u64>,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    #[prefer(skip)]
    pub source_path: Option<PathBuf>,
}

/// `[ocr]` section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, prefer::FromValue)]
pub struct OcrSection {
    /// Tesseract language code, e.g. "eng" or "eng+deu".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Render resolution for scanned pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dpi: Option<u64>,
    /// Keep physical layout when reading embedded text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<bool>,
}

impl OcrSection {
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers orderscan config files in standard locations.
    pub async fn load() -> Self {
        // Use prefer for file discovery, then parse with serde
        match prefer::load("orderscan").await {
            Ok(pref_config) => {
                if let Some(path) = pref_config.source_path() {
                    match Self::load_from_path(path).await {
                        Ok(config) => config,
                        Err(e) => {
                            tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                            Self::default()
                        }
                    }
                } else {
                    Self::default()
                }
            }
            // No config file found
            Err(_) => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let mut config = Self::parse(&contents, ext)?;
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config contents in the format named by `ext`.
    pub fn parse(contents: &str, ext: &str) -> Result<Self, String> {
        match ext {
            "toml" => {
                toml::from_str(contents).map_err(|e| format!("Failed to parse TOML config: {}", e))
            }
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
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
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref bind) = self.bind {
            settings.bind = bind.clone();
        }
        if let Some(ref language) = self.ocr.language {
            settings.ocr_language = language.clone();
        }
        if let Some(dpi) = self.ocr.dpi {
            settings.render_dpi = u32::try_from(dpi).unwrap_or(DEFAULT_RENDER_DPI);
        }
        if let Some(layout) = self.ocr.layout {
            settings.pdf_layout = layout;
        }
        if let Some(limit) = self.upload_limit {
            settings.upload_limit = usize::try_from(limit).unwrap_or(usize::MAX);
        }
    }

    /// Compute SHA-256 hash of the serialized config.
    pub fn hash(&self) -> String {
        let json = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(json.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Data directory (--data-dir flag).
    pub data_dir: Option<PathBuf>,
}

/// Read a non-empty environment variable.
fn env_override(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Load config from the explicit path or by discovery.
async fn load_file_config(options: &LoadOptions) -> Config {
    if let Some(ref config_path) = options.config_path {
        return match Config::load_from_path(config_path).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}", e);
                Config::default()
            }
        };
    }
    Config::load().await
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = load_file_config(&options).await;
    let mut settings = Settings::default();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = config.base_dir().unwrap_or_else(|| cwd.clone());
    config.apply_to_settings(&mut settings, &base_dir);

    // --data-dir takes precedence over the config file
    if let Some(ref data_dir) = options.data_dir {
        settings.data_dir = config.resolve_path(&data_dir.to_string_lossy(), &cwd);
    }

    // Environment variables take highest precedence
    if let Some(database_url) = env_override("DATABASE_URL") {
        tracing::debug!("Using DATABASE_URL from environment");
        settings.database_url = Some(database_url);
    }
    if let Some(bind) = env_override("ORDERSCAN_BIND") {
        tracing::debug!("Using ORDERSCAN_BIND from environment: {}", bind);
        settings.bind = bind;
    }
    if let Some(language) = env_override("ORDERSCAN_OCR_LANG") {
        tracing::debug!("Using ORDERSCAN_OCR_LANG from environment: {}", language);
        settings.ocr_language = language;
    }

    (settings, config)
}
