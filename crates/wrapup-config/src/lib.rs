//! Configuration management for wrapup.
//!
//! Parses `config.toml` with serde. The default file lives at
//! `~/.config/wrapup/config.toml` and is generated from a built-in template
//! the first time it is needed.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [colors]
//! title = "\u001b[1m"
//! description = "\u001b[34m"
//! example-text = "\u001b[36m"
//! example-code = "\u001b[33m"
//!
//! [pages]
//! cache_dir = "~/.cache/tldr"
//!
//! [network]
//! enabled = true
//! timeout = 30
//! ```
//!
//! ## Expansion
//!
//! - `pages.cache_dir` and `network.base_url` support `${VAR}` and
//!   `${VAR:-default}`; `pages.cache_dir` also expands a leading `~`.
//! - Color strings may spell ESC as `\e`, `\033` or `\x1b`.

pub mod dirs;
mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename inside the config directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Contents written by [`Config::write_default`].
pub const DEFAULT_CONFIG: &str = r#"[colors]
title = "\u001b[1m"
description = "\u001b[34m"
example-text = "\u001b[36m"
example-code = "\u001b[33m"

[pages]
# cache_dir = "~/.cache/tldr"

[network]
enabled = true
timeout = 30
"#;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the tldr cache directory.
    pub cache_dir: Option<PathBuf>,
    /// Override whether missing pages are downloaded.
    pub network_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page colors.
    pub colors: ColorsConfig,
    /// Page location (paths are raw strings from TOML).
    pages: PagesConfigRaw,
    /// Network tier configuration.
    pub network: NetworkConfig,

    /// Resolved page location (set after loading).
    #[serde(skip)]
    pub pages_resolved: PagesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir().unwrap_or_else(|_| PathBuf::from(".cache/tldr"));
        Self::default_with_cache_dir(cache_dir)
    }
}

/// Color escape sequences.
///
/// Unset keys are left to the renderer's built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ColorsConfig {
    /// Page title.
    pub title: Option<String>,
    /// Page description.
    pub description: Option<String>,
    /// Example description.
    pub example_text: Option<String>,
    /// Example command.
    pub example_code: Option<String>,
}

/// Raw pages configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PagesConfigRaw {
    cache_dir: Option<String>,
}

/// Resolved pages configuration with an absolute cache directory.
#[derive(Debug, Default)]
pub struct PagesConfig {
    /// Directory containing `pages/{platform}/`.
    pub cache_dir: PathBuf,
}

/// Network tier configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Whether missing pages are downloaded.
    pub enabled: bool,
    /// Repository root that `pages/{platform}/{page}` is appended to
    /// (default: the upstream tldr repository).
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: None,
            timeout: 30,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Refusing to overwrite an existing file.
    #[error("Configuration file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`pages.cache_dir`").
        field: String,
        /// Error message (e.g., "${`TLDR_CACHE`} not set").
        message: String,
    },
    /// Neither an XDG directory nor `$HOME` is available.
    #[error("$HOME is not set, set it to your home directory")]
    NoHome,
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise loads
    /// `~/.config/wrapup/config.toml`, generating it first if it is missing.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, the default file
    /// cannot be generated, or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else {
            let path = Self::default_path()?;
            if !path.exists() {
                tracing::warn!("config file {} not found, generating new one", path.display());
                Self::write_default(&path, false)?;
            }
            Self::load_from_file(&path)?
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// `~/.config/wrapup/config.toml`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHome`] if no home directory can be found.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(dirs::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Write [`DEFAULT_CONFIG`] to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyExists`] if `path` exists and `overwrite`
    /// is false, or an I/O error.
    pub fn write_default(path: &Path, overwrite: bool) -> Result<(), ConfigError> {
        if path.exists() && !overwrite {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            tracing::warn!("config folder {} not found, creating it", parent.display());
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, DEFAULT_CONFIG)?;
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(cache_dir) = &settings.cache_dir {
            self.pages_resolved.cache_dir.clone_from(cache_dir);
        }
        if let Some(enabled) = settings.network_enabled {
            self.network.enabled = enabled;
        }
    }

    /// Create default config with the given cache directory.
    fn default_with_cache_dir(cache_dir: PathBuf) -> Self {
        Self {
            colors: ColorsConfig::default(),
            pages: PagesConfigRaw::default(),
            network: NetworkConfig::default(),
            pages_resolved: PagesConfig { cache_dir },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_values()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref base_url) = self.network.base_url {
            require_non_empty(base_url, "network.base_url")?;
            require_http_url(base_url, "network.base_url")?;
        }
        if self.network.timeout == 0 {
            return Err(ConfigError::Validation(
                "network.timeout must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variables and escape spellings.
    fn expand_values(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.network.base_url {
            self.network.base_url = Some(expand::expand_env(url, "network.base_url")?);
        }

        if let Some(ref dir) = self.pages.cache_dir {
            self.pages.cache_dir = Some(expand::expand_path(dir, "pages.cache_dir")?);
        }

        let colors = &mut self.colors;
        for color in [
            &mut colors.title,
            &mut colors.description,
            &mut colors.example_text,
            &mut colors.example_code,
        ]
        .into_iter()
        .flatten()
        {
            *color = expand::decode_escapes(color);
        }

        Ok(())
    }

    /// Resolve the cache directory against the config directory.
    ///
    /// Falls back to `~/.cache/tldr` when `pages.cache_dir` is not set.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let cache_dir = match self.pages.cache_dir.as_deref() {
            Some(dir) => config_dir.join(dir),
            None => dirs::cache_dir()?,
        };
        self.pages_resolved = PagesConfig { cache_dir };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_cache_dir(PathBuf::from("/cache/tldr"));
        assert_eq!(config.colors, ColorsConfig::default());
        assert_eq!(config.pages_resolved.cache_dir, PathBuf::from("/cache/tldr"));
        assert!(config.network.enabled);
        assert!(config.network.base_url.is_none());
        assert_eq!(config.network.timeout, 30);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.colors, ColorsConfig::default());
        assert!(config.network.enabled);
    }

    #[test]
    fn test_parse_template() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.colors.title.as_deref(), Some("\x1b[1m"));
        assert_eq!(config.colors.description.as_deref(), Some("\x1b[34m"));
        assert_eq!(config.colors.example_text.as_deref(), Some("\x1b[36m"));
        assert_eq!(config.colors.example_code.as_deref(), Some("\x1b[33m"));
        assert!(config.pages.cache_dir.is_none());
        assert!(config.network.enabled);
        assert_eq!(config.network.timeout, 30);
    }

    #[test]
    fn test_parse_partial_colors() {
        let toml = r#"
[colors]
title = "\u001b[31m"
example-code = "\u001b[32m"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.colors.title.as_deref(), Some("\x1b[31m"));
        assert_eq!(config.colors.description, None);
        assert_eq!(config.colors.example_text, None);
        assert_eq!(config.colors.example_code.as_deref(), Some("\x1b[32m"));
    }

    #[test]
    fn test_expand_values_decodes_escapes() {
        let toml = r#"
[colors]
title = '\e[1m'
description = '\033[35m'
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_values().unwrap();
        assert_eq!(config.colors.title.as_deref(), Some("\x1b[1m"));
        assert_eq!(config.colors.description.as_deref(), Some("\x1b[35m"));
        assert_eq!(config.colors.example_code, None);
    }

    #[test]
    fn test_parse_network_config() {
        let toml = r#"
[network]
enabled = false
base_url = "http://mirror.local/tldr"
timeout = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.network.enabled);
        assert_eq!(
            config.network.base_url.as_deref(),
            Some("http://mirror.local/tldr")
        );
        assert_eq!(config.network.timeout, 5);
    }

    #[test]
    fn test_resolve_relative_cache_dir() {
        let toml = r#"
[pages]
cache_dir = "tldr-cache"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/etc/wrapup")).unwrap();
        assert_eq!(
            config.pages_resolved.cache_dir,
            PathBuf::from("/etc/wrapup/tldr-cache")
        );
    }

    #[test]
    fn test_resolve_absolute_cache_dir() {
        let toml = r#"
[pages]
cache_dir = "/var/cache/tldr"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/etc/wrapup")).unwrap();
        assert_eq!(
            config.pages_resolved.cache_dir,
            PathBuf::from("/var/cache/tldr")
        );
    }

    #[test]
    fn test_expand_env_vars_cache_dir() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("WRAPUP_TEST_CACHE", "/srv/pages");
        }

        let toml = r#"
[pages]
cache_dir = "${WRAPUP_TEST_CACHE}/tldr"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_values().unwrap();
        assert_eq!(config.pages.cache_dir.as_deref(), Some("/srv/pages/tldr"));

        unsafe {
            std::env::remove_var("WRAPUP_TEST_CACHE");
        }
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_cache_dir(PathBuf::from("/cache/tldr"));
        let overrides = CliSettings {
            cache_dir: Some(PathBuf::from("/custom")),
            network_enabled: Some(false),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.pages_resolved.cache_dir, PathBuf::from("/custom"));
        assert!(!config.network.enabled);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_cache_dir(PathBuf::from("/cache/tldr"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.pages_resolved.cache_dir, PathBuf::from("/cache/tldr"));
        assert!(config.network.enabled);
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "[colors]\ntitle = \"\\u001b[4m\"\n[pages]\ncache_dir = \"pages-cache\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.colors.title.as_deref(), Some("\x1b[4m"));
        assert_eq!(
            config.pages_resolved.cache_dir,
            tmp.path().join("pages-cache")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_cli_settings_take_precedence() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[pages]\ncache_dir = \"/from/file\"\n").unwrap();

        let settings = CliSettings {
            cache_dir: Some(PathBuf::from("/from/cli")),
            network_enabled: Some(false),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.pages_resolved.cache_dir, PathBuf::from("/from/cli"));
        assert!(!config.network.enabled);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.toml");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[colors\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_write_default_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/wrapup/config.toml");

        Config::write_default(&path, false).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn test_write_default_refuses_overwrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "# mine\n").unwrap();

        let err = Config::write_default(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        Config::write_default(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_cache_dir(PathBuf::from("/cache"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_url_empty() {
        let mut config = Config::default_with_cache_dir(PathBuf::from("/cache"));
        config.network.base_url = Some(String::new());
        assert_validation_error(&config, &["network.base_url", "empty"]);
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_cache_dir(PathBuf::from("/cache"));
        config.network.base_url = Some("ftp://mirror".to_owned());
        assert_validation_error(&config, &["network.base_url", "http"]);
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::default_with_cache_dir(PathBuf::from("/cache"));
        config.network.timeout = 0;
        assert_validation_error(&config, &["timeout"]);
    }
}
