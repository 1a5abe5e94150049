//! Configuration management for logopress.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default port for the web server.
pub const DEFAULT_PORT: u16 = 3000;

/// Default number of domains processed per generation run.
pub const DEFAULT_GENERATE_LIMIT: usize = 10;

/// Config file looked up inside the data directory.
const CONFIG_FILENAME: &str = "logopress.toml";

/// Default spreadsheet filename holding the company domain list.
const SPREADSHEET_FILENAME: &str = "companies.xlsx";

/// Default background template filename.
const BACKGROUND_FILENAME: &str = "background.jpg";

/// Application settings, resolved once at startup.
///
/// Precedence, lowest to highest: built-in defaults, `logopress.toml`
/// in the data directory, environment (`PORT`), CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory. Inputs and generated cards live here.
    pub data_dir: PathBuf,
    /// Spreadsheet with the company domain list.
    pub spreadsheet: PathBuf,
    /// Background template image.
    pub background: PathBuf,
    /// Base URL of the logo-by-domain service.
    pub logo_service_url: String,
    /// Header of the spreadsheet column holding domains.
    pub domain_column: String,
    /// Prefix prepended to each spreadsheet domain to form the lookup key.
    pub domain_prefix: String,
    /// Maximum domains processed per generation run.
    pub generate_limit: usize,
    /// User agent for logo service requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
    /// Host the web server binds to.
    pub host: String,
    /// Port the web server binds to.
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        let data_dir = PathBuf::from(".");

        Self {
            spreadsheet: data_dir.join(SPREADSHEET_FILENAME),
            background: data_dir.join(BACKGROUND_FILENAME),
            data_dir,
            logo_service_url: "https://logo.clearbit.com".to_string(),
            domain_column: "Domain".to_string(),
            domain_prefix: "www.".to_string(),
            generate_limit: DEFAULT_GENERATE_LIMIT,
            user_agent: "logopress/0.1".to_string(),
            request_timeout: 30,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            spreadsheet: data_dir.join(SPREADSHEET_FILENAME),
            background: data_dir.join(BACKGROUND_FILENAME),
            data_dir,
            ..Default::default()
        }
    }

    /// Apply environment variable overrides.
    ///
    /// `PORT` is honored here so the config file cannot shadow it.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(port) = std::env::var("PORT").ok().filter(|s| !s.is_empty()) {
            match port.parse::<u16>() {
                Ok(port) => {
                    tracing::debug!("Using PORT from environment: {}", port);
                    self.port = port;
                }
                Err(_) => {
                    tracing::warn!("Ignoring invalid PORT from environment: {}", port);
                }
            }
        }
        self
    }
}

/// Configuration file structure. Every field is optional; missing fields
/// keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Spreadsheet path (relative paths resolve against the data directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet: Option<String>,
    /// Background template path (relative paths resolve against the data directory).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Base URL of the logo-by-domain service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_service_url: Option<String>,
    /// Spreadsheet column header holding domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_column: Option<String>,
    /// Prefix prepended to each domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_prefix: Option<String>,
    /// Maximum domains per generation run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_limit: Option<usize>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    /// Host the web server binds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Port the web server binds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Resolve a path that may be relative to the data directory.
    fn resolve_path(path_str: &str, base_dir: &Path) -> PathBuf {
        let path = Path::new(path_str);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings. Relative input paths resolve
    /// against the data directory.
    pub fn apply_to_settings(&self, settings: &mut Settings) {
        if let Some(ref spreadsheet) = self.spreadsheet {
            settings.spreadsheet = Self::resolve_path(spreadsheet, &settings.data_dir);
        }
        if let Some(ref background) = self.background {
            settings.background = Self::resolve_path(background, &settings.data_dir);
        }
        if let Some(ref url) = self.logo_service_url {
            settings.logo_service_url = url.clone();
        }
        if let Some(ref column) = self.domain_column {
            settings.domain_column = column.clone();
        }
        if let Some(ref prefix) = self.domain_prefix {
            settings.domain_prefix = prefix.clone();
        }
        if let Some(limit) = self.generate_limit {
            settings.generate_limit = limit;
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        if let Some(ref host) = self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
    }
}

/// Load settings for a data directory (current directory when `None`),
/// layering `logopress.toml` and environment overrides on the defaults.
pub fn load_settings(data_dir: Option<&Path>) -> anyhow::Result<Settings> {
    let data_dir = data_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut settings = Settings::with_data_dir(data_dir);

    let config_path = settings.data_dir.join(CONFIG_FILENAME);
    if config_path.is_file() {
        let config = Config::load_from_path(&config_path)?;
        config.apply_to_settings(&mut settings);
        tracing::debug!("Loaded configuration from {}", config_path.display());
    }

    Ok(settings.with_env_overrides())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // Serializes tests that read or write the PORT environment variable.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.generate_limit, 10);
        assert_eq!(settings.domain_column, "Domain");
        assert_eq!(settings.domain_prefix, "www.");
        assert_eq!(settings.spreadsheet, PathBuf::from("./companies.xlsx"));
        assert_eq!(settings.background, PathBuf::from("./background.jpg"));
    }

    #[test]
    fn test_with_data_dir_derives_input_paths() {
        let settings = Settings::with_data_dir(PathBuf::from("/srv/cards"));
        assert_eq!(settings.data_dir, PathBuf::from("/srv/cards"));
        assert_eq!(settings.spreadsheet, PathBuf::from("/srv/cards/companies.xlsx"));
        assert_eq!(settings.background, PathBuf::from("/srv/cards/background.jpg"));
    }

    #[test]
    fn test_config_file_overrides() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("PORT");

        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("logopress.toml"),
            r#"
port = 8080
generate_limit = 3
spreadsheet = "input/domains.xlsx"
background = "/opt/assets/template.jpg"
"#,
        )
        .unwrap();

        let settings = load_settings(Some(dir.path())).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.generate_limit, 3);
        // Relative paths resolve against the data directory.
        assert_eq!(settings.spreadsheet, dir.path().join("input/domains.xlsx"));
        // Absolute paths are kept as-is.
        assert_eq!(settings.background, PathBuf::from("/opt/assets/template.jpg"));
    }

    #[test]
    fn test_invalid_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logopress.toml"), "port = \"not a number").unwrap();

        assert!(load_settings(Some(dir.path())).is_err());
    }

    #[test]
    fn test_port_env_override() {
        let _guard = ENV_LOCK.lock().unwrap();

        std::env::set_var("PORT", "4444");
        let settings = Settings::default().with_env_overrides();
        assert_eq!(settings.port, 4444);

        // An unparsable PORT keeps the configured value.
        std::env::set_var("PORT", "not-a-port");
        let settings = Settings::default().with_env_overrides();
        assert_eq!(settings.port, DEFAULT_PORT);

        std::env::remove_var("PORT");
    }

    #[test]
    fn test_env_override_beats_config_file() {
        let _guard = ENV_LOCK.lock().unwrap();

        let dir = tempdir().unwrap();
        fs::write(dir.path().join("logopress.toml"), "port = 8080\n").unwrap();

        std::env::set_var("PORT", "9090");
        let settings = load_settings(Some(dir.path())).unwrap();
        std::env::remove_var("PORT");

        assert_eq!(settings.port, 9090);
    }
}
