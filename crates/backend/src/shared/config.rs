use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub dictionary_cache: DictionaryCacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    /// Prepend UTF-8 BOM so Excel opens the CSV with the right encoding
    #[serde(default = "default_true")]
    pub csv_bom: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DictionaryCacheConfig {
    /// 0 disables caching of parsed dictionaries
    #[serde(default = "default_cache_entries")]
    pub max_entries: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
}

fn default_true() -> bool {
    true
}

fn default_cache_entries() -> usize {
    16
}

fn default_log_dir() -> String {
    "target/logs".to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { csv_bom: true }
    }
}

impl Default for DictionaryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_cache_entries(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
        }
    }
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[export]
csv_bom = true

[dictionary_cache]
max_entries = 16

[logging]
dir = "target/logs"
"#;

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Embedded default; holds the path that was looked up, if any
    Embedded(Option<PathBuf>),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded(Some(path)) => write!(
                f,
                "embedded default (config.toml not found at {})",
                path.display()
            ),
            ConfigSource::Embedded(None) => write!(f, "embedded default"),
        }
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Runs before logging is set up, so the source is returned for the caller to log.
pub fn load_config() -> anyhow::Result<(Config, ConfigSource)> {
    load_config_from(config_path_next_to_exe())
}

pub fn load_config_from(path: Option<PathBuf>) -> anyhow::Result<(Config, ConfigSource)> {
    match path {
        Some(path) if path.exists() => {
            let contents = std::fs::read_to_string(&path)?;
            Ok((parse_config(&contents)?, ConfigSource::File(path)))
        }
        missing => Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded(missing))),
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

fn config_path_next_to_exe() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    exe_path.parent().map(|dir| dir.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.export.csv_bom);
        assert_eq!(config.dictionary_cache.max_entries, 16);
        assert_eq!(config.logging.dir, "target/logs");
    }

    #[test]
    fn test_optional_sections_fall_back_to_defaults() {
        let config = parse_config("[server]\nhost = \"127.0.0.1\"\nport = 8080\n").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.export.csv_bom);
        assert_eq!(config.dictionary_cache.max_entries, 16);
    }

    #[test]
    fn test_missing_file_falls_back_to_embedded_default() {
        let path = std::env::temp_dir().join("picking-no-such-dir").join("config.toml");
        let (config, source) = load_config_from(Some(path.clone())).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(source, ConfigSource::Embedded(Some(path)));
        assert!(source.to_string().starts_with("embedded default (config.toml not found at"));
    }

    #[test]
    fn test_config_file_next_to_exe_is_used() {
        let dir = std::env::temp_dir().join(format!("picking-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[server]\nhost = \"127.0.0.1\"\nport = 8081\n").unwrap();

        let (config, source) = load_config_from(Some(path.clone())).unwrap();
        assert_eq!(config.server.port, 8081);
        assert_eq!(source, ConfigSource::File(path));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_server_section_is_an_error() {
        assert!(parse_config("[export]\ncsv_bom = false\n").is_err());
    }
}
