// Runtime configuration (CLI + TOML).
// Precedence: built-in defaults < config file < command-line flags.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{ConsoleError, Result};
use crate::state::Tab;
use crate::storage;

pub const DEFAULT_BASE_URL: &str = "http://localhost:4800";
pub const DEFAULT_API_PREFIX: &str = "/api";

#[derive(Parser, Debug, Default)]
#[command(
    name = "review-console",
    about = "Terminal console for the synthetic review generator",
    version
)]
pub struct Cli {
    /// Config file path (default: platform config dir / config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Server base URL, e.g. http://localhost:4800
    #[arg(long)]
    pub base_url: Option<String>,

    /// Tab to open on start: generate | quality | reports | server
    #[arg(long)]
    pub tab: Option<String>,

    /// Directory for downloaded artifacts
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, action)]
    pub verbose: bool,

    /// Print the resolved config as TOML and exit
    #[arg(long, action)]
    pub print_config: bool,
}

/// On-disk config; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub api_prefix: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub download_dir: Option<PathBuf>,
    pub initial_tab: Option<String>,
    pub trust_server_text: Option<bool>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppConfig {
    pub base_url: String,
    pub api_prefix: String,
    /// No timeout unless set; a hung request keeps its control busy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    pub download_dir: PathBuf,
    pub initial_tab: String,
    pub trust_server_text: bool,
    #[serde(skip)]
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout_secs: None,
            download_dir: storage::default_download_dir()
                .unwrap_or_else(|| PathBuf::from("downloads")),
            initial_tab: Tab::default().id().to_string(),
            trust_server_text: false,
            verbose: false,
        }
    }
}

impl AppConfig {
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut cfg = Self::default();

        let path = cli.config.clone().or_else(storage::config_path);
        if let Some(path) = path {
            if let Some(file) = read_file_config(&path)? {
                cfg.apply_file(file);
            } else if cli.config.is_some() {
                return Err(ConsoleError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
        }

        cfg.apply_cli(cli);
        Ok(cfg)
    }

    fn apply_file(&mut self, fc: FileConfig) {
        if let Some(v) = fc.base_url { self.base_url = v; }
        if let Some(v) = fc.api_prefix { self.api_prefix = v; }
        if let Some(v) = fc.request_timeout_secs { self.request_timeout_secs = Some(v); }
        if let Some(v) = fc.download_dir { self.download_dir = v; }
        if let Some(v) = fc.initial_tab { self.initial_tab = v; }
        if let Some(v) = fc.trust_server_text { self.trust_server_text = v; }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(v) = &cli.base_url { self.base_url = v.clone(); }
        if let Some(v) = &cli.tab { self.initial_tab = v.clone(); }
        if let Some(v) = &cli.download_dir { self.download_dir = v.clone(); }
        if cli.verbose { self.verbose = true; }
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConsoleError::Config(e.to_string()))
    }
}

fn read_file_config(path: &Path) -> Result<Option<FileConfig>> {
    let Some(raw) = storage::read_text(path)? else {
        return Ok(None);
    };
    toml::from_str(&raw)
        .map(Some)
        .map_err(|e| ConsoleError::Config(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli_with_config(path: PathBuf) -> Cli {
        Cli {
            config: Some(path),
            ..Cli::default()
        }
    }

    #[test]
    fn test_file_then_cli_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"http://review-box:9000\"\ninitial_tab = \"quality\"\nrequest_timeout_secs = 30\n",
        )
        .unwrap();

        let cfg = AppConfig::load(&cli_with_config(path.clone())).unwrap();
        assert_eq!(cfg.base_url, "http://review-box:9000");
        assert_eq!(cfg.initial_tab, "quality");
        assert_eq!(cfg.request_timeout_secs, Some(30));
        assert_eq!(cfg.api_prefix, DEFAULT_API_PREFIX);
        assert!(!cfg.trust_server_text);

        let cli = Cli {
            base_url: Some("http://127.0.0.1:4800".to_string()),
            tab: Some("server".to_string()),
            ..cli_with_config(path)
        };
        let cfg = AppConfig::load(&cli).unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:4800");
        assert_eq!(cfg.initial_tab, "server");
        assert_eq!(cfg.request_timeout_secs, Some(30));
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let dir = TempDir::new().unwrap();
        let err = AppConfig::load(&cli_with_config(dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn test_unknown_key_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_uri = \"typo\"\n").unwrap();
        let err = AppConfig::load(&cli_with_config(path)).unwrap_err();
        assert!(err.to_string().contains("base_uri"));
    }

    #[test]
    fn test_print_config_round_trips_through_file_config() {
        let cfg = AppConfig::default();
        let text = cfg.to_toml().unwrap();
        let parsed: FileConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(parsed.request_timeout_secs, None);
    }
}
