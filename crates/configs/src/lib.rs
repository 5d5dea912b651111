use std::path::{Path, PathBuf};

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

pub const DEFAULT_CONFIG_DIR: &str = "/var/www/html/config";
pub const DEFAULT_PROBE_FILE: &str = ".php-write-test";
pub const DEFAULT_ROUTE: &str = "/__fscheck";

/// Routes owned by the server itself; the report route may not shadow them.
const RESERVED_ROUTES: &[&str] = &["/health", "/metrics"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fscheck: FsCheckConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Where the write check looks and where it is served.
#[derive(Debug, Clone, Deserialize)]
pub struct FsCheckConfig {
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,
    /// Bare file name created inside `config_dir` by the probe.
    #[serde(default = "default_probe_file")]
    pub probe_file: String,
    #[serde(default = "default_route")]
    pub route: String,
}

impl Default for FsCheckConfig {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            probe_file: default_probe_file(),
            route: default_route(),
        }
    }
}

impl FsCheckConfig {
    /// Config pointed at `dir`, everything else default. Mostly for tests.
    pub fn for_dir(dir: impl Into<PathBuf>) -> Self {
        Self { config_dir: dir.into(), ..Self::default() }
    }

    pub fn probe_path(&self) -> PathBuf {
        self.config_dir.join(&self.probe_file)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8080 }
fn default_config_dir() -> PathBuf { PathBuf::from(DEFAULT_CONFIG_DIR) }
fn default_probe_file() -> String { DEFAULT_PROBE_FILE.into() }
fn default_route() -> String { DEFAULT_ROUTE.into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Defaults, with `SERVER_HOST` / `SERVER_PORT` taken from the environment when set.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg
    }

    /// Load the config file if it exists, otherwise fall back to [`AppConfig::from_env`].
    /// A file that exists but does not parse is an error, not a fallback.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            Self::from_env()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.fscheck.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FsCheckConfig {
    pub fn validate(&self) -> Result<()> {
        if self.config_dir.as_os_str().is_empty() {
            return Err(anyhow!("fscheck.config_dir is empty"));
        }
        let name = self.probe_file.as_str();
        if name.is_empty() || name == "." || name == ".." {
            return Err(anyhow!("fscheck.probe_file must be a file name, got {name:?}"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(anyhow!("fscheck.probe_file must not contain path separators, got {name:?}"));
        }
        if !self.route.starts_with('/') {
            return Err(anyhow!("fscheck.route must start with '/', got {:?}", self.route));
        }
        if RESERVED_ROUTES.contains(&self.route.as_str()) {
            return Err(anyhow!("fscheck.route {:?} is reserved", self.route));
        }
        Ok(())
    }
}
