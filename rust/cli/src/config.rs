//! Layered configuration: defaults, then the TOML file named by
//! `COEXIST_CONFIG`, then `COEXIST_*` environment variables. Command-line
//! flags are applied last by the subcommands through [`Config::with_overrides`].

use coexist_server::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

pub const CONFIG_ENV: &str = "COEXIST_CONFIG";
pub const HOST_ENV: &str = "COEXIST_HOST";
pub const PORT_ENV: &str = "COEXIST_PORT";
pub const SEED_ENV: &str = "COEXIST_SEED";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub host: ValueSource,
    pub port: ValueSource,
    pub seed: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            host: ValueSource::Default,
            port: ValueSource::Default,
            seed: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            seed: None,
        }
    }
}

impl Config {
    /// Applies explicit command-line values on top of the resolved layers.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        validate(&self)?;
        Ok(self)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.host.clone(), self.port).with_seed(self.seed)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    resolve(|key| std::env::var(key).ok())
}

/// Resolves every layer, reading variables through `env` so callers can
/// supply something other than the process environment.
pub fn resolve<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env(CONFIG_ENV).filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        let s = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.host {
            cfg.host = v;
            sources.host = ValueSource::File;
        }
        if let Some(v) = f.port {
            cfg.port = v;
            sources.port = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
    }

    if let Some(host) = env(HOST_ENV)
        && !host.is_empty()
    {
        cfg.host = host;
        sources.host = ValueSource::Env;
    }
    if let Some(port) = env(PORT_ENV)
        && !port.is_empty()
    {
        cfg.port = port
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid port `{port}`")))?;
        sources.port = ValueSource::Env;
    }
    if let Some(seed) = env(SEED_ENV)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("invalid seed `{seed}`")))?,
        );
        sources.seed = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    seed: Option<u64>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.host.trim().is_empty() {
        return Err(ConfigError::Invalid("host must not be empty".into()));
    }
    Ok(())
}
