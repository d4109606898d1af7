use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Where the process runs.
///
/// `Local` binds a port, reads a `.env` file and refuses to start without
/// credentials. `Hosted` leaves secrets to the platform and tolerates missing
/// ones so the host does not restart-loop the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    Local,
    Hosted,
}

impl DeploymentMode {
    /// Read the mode from `ENVIRONMENT`. Only call this once, at startup.
    pub fn from_env() -> Self {
        Self::parse(env::var("ENVIRONMENT").ok().as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("prod") | Some("production") | Some("hosted") => DeploymentMode::Hosted,
            _ => DeploymentMode::Local,
        }
    }

    pub fn is_hosted(self) -> bool {
        self == DeploymentMode::Hosted
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentMode::Local => f.write_str("local"),
            DeploymentMode::Hosted => f.write_str("hosted"),
        }
    }
}

/// Load `.env` into the process environment in `Local` mode.
///
/// Call before anything reads the environment (tracing setup included).
/// Returns the file that was loaded, if any. Repeat calls do not override
/// variables that are already set.
pub fn load_dotenv(mode: DeploymentMode) -> Option<PathBuf> {
    if mode.is_hosted() {
        return None;
    }
    dotenvy::dotenv().ok()
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    pub fn load(mode: DeploymentMode) -> Result<Self, AppError> {
        load_dotenv(mode);

        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .set_override_option("port", env::var("PORT").ok())?
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
