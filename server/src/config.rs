use std::{env, fmt::Display, net::IpAddr, path::PathBuf, str::FromStr};

use anyhow::anyhow;
use carpool_data_management::DataManager;
use tracing::{info, warn};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "8000";

pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    /// Marks the session cookie `Secure`. Needed when served over https.
    pub secure_cookies: bool,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let database_path = var("CARPOOL_DATABASE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| DataManager::default_database_path());

        Ok(Self {
            host: try_load("CARPOOL_HOST", DEFAULT_HOST)?,
            port: try_load("CARPOOL_PORT", DEFAULT_PORT)?,
            database_path,
            secure_cookies: try_load("CARPOOL_SECURE_COOKIES", "false")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 8000,
            database_path: DataManager::default_database_path(),
            secure_cookies: false,
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            anyhow!("Environment misconfigured: {key}: {e}")
        })
}
