use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub bcrypt_cost: u32,
    pub cors_allowed_hosts: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://focusflow.db?mode=rwc".to_string(),
            db_max_connections: 5,
            host: "0.0.0.0".to_string(),
            port: 3000,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_allowed_hosts: vec![
                "localhost".to_string(),
                "focus-flow-fe.vercel.app".to_string(),
            ],
        }
    }
}

impl Config {
    /// Reads the environment (and `.env`, if present). Unset or unparsable
    /// values fall back to [`Config::default`].
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            db_max_connections: try_load("DB_MAX_CONNECTIONS", defaults.db_max_connections),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: try_load("PORT", defaults.port),
            bcrypt_cost: try_load("BCRYPT_COST", defaults.bcrypt_cost),
            cors_allowed_hosts: env::var("CORS_ALLOWED_HOSTS")
                .map(|raw| parse_host_list(&raw))
                .unwrap_or(defaults.cors_allowed_hosts),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn is_allowed_host(&self, host: &str) -> bool {
        self.cors_allowed_hosts.iter().any(|h| h.eq_ignore_ascii_case(host))
    }
}

fn try_load<T: FromStr + Display>(key: &str, default: T) -> T
where
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}

fn parse_host_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}
