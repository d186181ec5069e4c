use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// How a successful delete is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteResponse {
    /// 200 with `{"message": "Player deleted successfully"}`
    #[default]
    Message,
    /// 204 with an empty body
    NoContent,
}

impl FromStr for DeleteResponse {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "message" => Ok(DeleteResponse::Message),
            "no-content" | "no_content" | "204" => Ok(DeleteResponse::NoContent),
            other => Err(format!("expected `message` or `no-content`, got `{other}`")),
        }
    }
}

/// Pool sizing, read from `DB_MAX_CONNECTIONS` / `DB_ACQUIRE_TIMEOUT_SECS`.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub database: PgConnectOptions,
    pub pool: PoolConfig,
    pub delete_response: DeleteResponse,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = parse_or(&lookup, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port: u16 = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let database = database_options(&lookup)?;

        let pool = PoolConfig {
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?),
        };

        let delete_response = parse_or(&lookup, "DELETE_RESPONSE", DeleteResponse::default())?;

        Ok(Config {
            listen_addr: SocketAddr::new(host, port),
            database,
            pool,
            delete_response,
        })
    }
}

fn database_options<F>(lookup: &F) -> Result<PgConnectOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    // A full URL wins over the individual parts and keeps its own sslmode
    // unless DB_SSL_MODE is set explicitly.
    let options = match non_empty(lookup, "DATABASE_URL") {
        Some(url) => {
            let options = url
                .parse::<PgConnectOptions>()
                .map_err(|err| invalid("DATABASE_URL", url, err))?;
            match non_empty(lookup, "DB_SSL_MODE") {
                Some(_) => options.ssl_mode(parse_or(lookup, "DB_SSL_MODE", PgSslMode::Require)?),
                None => options,
            }
        }
        None => {
            let mut options = PgConnectOptions::new_without_pgpass();
            if let Some(host) = non_empty(lookup, "DB_HOST") {
                options = options.host(&host);
            }
            if let Some(user) = non_empty(lookup, "DB_USER") {
                options = options.username(&user);
            }
            if let Some(password) = non_empty(lookup, "DB_PASSWORD") {
                options = options.password(&password);
            }
            if let Some(name) = non_empty(lookup, "DB_NAME") {
                options = options.database(&name);
            }
            if let Some(raw) = non_empty(lookup, "DB_PORT") {
                let port: u16 = raw.parse().map_err(|err| invalid("DB_PORT", raw, err))?;
                options = options.port(port);
            }
            // Encrypted, but the server certificate is not verified
            options.ssl_mode(parse_or(lookup, "DB_SSL_MODE", PgSslMode::Require)?)
        }
    };

    Ok(options)
}

fn non_empty<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty(lookup, name) {
        Some(raw) => raw.trim().parse().map_err(|err| invalid(name, raw, err)),
        None => Ok(default),
    }
}

fn invalid(name: &'static str, value: String, reason: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        name,
        value,
        reason: reason.to_string(),
    }
}
